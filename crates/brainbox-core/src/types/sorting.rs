//! Client-side column sorting for list views.
//!
//! Lists are sorted over the page already fetched. Selecting a column cycles
//! through ascending, descending, and back to the default `id` ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Column a list falls back to when sorting is reset.
pub const DEFAULT_SORT_COLUMN: &str = "id";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

/// A comparable cell value.
///
/// Variants order as declared, so numbers sort before text and missing
/// values sort last in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    /// Numeric column.
    Int(i64),
    /// Textual column (compared case-sensitively, as displayed).
    Text(String),
    /// The row has no value for this column.
    Missing,
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T: Into<SortValue>> From<Option<T>> for SortValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Missing)
    }
}

/// Rows that expose their columns for sorting.
pub trait Sortable {
    /// Value of `column` for this row; unknown columns yield `Missing`.
    fn sort_value(&self, column: &str) -> SortValue;
}

/// Current sort column and direction of a list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Column or field name to sort by.
    pub column: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    /// Create a sort state.
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    /// Advance the state after `column` is selected.
    ///
    /// A new column starts ascending; the current ascending column flips to
    /// descending; the current descending column resets to the default.
    pub fn toggle(&mut self, column: &str) {
        if column != self.column {
            *self = Self::new(column, SortDirection::Asc);
            return;
        }
        match self.direction {
            SortDirection::Asc => self.direction = SortDirection::Desc,
            SortDirection::Desc => *self = Self::default(),
        }
    }

    /// Compare two rows under this state.
    pub fn compare<T: Sortable>(&self, a: &T, b: &T) -> Ordering {
        let ordering = a
            .sort_value(&self.column)
            .cmp(&b.sort_value(&self.column));
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Sort rows in place (stable).
    pub fn apply<T: Sortable>(&self, rows: &mut [T]) {
        rows.sort_by(|a, b| self.compare(a, b));
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self::new(DEFAULT_SORT_COLUMN, SortDirection::Asc)
    }
}
