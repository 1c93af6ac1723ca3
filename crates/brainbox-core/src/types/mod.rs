//! Core type definitions used across the BrainBox workspace.

pub mod pagination;
pub mod paginator;
pub mod sorting;

pub use pagination::{DEFAULT_PAGE_SIZE, Page, PageRequest};
pub use paginator::{PageLink, page_window, render_window};
pub use sorting::{SortDirection, SortState, SortValue, Sortable};
