//! Page-number window shown under every list view.

use std::fmt;

/// Pages shown on each side of the current one.
const PAGE_RANGE: u64 = 2;
/// Up to this many pages are listed without gaps.
const COMPACT_LIMIT: u64 = 10;

/// One entry of the paginator strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// A selectable page number.
    Page(u64),
    /// An elided run of pages.
    Gap,
}

impl fmt::Display for PageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{n}"),
            Self::Gap => f.write_str("..."),
        }
    }
}

/// Compute the paginator strip for `current` out of `total_pages`.
///
/// Short lists are shown in full. Longer ones keep the first and last page
/// reachable and show `PAGE_RANGE` neighbours around the current page.
pub fn page_window(current: u64, total_pages: u64) -> Vec<PageLink> {
    if total_pages <= COMPACT_LIMIT {
        return (1..=total_pages).map(PageLink::Page).collect();
    }

    let mut links = Vec::new();
    if current <= PAGE_RANGE + 1 {
        links.extend((1..=current + PAGE_RANGE).map(PageLink::Page));
        if total_pages > current + PAGE_RANGE {
            links.push(PageLink::Gap);
            links.push(PageLink::Page(total_pages));
        }
    } else if current <= total_pages - PAGE_RANGE {
        links.push(PageLink::Page(1));
        links.push(PageLink::Gap);
        links.extend((current - PAGE_RANGE..=current + PAGE_RANGE).map(PageLink::Page));
        if total_pages > current + PAGE_RANGE {
            links.push(PageLink::Gap);
            links.push(PageLink::Page(total_pages));
        }
    } else {
        links.push(PageLink::Page(1));
        links.push(PageLink::Gap);
        links.extend((current - PAGE_RANGE..=total_pages).map(PageLink::Page));
    }
    links
}

/// Render the strip as text, marking the current page with brackets.
pub fn render_window(current: u64, total_pages: u64) -> String {
    page_window(current, total_pages)
        .iter()
        .map(|link| match link {
            PageLink::Page(n) if *n == current => format!("[{n}]"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
