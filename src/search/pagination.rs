/// Most page buttons shown at once
pub const WINDOW: u32 = 5;

/// Page buttons to render for `current` out of `total_pages`.
///
/// All pages when they fit; otherwise a window of [`WINDOW`] centred on `current`, pinned to
/// the start or end when `current` is within two pages of either edge.
pub fn page_window(current: u32, total_pages: u32) -> Vec<u32> {
    if total_pages == 0 {
        return Vec::new();
    }
    if total_pages <= WINDOW {
        return (1..=total_pages).collect();
    }

    let current = current.clamp(1, total_pages);
    let half = WINDOW / 2;
    let start = if current <= half + 1 {
        1
    } else if current >= total_pages - half {
        total_pages - WINDOW + 1
    } else {
        current - half
    };
    (start..start + WINDOW).collect()
}

/// Pagination bar state for one result page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub total_pages: u32,
    pub pages: Vec<u32>,
}

impl Pagination {
    /// `None` when everything fits on one page and no bar is shown.
    pub fn new(current: u32, total_pages: u32) -> Option<Pagination> {
        (total_pages > 1).then(|| Pagination {
            current,
            total_pages,
            pages: page_window(current, total_pages),
        })
    }

    pub fn previous(&self) -> Option<u32> {
        (self.current > 1).then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        (self.current < self.total_pages).then(|| self.current + 1)
    }
}
