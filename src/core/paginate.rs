//! Page arithmetic: page counts, slices, boundary checks, and the numeric
//! page strip with collapsed ellipses.

/// Pager state for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    per_page: usize,
    /// Page count declared by the caller instead of derived from the data.
    declared_total: Option<usize>,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(12)
    }
}

impl Pager {
    pub fn new(per_page: usize) -> Self {
        Self {
            current: 1,
            per_page: per_page.max(1),
            declared_total: None,
        }
    }

    pub fn with_declared_total(mut self, total: usize) -> Self {
        self.declared_total = Some(total.max(1));
        self
    }

    pub fn current(&self) -> usize {
        self.current
    }

    #[cfg(test)]
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Change the page size.  Returns `true` if it actually changed.
    pub fn set_per_page(&mut self, per_page: usize) -> bool {
        let per_page = per_page.max(1);
        if per_page == self.per_page {
            return false;
        }
        self.per_page = per_page;
        true
    }

    pub fn total_pages(&self, len: usize) -> usize {
        self.declared_total
            .unwrap_or_else(|| total_pages(len, self.per_page))
    }

    pub fn can_prev(&self) -> bool {
        self.current > 1
    }

    pub fn can_next(&self, len: usize) -> bool {
        self.current < self.total_pages(len)
    }

    /// Whether `page` (1-based) exists for a list of `len` items.
    pub fn in_range(&self, page: usize, len: usize) -> bool {
        (1..=self.total_pages(len)).contains(&page)
    }

    /// Jump to `page`.  Returns `false` when nothing moved: out-of-range
    /// requests are dropped, and so is the current page.
    pub fn go_to(&mut self, page: usize, len: usize) -> bool {
        if !self.in_range(page, len) || page == self.current {
            return false;
        }
        self.current = page;
        true
    }

    pub fn prev(&mut self, len: usize) -> bool {
        self.can_prev() && self.go_to(self.current - 1, len)
    }

    pub fn next(&mut self, len: usize) -> bool {
        self.can_next(len) && self.go_to(self.current + 1, len)
    }

    pub fn first(&mut self) {
        self.current = 1;
    }

    /// Reset to page 1 if the current page no longer exists.
    pub fn clamp(&mut self, len: usize) -> bool {
        if self.current > self.total_pages(len) {
            self.current = 1;
            return true;
        }
        false
    }

    /// Index range of the current page within a list of `len` items.
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        page_range(self.current, self.per_page, len)
    }
}

/// `max(1, ceil(len / per_page))`.
pub fn total_pages(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page.max(1)).max(1)
}

/// Items of `page` (1-based), clipped to `len`.  Pages past the end are empty.
pub fn page_range(page: usize, per_page: usize, len: usize) -> std::ops::Range<usize> {
    let per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(per_page).min(len);
    let end = start.saturating_add(per_page).min(len);
    start..end
}

/// Rows that fit in `available` lines at `row_height` lines each.
pub fn items_per_page_for_height(available: u16, row_height: u16) -> usize {
    (usize::from(available) / usize::from(row_height.max(1))).max(1)
}

// ───────────────────────────────────────── page strip ────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Numeric strip for `current` of `total`: first and last page are always
/// present, `siblings` pages on each side of the current one, and a single
/// ellipsis for each skipped run.  A gap of exactly one page shows the page
/// instead of an ellipsis.
pub fn page_strip(current: usize, total: usize, siblings: usize) -> Vec<PageItem> {
    let total = total.max(1);
    let current = current.clamp(1, total);
    let lo = current.saturating_sub(siblings).max(1);
    let hi = (current + siblings).min(total);

    let mut out = Vec::new();
    if lo > 1 {
        out.push(PageItem::Page(1));
        match lo {
            2 => {}
            3 => out.push(PageItem::Page(2)),
            _ => out.push(PageItem::Ellipsis),
        }
    }
    out.extend((lo..=hi).map(PageItem::Page));
    if hi < total {
        match total - hi {
            1 => {}
            2 => out.push(PageItem::Page(total - 1)),
            _ => out.push(PageItem::Ellipsis),
        }
        out.push(PageItem::Page(total));
    }
    out
}
