//! Client-side paging over the in-memory item list.

/// Items shown per page.
pub const PAGE_SIZE: usize = 5;

/// The slice of the full list that is on screen. `begin <= end <= len` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub active_page: usize,
    pub begin: usize,
    pub end: usize,
}

impl PageWindow {
    /// Window for 1-based `page` over a list of `len` items. Pages past the end are empty.
    pub fn for_page(page: usize, len: usize) -> Self {
        let begin = page.saturating_sub(1).saturating_mul(PAGE_SIZE).min(len);
        let end = page.saturating_mul(PAGE_SIZE).min(len).max(begin);
        PageWindow {
            active_page: page,
            begin,
            end,
        }
    }

    /// Recompute for a list whose length changed, staying on the same page.
    pub fn resized(self, len: usize) -> Self {
        Self::for_page(self.active_page, len)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end.min(items.len());
        &items[self.begin.min(end)..end]
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        PageWindow {
            active_page: 1,
            begin: 0,
            end: 0,
        }
    }
}

/// Number of pages needed for `len` items; zero for an empty list.
pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_items_page_as_5_5_2() {
        let items: Vec<usize> = (0..12).collect();
        let sizes: Vec<usize> = (1..=total_pages(items.len()))
            .map(|p| PageWindow::for_page(p, items.len()).slice(&items).len())
            .collect();
        assert_eq!(sizes, vec![5, 5, 2]);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(5), 1);
        assert_eq!(total_pages(6), 2);
        assert_eq!(total_pages(12), 3);
    }

    #[test]
    fn test_window_bounds_hold_for_any_page() {
        for len in 0..23 {
            for page in 0..8 {
                let w = PageWindow::for_page(page, len);
                assert_eq!(w.begin, (page.saturating_sub(1) * PAGE_SIZE).min(len));
                assert_eq!(w.end, (page * PAGE_SIZE).min(len).max(w.begin));
                assert!(w.begin <= w.end && w.end <= len);
            }
        }
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let items = vec!["a", "b", "c"];
        assert!(PageWindow::for_page(4, items.len()).slice(&items).is_empty());
        assert!(PageWindow::for_page(0, items.len()).slice(&items).is_empty());
    }

    #[test]
    fn test_resized_keeps_page() {
        let w = PageWindow::for_page(2, 12).resized(7);
        assert_eq!(w.active_page, 2);
        assert_eq!((w.begin, w.end), (5, 7));
    }
}
