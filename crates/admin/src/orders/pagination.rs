//! Page navigation for the order list.

use order_desk_core::{PageNumber, PageSize};

/// Highest page shown by the fixed button run when the store reports no total.
const LEGACY_LAST_PAGE: u32 = 12;

/// Pages shown before the gap in the fixed button run.
const LEGACY_LEADING_PAGES: u32 = 6;

/// Number of page buttons above which the run is shortened with gaps.
const MAX_BUTTONS: u32 = 7;

/// One entry of the page-button run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    Page {
        number: PageNumber,
        current: bool,
    },
    /// Elided pages ("...").
    Gap,
}

/// Current page, page size and (when known) last page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: PageNumber,
    size: PageSize,
    last: Option<PageNumber>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PageSize::ORDER_LIST)
    }
}

impl Pagination {
    /// Start on the first page.
    #[must_use]
    pub const fn new(size: PageSize) -> Self {
        Self {
            page: PageNumber::FIRST,
            size,
            last: None,
        }
    }

    #[must_use]
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    #[must_use]
    pub const fn size(&self) -> PageSize {
        self.size
    }

    /// Last page, known only once the store has reported a total.
    #[must_use]
    pub const fn last_page(&self) -> Option<PageNumber> {
        self.last
    }

    /// Zero-based offset of the current page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.offset(self.size)
    }

    /// Record the last page reported by the most recent fetch.
    pub const fn set_last_page(&mut self, last: Option<PageNumber>) {
        self.last = last;
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.last.is_none_or(|last| self.page < last)
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > PageNumber::FIRST
    }

    /// Advance one page. Returns whether the page changed.
    ///
    /// Unbounded unless a last page is known.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.set(self.page.next())
    }

    /// Go back one page, floored at the first. Returns whether the page changed.
    pub fn prev(&mut self) -> bool {
        self.set(self.page.prev())
    }

    /// Jump to `page`. Returns whether the page changed.
    pub fn go_to(&mut self, page: PageNumber) -> bool {
        self.set(page)
    }

    /// Return to the first page and forget the last page (e.g., new filter).
    pub fn reset(&mut self) -> bool {
        self.last = None;
        self.set(PageNumber::FIRST)
    }

    fn set(&mut self, page: PageNumber) -> bool {
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// The page-button run to display.
    ///
    /// Without a last page this is the fixed run `1..=6, ..., 12`. With one,
    /// short runs list every page and long runs keep the first, the last and a
    /// window around the current page.
    #[must_use]
    pub fn buttons(&self) -> Vec<PageButton> {
        let current = self.page.get();
        let button = |n: u32| {
            PageNumber::new(n).map(|number| PageButton::Page {
                number,
                current: n == current,
            })
        };

        let Some(last) = self.last.map(PageNumber::get) else {
            return (1..=LEGACY_LEADING_PAGES)
                .filter_map(button)
                .chain([PageButton::Gap])
                .chain(button(LEGACY_LAST_PAGE))
                .collect();
        };

        if last <= MAX_BUTTONS {
            return (1..=last).filter_map(button).collect();
        }

        let (start, end) = if current <= 4 {
            (2, 5)
        } else if current >= last - 3 {
            (last - 4, last - 1)
        } else {
            (current - 1, current + 1)
        };

        let mut buttons = Vec::with_capacity(MAX_BUTTONS as usize);
        buttons.extend(button(1));
        if start > 2 {
            buttons.push(PageButton::Gap);
        }
        buttons.extend((start..=end).filter_map(button));
        if end < last - 1 {
            buttons.push(PageButton::Gap);
        }
        buttons.extend(button(last));
        buttons
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn page(n: u32) -> PageNumber {
        PageNumber::new(n).unwrap()
    }

    fn labels(buttons: &[PageButton]) -> Vec<String> {
        buttons
            .iter()
            .map(|button| match button {
                PageButton::Page { number, current } if *current => format!("[{number}]"),
                PageButton::Page { number, .. } => number.to_string(),
                PageButton::Gap => "...".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_next_is_unbounded_without_total() {
        let mut pagination = Pagination::default();
        for _ in 0..20 {
            assert!(pagination.next());
        }
        assert_eq!(pagination.page().get(), 21);
        assert_eq!(pagination.offset(), 200);
    }

    #[test]
    fn test_next_is_clamped_at_known_last_page() {
        let mut pagination = Pagination::default();
        pagination.set_last_page(Some(page(2)));

        assert!(pagination.next());
        assert!(!pagination.next());
        assert_eq!(pagination.page(), page(2));
    }

    #[test]
    fn test_prev_on_first_page_does_nothing() {
        let mut pagination = Pagination::default();
        assert!(!pagination.prev());
        assert_eq!(pagination.page(), PageNumber::FIRST);
    }

    #[test]
    fn test_go_to_same_page_is_not_a_change() {
        let mut pagination = Pagination::default();
        assert!(pagination.go_to(page(4)));
        assert!(!pagination.go_to(page(4)));
    }

    #[test]
    fn test_reset_forgets_last_page() {
        let mut pagination = Pagination::default();
        pagination.set_last_page(Some(page(9)));
        pagination.go_to(page(5));

        assert!(pagination.reset());
        assert_eq!(pagination.last_page(), None);
        assert_eq!(pagination.page(), PageNumber::FIRST);
    }

    #[test]
    fn test_legacy_button_run() {
        let pagination = Pagination::default();
        assert_eq!(
            labels(&pagination.buttons()),
            ["[1]", "2", "3", "4", "5", "6", "...", "12"]
        );
    }

    #[test]
    fn test_short_button_run_lists_every_page() {
        let mut pagination = Pagination::default();
        pagination.set_last_page(Some(page(3)));
        pagination.go_to(page(2));

        assert_eq!(labels(&pagination.buttons()), ["1", "[2]", "3"]);
    }

    #[test]
    fn test_long_button_runs() {
        let mut pagination = Pagination::default();
        pagination.set_last_page(Some(page(20)));

        assert_eq!(
            labels(&pagination.buttons()),
            ["[1]", "2", "3", "4", "5", "...", "20"]
        );

        pagination.go_to(page(10));
        assert_eq!(
            labels(&pagination.buttons()),
            ["1", "...", "9", "[10]", "11", "...", "20"]
        );

        pagination.go_to(page(19));
        assert_eq!(
            labels(&pagination.buttons()),
            ["1", "...", "16", "17", "18", "[19]", "20"]
        );
    }

    proptest! {
        #[test]
        fn prop_known_runs_stay_in_range(last in 1u32..500, current in 1u32..500) {
            let mut pagination = Pagination::default();
            pagination.set_last_page(PageNumber::new(last));
            pagination.go_to(page(current.min(last)));

            let buttons = pagination.buttons();
            prop_assert!(buttons.len() <= MAX_BUTTONS as usize);
            for button in buttons {
                if let PageButton::Page { number, .. } = button {
                    prop_assert!(number.get() >= 1 && number.get() <= last);
                }
            }
        }

        #[test]
        fn prop_navigation_never_leaves_valid_pages(steps in prop::collection::vec(0u8..3, 0..100)) {
            let mut pagination = Pagination::default();
            for step in steps {
                match step {
                    0 => { pagination.next(); }
                    1 => { pagination.prev(); }
                    _ => { pagination.reset(); }
                }
                prop_assert!(pagination.page().get() >= 1);
                prop_assert_eq!(
                    pagination.offset(),
                    u64::from(pagination.page().get() - 1) * 10
                );
            }
        }
    }
}
