//! Page addressing for offset-paginated order lists.
//!
//! Page numbers are 1-based and page sizes are positive, both enforced by
//! [`NonZeroU32`], so the derived zero-based offset can never be negative.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::order::OrderRecord;

/// A 1-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Create a page number, returning `None` for zero.
    #[must_use]
    pub const fn new(page: u32) -> Option<Self> {
        match NonZeroU32::new(page) {
            Some(page) => Some(Self(page)),
            None => None,
        }
    }

    /// Get the underlying 1-based value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The following page, saturating at `u32::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The preceding page, floored at the first page.
    #[must_use]
    pub const fn prev(self) -> Self {
        match Self::new(self.get() - 1) {
            Some(page) => page,
            None => Self::FIRST,
        }
    }

    /// Zero-based row offset of this page: `(page - 1) * size`.
    #[must_use]
    pub const fn offset(self, size: PageSize) -> u64 {
        (self.get() as u64 - 1) * size.get() as u64
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of rows requested per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageSize(NonZeroU32);

impl PageSize {
    /// Rows per page in the order list.
    pub const ORDER_LIST: Self = Self(NonZeroU32::new(10).expect("10 is non-zero"));

    /// Upper bound of the statistics sample.
    pub const STATS_SAMPLE: Self = Self(NonZeroU32::new(1000).expect("1000 is non-zero"));

    /// Create a page size, returning `None` for zero.
    #[must_use]
    pub const fn new(size: u32) -> Option<Self> {
        match NonZeroU32::new(size) {
            Some(size) => Some(Self(size)),
            None => None,
        }
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Number of pages needed to show `total` rows (at least one).
    #[must_use]
    pub const fn page_count(self, total: u64) -> u32 {
        let size = self.get() as u64;
        let pages = total.div_ceil(size);
        if pages == 0 {
            1
        } else if pages > u32::MAX as u64 {
            u32::MAX
        } else {
            #[allow(clippy::cast_possible_truncation)] // bounded by the check above
            let pages = pages as u32;
            pages
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One fetched slice of the order collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPage {
    /// Which page this is.
    pub number: PageNumber,
    /// Requested page size.
    pub size: PageSize,
    /// Rows on this page, in backend order. At most `size` long.
    pub orders: Vec<OrderRecord>,
    /// Total rows matching the query, when the backend reports it.
    pub total: Option<u64>,
}

impl OrderPage {
    /// An empty page, substituted for display when a fetch fails.
    #[must_use]
    pub const fn empty(number: PageNumber, size: PageSize) -> Self {
        Self {
            number,
            size,
            orders: Vec::new(),
            total: None,
        }
    }

    /// Zero-based offset of the first row.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.number.offset(self.size)
    }

    /// Whether the page has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Last page number, derivable only from an authoritative total.
    #[must_use]
    pub fn last_page(&self) -> Option<PageNumber> {
        self.total
            .and_then(|total| PageNumber::new(self.size.page_count(total)))
    }
}
