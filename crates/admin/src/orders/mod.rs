//! The administrative order list.
//!
//! Leaf components ([`PageFetcher`], [`StatsAggregator`], [`SelectionSet`],
//! [`Pagination`], [`BulkActionExecutor`]) are composed by the
//! [`OrderListState`] reducer and driven by [`OrderListView`].

mod bulk;
mod fetcher;
mod pagination;
mod selection;
mod state;
mod stats;
mod table;
mod view;

pub use bulk::{BulkAction, BulkActionExecutor, BulkRequest};
pub use fetcher::PageFetcher;
pub use pagination::{PageButton, Pagination};
pub use selection::SelectionSet;
pub use state::{
    Action, BulkSummary, Command, LoadStatus, OrderListState, Outcome, PageRequest,
    RequestToken, StatsRequest,
};
pub use stats::StatsAggregator;
pub use table::{
    BadgeTone, OrderRowView, OrderTableView, SelectionBar, StatCard, stat_cards, status_tone,
};
pub use view::{OrderListHandle, OrderListView};
