//! The order list state machine.
//!
//! [`OrderListState`] owns the displayed page, the selection, pagination and
//! the stats snapshot. It never performs I/O: [`OrderListState::dispatch`]
//! turns a user [`Action`] into [`Command`]s, the driver runs them, and
//! [`OrderListState::resolve`] folds each [`Outcome`] back in.
//!
//! Page and stats fetches each carry a [`RequestToken`]. Only the response to
//! the latest token of its category is applied; older responses are dropped
//! when they land.

use core::fmt;

use order_desk_core::{
    OrderId, OrderPage, OrderRecord, OrderStatus, PageNumber, PageSize, StatsSnapshot,
};
use tracing::{debug, info, warn};

use super::bulk::{BulkAction, BulkRequest};
use super::pagination::Pagination;
use super::selection::SelectionSet;
use crate::backend::BulkReceipt;
use crate::error::{BulkActionError, FetchError, ViewError};

/// Monotonic sequence number of a fetch within its category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Load state of one fetch stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
}

/// A page fetch to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub token: RequestToken,
    pub page: PageNumber,
    pub size: PageSize,
    pub status: Option<OrderStatus>,
}

/// A stats fetch to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsRequest {
    pub token: RequestToken,
}

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Load the first page and the stats. Later mounts are ignored.
    Mount,
    NextPage,
    PrevPage,
    GoToPage(PageNumber),
    Toggle(OrderId),
    ToggleAll,
    ClearSelection,
    DeleteSelected,
    DuplicateSelected,
    UpdateStatusSelected(OrderStatus),
    /// Show only orders with this status (`None` shows all).
    SetStatusFilter(Option<OrderStatus>),
    /// Re-fetch the current page.
    Refresh,
    /// Re-issue whichever fetches last failed.
    Retry,
    DismissError,
}

/// I/O requested by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchPage(PageRequest),
    FetchStats(StatsRequest),
    RunBulk(BulkRequest),
}

/// Result of a [`Command`], fed back through [`OrderListState::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    PageLoaded {
        request: PageRequest,
        result: Result<OrderPage, FetchError>,
    },
    StatsLoaded {
        request: StatsRequest,
        result: Result<StatsSnapshot, FetchError>,
    },
    BulkFinished {
        request: BulkRequest,
        result: Result<BulkReceipt, BulkActionError>,
    },
}

/// What the last successful bulk action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkSummary {
    pub action: BulkAction,
    /// Number of ids sent.
    pub count: usize,
    pub receipt: BulkReceipt,
}

impl fmt::Display for BulkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            BulkAction::Delete => {
                let deleted = self.receipt.deleted.unwrap_or(self.count as u64);
                write!(f, "Deleted {deleted} orders")
            }
            BulkAction::Duplicate => {
                let created = self
                    .receipt
                    .duplicated_ids
                    .as_ref()
                    .map_or(self.count, Vec::len);
                write!(f, "Duplicated {created} orders")
            }
            BulkAction::UpdateStatus(status) => {
                let updated = self.receipt.updated.unwrap_or(self.count as u64);
                write!(f, "Marked {updated} orders as {status}")
            }
        }
    }
}

/// Everything the order list shows, mutated only through `dispatch`/`resolve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderListState {
    pagination: Pagination,
    status_filter: Option<OrderStatus>,
    page: OrderPage,
    page_status: LoadStatus,
    page_failed: bool,
    page_token: RequestToken,
    stats: Option<StatsSnapshot>,
    stats_status: LoadStatus,
    stats_failed: bool,
    stats_token: RequestToken,
    selection: SelectionSet,
    bulk_in_flight: Option<BulkRequest>,
    last_bulk: Option<BulkSummary>,
    error: Option<ViewError>,
    mounted: bool,
}

impl Default for OrderListState {
    fn default() -> Self {
        Self::new(PageSize::ORDER_LIST)
    }
}

impl OrderListState {
    /// Unmounted state showing an empty first page.
    #[must_use]
    pub const fn new(size: PageSize) -> Self {
        Self {
            pagination: Pagination::new(size),
            status_filter: None,
            page: OrderPage::empty(PageNumber::FIRST, size),
            page_status: LoadStatus::Idle,
            page_failed: false,
            page_token: RequestToken(0),
            stats: None,
            stats_status: LoadStatus::Idle,
            stats_failed: false,
            stats_token: RequestToken(0),
            selection: SelectionSet::new(),
            bulk_in_flight: None,
            last_bulk: None,
            error: None,
            mounted: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// The page being shown or loaded.
    #[must_use]
    pub const fn current_page(&self) -> PageNumber {
        self.pagination.page()
    }

    /// The most recently committed page.
    #[must_use]
    pub const fn page(&self) -> &OrderPage {
        &self.page
    }

    #[must_use]
    pub fn orders(&self) -> &[OrderRecord] {
        &self.page.orders
    }

    /// Ids of the displayed rows, in display order.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<OrderId> {
        self.page.orders.iter().map(|order| order.id).collect()
    }

    #[must_use]
    pub const fn page_status(&self) -> LoadStatus {
        self.page_status
    }

    #[must_use]
    pub const fn stats(&self) -> Option<&StatsSnapshot> {
        self.stats.as_ref()
    }

    #[must_use]
    pub const fn stats_status(&self) -> LoadStatus {
        self.stats_status
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    #[must_use]
    pub const fn status_filter(&self) -> Option<&OrderStatus> {
        self.status_filter.as_ref()
    }

    #[must_use]
    pub const fn bulk_in_flight(&self) -> Option<&BulkRequest> {
        self.bulk_in_flight.as_ref()
    }

    #[must_use]
    pub const fn last_bulk(&self) -> Option<&BulkSummary> {
        self.last_bulk.as_ref()
    }

    /// The error banner, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    /// Whether Retry would re-issue anything.
    #[must_use]
    pub const fn can_retry(&self) -> bool {
        self.page_failed || self.stats_failed
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether any fetch or bulk action is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self.page_status, LoadStatus::Loading)
            || matches!(self.stats_status, LoadStatus::Loading)
            || self.bulk_in_flight.is_some()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Apply a user action, returning the I/O it requires.
    pub fn dispatch(&mut self, action: Action) -> Vec<Command> {
        debug!(?action, page = %self.current_page(), "Order list action");

        match action {
            Action::Mount => {
                if self.mounted {
                    debug!("Order list already mounted");
                    return Vec::new();
                }
                self.mounted = true;
                vec![self.fetch_page(), self.fetch_stats()]
            }
            Action::NextPage => {
                let changed = self.pagination.next();
                self.navigated(changed)
            }
            Action::PrevPage => {
                let changed = self.pagination.prev();
                self.navigated(changed)
            }
            Action::GoToPage(page) => {
                let changed = self.pagination.go_to(page);
                self.navigated(changed)
            }
            Action::Toggle(id) => {
                if self.page.orders.iter().any(|order| order.id == id) {
                    self.selection.toggle(id);
                } else {
                    debug!(%id, "Ignoring toggle for order not on this page");
                }
                Vec::new()
            }
            Action::ToggleAll => {
                let visible = self.visible_ids();
                self.selection.toggle_all(&visible);
                Vec::new()
            }
            Action::ClearSelection => {
                self.selection.clear();
                Vec::new()
            }
            Action::DeleteSelected => self.start_bulk(BulkAction::Delete),
            Action::DuplicateSelected => self.start_bulk(BulkAction::Duplicate),
            Action::UpdateStatusSelected(status) => {
                self.start_bulk(BulkAction::UpdateStatus(status))
            }
            Action::SetStatusFilter(filter) => {
                if filter == self.status_filter {
                    return Vec::new();
                }
                info!(filter = ?filter, "Order status filter changed");
                self.status_filter = filter;
                self.pagination.reset();
                self.selection.clear();
                vec![self.fetch_page()]
            }
            Action::Refresh => vec![self.fetch_page()],
            Action::Retry => {
                let mut commands = Vec::new();
                if self.page_failed {
                    commands.push(self.fetch_page());
                }
                if self.stats_failed {
                    commands.push(self.fetch_stats());
                }
                if !commands.is_empty() && self.error.as_ref().is_some_and(ViewError::is_retryable)
                {
                    self.error = None;
                }
                commands
            }
            Action::DismissError => {
                self.error = None;
                Vec::new()
            }
        }
    }

    /// Fold a finished command back in, returning any follow-up I/O.
    pub fn resolve(&mut self, outcome: Outcome) -> Vec<Command> {
        match outcome {
            Outcome::PageLoaded { request, result } => self.page_loaded(request, result),
            Outcome::StatsLoaded { request, result } => {
                self.stats_loaded(request, result);
                Vec::new()
            }
            Outcome::BulkFinished { request, result } => self.bulk_finished(request, result),
        }
    }

    fn navigated(&mut self, changed: bool) -> Vec<Command> {
        if !changed {
            return Vec::new();
        }
        self.selection.clear();
        vec![self.fetch_page()]
    }

    fn fetch_page(&mut self) -> Command {
        self.page_token = self.page_token.next();
        self.page_status = LoadStatus::Loading;

        Command::FetchPage(PageRequest {
            token: self.page_token,
            page: self.pagination.page(),
            size: self.pagination.size(),
            status: self.status_filter.clone(),
        })
    }

    fn fetch_stats(&mut self) -> Command {
        self.stats_token = self.stats_token.next();
        self.stats_status = LoadStatus::Loading;

        Command::FetchStats(StatsRequest {
            token: self.stats_token,
        })
    }

    fn start_bulk(&mut self, action: BulkAction) -> Vec<Command> {
        if let Some(in_flight) = &self.bulk_in_flight {
            warn!(
                in_flight = %in_flight.action(),
                requested = %action,
                "Bulk action already in progress, ignoring"
            );
            return Vec::new();
        }

        let Some(request) = BulkRequest::new(action, self.selection.ids()) else {
            debug!("No orders selected, nothing to do");
            return Vec::new();
        };

        info!(
            action = request.action().key(),
            count = request.ids().len(),
            "Starting bulk action"
        );
        self.bulk_in_flight = Some(request.clone());
        vec![Command::RunBulk(request)]
    }

    fn page_loaded(
        &mut self,
        request: PageRequest,
        result: Result<OrderPage, FetchError>,
    ) -> Vec<Command> {
        if request.token != self.page_token {
            debug!(
                token = %request.token,
                latest = %self.page_token,
                "Discarding stale page response"
            );
            return Vec::new();
        }

        match result {
            Ok(page) => {
                let last = page.last_page();
                self.pagination.set_last_page(last);

                if let Some(last) = last.filter(|last| page.is_empty() && request.page > *last) {
                    info!(
                        requested = %request.page,
                        last = %last,
                        "Page is past the end, showing last page"
                    );
                    self.pagination.go_to(last);
                    self.selection.clear();
                    return vec![self.fetch_page()];
                }

                self.commit_page(page);
                self.page_failed = false;
                if matches!(self.error, Some(ViewError::PageFetch { .. })) {
                    self.error = None;
                }
            }
            Err(source) => {
                warn!(page = %request.page, error = %source, "Showing empty page after fetch failure");
                self.commit_page(OrderPage::empty(request.page, request.size));
                self.page_failed = true;
                self.error = Some(ViewError::PageFetch {
                    page: request.page,
                    source,
                });
            }
        }

        Vec::new()
    }

    fn commit_page(&mut self, page: OrderPage) {
        self.page = page;
        let visible = self.visible_ids();
        self.selection.retain(&visible);
        self.page_status = LoadStatus::Loaded;
    }

    fn stats_loaded(&mut self, request: StatsRequest, result: Result<StatsSnapshot, FetchError>) {
        if request.token != self.stats_token {
            debug!(
                token = %request.token,
                latest = %self.stats_token,
                "Discarding stale stats response"
            );
            return;
        }

        self.stats_status = LoadStatus::Loaded;
        match result {
            Ok(stats) => {
                self.stats = Some(stats);
                self.stats_failed = false;
                if matches!(self.error, Some(ViewError::StatsFetch { .. })) {
                    self.error = None;
                }
            }
            Err(source) => {
                warn!(error = %source, "Order stats unavailable");
                self.stats_failed = true;
                self.error = Some(ViewError::StatsFetch { source });
            }
        }
    }

    fn bulk_finished(
        &mut self,
        request: BulkRequest,
        result: Result<BulkReceipt, BulkActionError>,
    ) -> Vec<Command> {
        if self.bulk_in_flight.as_ref() != Some(&request) {
            warn!(action = request.action().key(), "Ignoring result of unknown bulk request");
            return Vec::new();
        }
        self.bulk_in_flight = None;

        match result {
            Ok(receipt) => {
                self.selection.clear();
                if matches!(self.error, Some(ViewError::BulkAction { .. })) {
                    self.error = None;
                }
                let count = request.ids().len();
                self.last_bulk = Some(BulkSummary {
                    action: request.action().clone(),
                    count,
                    receipt,
                });
                vec![self.fetch_page()]
            }
            Err(source) => {
                warn!(
                    action = request.action().key(),
                    count = request.ids().len(),
                    error = %source,
                    "Bulk action failed, keeping selection"
                );
                self.error = Some(ViewError::BulkAction {
                    action: request.action().to_string(),
                    count: request.ids().len(),
                    source,
                });
                Vec::new()
            }
        }
    }
}
