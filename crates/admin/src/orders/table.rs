//! Display models for the order list.
//!
//! Everything here is derived from an [`OrderListState`] and formatted for a
//! front end to print as-is.

use order_desk_core::{OrderRecord, OrderStatus, StatsSnapshot};

use super::pagination::PageButton;
use super::state::{LoadStatus, OrderListState};

/// Semantic color of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Warning,
    Success,
    Danger,
}

impl BadgeTone {
    /// CSS class for the badge.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Warning => "badge badge-warning",
            Self::Success => "badge badge-success",
            Self::Danger => "badge badge-destructive",
        }
    }
}

/// Badge tone for an order status.
#[must_use]
pub const fn status_tone(status: &OrderStatus) -> BadgeTone {
    match status {
        OrderStatus::Pending => BadgeTone::Warning,
        OrderStatus::Completed => BadgeTone::Success,
        OrderStatus::Refunded | OrderStatus::Other(_) => BadgeTone::Danger,
    }
}

/// One formatted table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRowView {
    pub id: i64,
    pub order_number: String,
    pub customer_name: String,
    pub customer_avatar: Option<String>,
    /// Order date (e.g., "2026-01-10 10:00").
    pub order_date: String,
    pub status: String,
    pub status_tone: BadgeTone,
    pub payment_status: String,
    /// Total formatted (e.g., "$120.50").
    pub total: String,
    pub selected: bool,
}

impl OrderRowView {
    fn new(order: &OrderRecord, selected: bool) -> Self {
        Self {
            id: order.id.as_i64(),
            order_number: order.order_number.clone(),
            customer_name: order.customer_name.clone(),
            customer_avatar: order.customer_avatar.clone(),
            order_date: order.order_date.display_short(),
            status: order.status.label().to_string(),
            status_tone: status_tone(&order.status),
            payment_status: order.payment_status.clone(),
            total: order.total().display(),
            selected,
        }
    }
}

/// A labelled count above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: u64,
}

/// Summary cards in display order.
#[must_use]
pub fn stat_cards(stats: &StatsSnapshot) -> [StatCard; 4] {
    [
        StatCard {
            label: "Total Orders This Month",
            value: stats.total,
        },
        StatCard {
            label: "Pending Orders",
            value: stats.pending,
        },
        StatCard {
            label: "Shipped Orders",
            value: stats.shipped,
        },
        StatCard {
            label: "Refunded Orders",
            value: stats.refunded,
        },
    ]
}

/// The bar shown while rows are selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionBar {
    /// e.g. "2 Selected".
    pub label: String,
    pub count: usize,
    /// Whether a bulk action is running (buttons disabled).
    pub busy: bool,
}

/// Everything the order table displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTableView {
    pub rows: Vec<OrderRowView>,
    /// Header checkbox state.
    pub all_selected: bool,
    pub loading: bool,
    /// e.g. "Showing 11-20 of 42".
    pub summary: String,
    pub page_buttons: Vec<PageButton>,
    pub has_prev: bool,
    pub has_next: bool,
    pub selection_bar: Option<SelectionBar>,
    /// Error banner text.
    pub banner: Option<String>,
    pub can_retry: bool,
    /// Result of the last bulk action.
    pub notice: Option<String>,
    pub stats: Option<[StatCard; 4]>,
    pub status_filter: Option<String>,
}

impl OrderTableView {
    /// Build the view model for `state`.
    #[must_use]
    pub fn from_state(state: &OrderListState) -> Self {
        let selection = state.selection();
        let rows: Vec<OrderRowView> = state
            .orders()
            .iter()
            .map(|order| OrderRowView::new(order, selection.is_selected(order.id)))
            .collect();

        let selection_bar = (!selection.is_empty()).then(|| SelectionBar {
            label: format!("{} Selected", selection.size()),
            count: selection.size(),
            busy: state.bulk_in_flight().is_some(),
        });

        Self {
            all_selected: selection.covers(&state.visible_ids()),
            loading: state.page_status() == LoadStatus::Loading,
            summary: summary(state),
            page_buttons: state.pagination().buttons(),
            has_prev: state.pagination().has_prev(),
            has_next: state.pagination().has_next(),
            selection_bar,
            banner: state.error().map(ToString::to_string),
            can_retry: state.can_retry(),
            notice: state.last_bulk().map(ToString::to_string),
            stats: state.stats().map(stat_cards),
            status_filter: state.status_filter().map(|status| status.label().to_string()),
            rows,
        }
    }
}

/// "Showing A-B of N", where N is the reported total or else the row count.
fn summary(state: &OrderListState) -> String {
    let page = state.page();
    let rows = page.orders.len() as u64;
    let offset = page.offset();
    let first = if rows == 0 { 0 } else { offset + 1 };
    let of = page.total.unwrap_or(rows);

    format!("Showing {first}-{} of {of}", offset + rows)
}
