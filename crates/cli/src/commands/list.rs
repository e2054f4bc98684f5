//! One-shot page listing.
//!
//! # Usage
//!
//! ```bash
//! order-desk list --page 2
//! order-desk list --status Pending
//! ```

use std::io::Write;
use std::sync::Arc;

use order_desk_admin::OrderBackend;
use order_desk_admin::orders::{Action, LoadStatus, OrderListView, OrderTableView};
use order_desk_core::{OrderStatus, PageNumber};

use crate::display;
use crate::error::CliError;

/// Fetch one page and print it.
///
/// # Errors
///
/// Returns `CliError::View` if the page could not be loaded.
pub async fn run(
    backend: Arc<dyn OrderBackend>,
    page: PageNumber,
    status: Option<OrderStatus>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut view = OrderListView::new(backend);

    view.apply(Action::SetStatusFilter(status)).await;
    view.apply(Action::GoToPage(page)).await;
    if view.state().page_status() == LoadStatus::Idle {
        view.apply(Action::Refresh).await;
    }

    let state = view.state();
    display::render_table(&OrderTableView::from_state(state), out)?;

    match state.error() {
        Some(error) => Err(error.clone().into()),
        None => Ok(()),
    }
}
