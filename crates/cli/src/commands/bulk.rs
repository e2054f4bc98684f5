//! One-shot bulk actions.
//!
//! # Usage
//!
//! ```bash
//! order-desk duplicate 3 7
//! order-desk delete 12
//! order-desk set-status Completed 1 4
//! ```

use std::io::Write;
use std::sync::Arc;

use order_desk_admin::OrderBackend;
use order_desk_admin::orders::{BulkAction, BulkActionExecutor, BulkRequest, BulkSummary};
use order_desk_core::OrderId;

use crate::error::CliError;

/// Run `action` against `ids` and print what happened.
///
/// # Errors
///
/// Returns `CliError::Bulk` if the store rejects the request.
pub async fn run(
    backend: Arc<dyn OrderBackend>,
    action: BulkAction,
    ids: Vec<OrderId>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let Some(request) = BulkRequest::new(action, ids) else {
        writeln!(out, "No orders given, nothing to do")?;
        return Ok(());
    };

    let receipt = BulkActionExecutor::new(backend).execute(&request).await?;

    let summary = BulkSummary {
        action: request.action().clone(),
        count: request.ids().len(),
        receipt,
    };
    writeln!(out, "{summary}")?;

    if let Some(created) = &summary.receipt.duplicated_ids {
        let created: Vec<String> = created.iter().map(ToString::to_string).collect();
        writeln!(out, "New order ids: {}", created.join(", "))?;
    }

    Ok(())
}
