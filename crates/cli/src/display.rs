//! Plain-text rendering of the order list.

use std::io::{self, Write};

use order_desk_admin::orders::{BadgeTone, OrderRowView, OrderTableView, PageButton, StatCard};

const RULE_WIDTH: usize = 96;

/// Write the full order list: stats, banner, rows, footer.
///
/// # Errors
///
/// Returns any error from `out`.
pub fn render_table(view: &OrderTableView, out: &mut impl Write) -> io::Result<()> {
    if let Some(stats) = &view.stats {
        render_stats(stats, out)?;
        writeln!(out)?;
    }

    if let Some(banner) = &view.banner {
        writeln!(out, "! {banner}")?;
        if view.can_retry {
            writeln!(out, "  (type `retry` to try again, `dismiss` to hide)")?;
        }
    }
    if let Some(notice) = &view.notice {
        writeln!(out, "* {notice}")?;
    }
    if let Some(filter) = &view.status_filter {
        writeln!(out, "Filter: status = {filter}")?;
    }

    let header_box = if view.all_selected { "[x]" } else { "[ ]" };
    writeln!(
        out,
        "{header_box} {:>5}  {:<14} {:<18} {:<16} {:<12} {:<8} {:>10}",
        "ID", "ORDER", "CUSTOMER", "DATE", "STATUS", "PAYMENT", "TOTAL"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    if view.rows.is_empty() {
        let message = if view.loading { "Loading..." } else { "No orders" };
        writeln!(out, "    {message}")?;
    }
    for row in &view.rows {
        render_row(row, out)?;
    }

    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    writeln!(out, "{}    {}", view.summary, page_run(view))?;

    if let Some(bar) = &view.selection_bar {
        let suffix = if bar.busy { " (working...)" } else { "" };
        writeln!(
            out,
            "{}: duplicate | delete | status <STATUS> | clear{suffix}",
            bar.label
        )?;
    }

    Ok(())
}

fn render_row(row: &OrderRowView, out: &mut impl Write) -> io::Result<()> {
    let check = if row.selected { "[x]" } else { "[ ]" };
    writeln!(
        out,
        "{check} {:>5}  {:<14} {:<18} {:<16} {:<12} {:<8} {:>10}",
        row.id,
        truncate(&row.order_number, 14),
        truncate(&row.customer_name, 18),
        row.order_date,
        badge(&row.status, row.status_tone),
        truncate(&row.payment_status, 8),
        row.total
    )
}

/// Status label with a tone marker, since a terminal has no badge colors.
fn badge(status: &str, tone: BadgeTone) -> String {
    let marker = match tone {
        BadgeTone::Warning => '~',
        BadgeTone::Success => '+',
        BadgeTone::Danger => '!',
    };
    truncate(&format!("{marker}{status}"), 12)
}

fn page_run(view: &OrderTableView) -> String {
    let mut parts = Vec::with_capacity(view.page_buttons.len() + 2);
    parts.push(if view.has_prev { "<" } else { " " }.to_string());
    parts.extend(view.page_buttons.iter().map(|button| match button {
        PageButton::Page {
            number,
            current: true,
        } => format!("[{number}]"),
        PageButton::Page { number, .. } => number.to_string(),
        PageButton::Gap => "...".to_string(),
    }));
    parts.push(if view.has_next { ">" } else { " " }.to_string());
    parts.join(" ")
}

/// Write the four stat cards on one line.
///
/// # Errors
///
/// Returns any error from `out`.
pub fn render_stats(cards: &[StatCard], out: &mut impl Write) -> io::Result<()> {
    let line = cards
        .iter()
        .map(|card| format!("{}: {}", card.label, card.value))
        .collect::<Vec<_>>()
        .join("  |  ");
    writeln!(out, "{line}")
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut shortened: String = value.chars().take(width.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}
