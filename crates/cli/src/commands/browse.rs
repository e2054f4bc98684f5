//! Interactive order list console.
//!
//! Runs the order list view on a background task and reads one command per
//! line from stdin. The table is redrawn after each command settles.
//!
//! # Commands
//!
//! - `next`, `prev`, `goto <N>` - navigate
//! - `toggle <ID>...`, `all`, `clear` - select rows
//! - `delete`, `duplicate`, `status <STATUS>` - bulk actions on the selection
//! - `filter <STATUS>` / `filter all` - filter by status
//! - `refresh`, `retry`, `dismiss` - reload, recover, hide the error banner
//! - `help`, `quit`

use std::io::Write;
use std::sync::Arc;

use order_desk_admin::OrderBackend;
use order_desk_admin::orders::{Action, OrderListView, OrderTableView};
use order_desk_core::{OrderId, OrderStatus, PageNumber};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::display;
use crate::error::CliError;

const HELP: &str = "\
Commands:
  next | prev | goto <N>        change page
  toggle <ID>... | all | clear  select rows
  delete | duplicate            run on selected rows
  status <STATUS>               set status of selected rows
  filter <STATUS> | filter all  show one status / everything
  refresh | retry | dismiss     reload / retry failed loads / hide error
  help | quit";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Actions(Vec<Action>),
    Help,
    Quit,
    /// Blank line: redraw.
    Redraw,
}

/// Why a console line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command `{0}` (type `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("Invalid page `{0}`: pages start at 1")]
    InvalidPage(String),
    #[error("Invalid order id `{0}`")]
    InvalidId(String),
}

/// Parse one console line.
///
/// # Errors
///
/// Returns `ParseError` for unknown commands or bad arguments.
pub fn parse_command(line: &str) -> Result<ConsoleCommand, ParseError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(ConsoleCommand::Redraw);
    };
    let rest: Vec<&str> = words.collect();
    let single = |action: Action| -> Result<ConsoleCommand, ParseError> {
        Ok(ConsoleCommand::Actions(vec![action]))
    };

    match command.to_ascii_lowercase().as_str() {
        "next" | "n" => single(Action::NextPage),
        "prev" | "p" => single(Action::PrevPage),
        "goto" | "g" => {
            let raw = rest.first().ok_or(ParseError::MissingArgument("goto"))?;
            let page = raw
                .parse::<u32>()
                .ok()
                .and_then(PageNumber::new)
                .ok_or_else(|| ParseError::InvalidPage((*raw).to_string()))?;
            single(Action::GoToPage(page))
        }
        "toggle" | "t" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument("toggle"));
            }
            rest.iter()
                .map(|raw| {
                    raw.parse::<OrderId>()
                        .map(Action::Toggle)
                        .map_err(|_| ParseError::InvalidId((*raw).to_string()))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ConsoleCommand::Actions)
        }
        "all" => single(Action::ToggleAll),
        "clear" | "close" => single(Action::ClearSelection),
        "delete" => single(Action::DeleteSelected),
        "duplicate" => single(Action::DuplicateSelected),
        "status" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument("status"));
            }
            single(Action::UpdateStatusSelected(OrderStatus::from_user_input(
                &rest.join(" "),
            )))
        }
        "filter" => match rest.as_slice() {
            [] => Err(ParseError::MissingArgument("filter")),
            ["all"] => single(Action::SetStatusFilter(None)),
            words => single(Action::SetStatusFilter(Some(OrderStatus::from_user_input(
                &words.join(" "),
            )))),
        },
        "refresh" | "r" => single(Action::Refresh),
        "retry" => single(Action::Retry),
        "dismiss" => single(Action::DismissError),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "exit" | "q" => Ok(ConsoleCommand::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

/// Run the console until `quit` or end of input.
///
/// # Errors
///
/// Returns `CliError` on I/O failure or if the view task dies.
pub async fn run(
    backend: Arc<dyn OrderBackend>,
    input: impl AsyncRead + Unpin,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut handle = OrderListView::new(backend).spawn();
    let mut lines = BufReader::new(input).lines();

    let state = handle.apply(Action::Mount).await.ok_or(CliError::ViewStopped)?;
    display::render_table(&OrderTableView::from_state(&state), out)?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let actions = match parse_command(&line) {
            Ok(ConsoleCommand::Actions(actions)) => actions,
            Ok(ConsoleCommand::Redraw) => Vec::new(),
            Ok(ConsoleCommand::Help) => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Ok(ConsoleCommand::Quit) => break,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        let mut state = handle.snapshot();
        for action in actions {
            tracing::debug!(?action, "Console action");
            state = handle.apply(action).await.ok_or(CliError::ViewStopped)?;
        }
        display::render_table(&OrderTableView::from_state(&state), out)?;
    }

    let state = handle.shutdown().await.map_err(|_| CliError::ViewStopped)?;
    tracing::info!(
        page = %state.current_page(),
        selected = state.selection().size(),
        "Console closed"
    );

    Ok(())
}
