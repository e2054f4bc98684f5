//! Order Desk CLI - order list console and bulk tools.
//!
//! # Usage
//!
//! ```bash
//! # Interactive order list
//! order-desk browse
//!
//! # Same, against the built-in sample store
//! order-desk --demo browse
//!
//! # One page, optionally filtered
//! order-desk list --page 2 --status Pending
//!
//! # Summary counts
//! order-desk stats
//!
//! # Bulk actions
//! order-desk duplicate 3 7
//! order-desk delete 12 13
//! order-desk set-status Completed 1 4
//! ```
//!
//! Configuration is read from the environment (see `order_desk_admin::config`);
//! `--api-base` overrides `ORDER_DESK_API_BASE`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use order_desk_admin::orders::BulkAction;
use order_desk_admin::{
    HttpOrderBackend, InMemoryOrderBackend, LogFormat, OrderBackend, OrderDeskConfig,
    SentryConfig,
};
use order_desk_core::{OrderId, OrderStatus, PageNumber};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod display;
mod error;

#[derive(Parser)]
#[command(name = "order-desk")]
#[command(author, version, about = "Order Desk order list tools")]
struct Cli {
    /// Order store base URL (overrides `ORDER_DESK_API_BASE`)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Use the built-in sample store instead of the HTTP API
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive order list console
    Browse,
    /// Print one page of orders
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Only show orders with this status
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Print order statistics
    Stats,
    /// Delete orders
    Delete {
        /// Order ids
        #[arg(required = true)]
        ids: Vec<OrderId>,
    },
    /// Duplicate orders
    Duplicate {
        /// Order ids
        #[arg(required = true)]
        ids: Vec<OrderId>,
    },
    /// Set the status of orders
    SetStatus {
        /// New status (e.g., `Completed`)
        status: String,

        /// Order ids
        #[arg(required = true)]
        ids: Vec<OrderId>,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &SentryConfig) -> sentry::ClientInitGuard {
    sentry::init((
        config.dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config.environment.clone().map(std::borrow::Cow::Owned),
            sample_rate: config.sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ))
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Install the tracing subscriber. Logs go to stderr so stdout stays clean.
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "order_desk_admin=warn,order_desk_cli=info".into());

    let json = format == LogFormat::Json;
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = OrderDeskConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config
        .as_ref()
        .ok()
        .and_then(|config| config.sentry.as_ref())
        .map(init_sentry);

    init_tracing(config.as_ref().map_or(LogFormat::Text, |config| config.log_format));

    let result: Result<(), Box<dyn std::error::Error>> = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: OrderDeskConfig) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.api_base {
        Some(api_base) => config.with_api_base(api_base)?,
        None => config,
    };

    let backend: Arc<dyn OrderBackend> = if cli.demo {
        tracing::info!("Using in-memory sample store");
        Arc::new(InMemoryOrderBackend::with_sample_orders())
    } else {
        tracing::debug!(api_base = %config.api_base, "Using order store API");
        Arc::new(HttpOrderBackend::new(&config)?)
    };

    let mut out = std::io::stdout();

    match cli.command {
        Commands::Browse => {
            commands::browse::run(backend, tokio::io::stdin(), &mut out).await?;
        }
        Commands::List { page, status } => {
            let page = PageNumber::new(page).unwrap_or(PageNumber::FIRST);
            let status = status.as_deref().map(OrderStatus::from_user_input);
            commands::list::run(backend, page, status, &mut out).await?;
        }
        Commands::Stats => commands::stats::run(backend, &mut out).await?,
        Commands::Delete { ids } => {
            commands::bulk::run(backend, BulkAction::Delete, ids, &mut out).await?;
        }
        Commands::Duplicate { ids } => {
            commands::bulk::run(backend, BulkAction::Duplicate, ids, &mut out).await?;
        }
        Commands::SetStatus { status, ids } => {
            let action = BulkAction::UpdateStatus(OrderStatus::from_user_input(&status));
            commands::bulk::run(backend, action, ids, &mut out).await?;
        }
    }

    out.flush()?;
    Ok(())
}
