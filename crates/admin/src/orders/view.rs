//! Async driver for the order list.
//!
//! [`OrderListView`] runs the commands produced by [`OrderListState`] on a
//! single task. Requests overlap freely; nothing is cancelled, and stale
//! responses are dropped by the state's request tokens when they land.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info};

use super::bulk::BulkActionExecutor;
use super::fetcher::PageFetcher;
use super::state::{Action, Command, OrderListState, Outcome};
use super::stats::StatsAggregator;
use crate::backend::OrderBackend;

/// Capacity of the action channel created by [`OrderListView::spawn`].
const ACTION_BUFFER: usize = 32;

/// Order list wired to a backend.
#[derive(Debug)]
pub struct OrderListView {
    state: OrderListState,
    fetcher: PageFetcher,
    stats: StatsAggregator,
    bulk: BulkActionExecutor,
}

impl OrderListView {
    /// Unmounted view over `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn OrderBackend>) -> Self {
        Self::with_state(backend, OrderListState::default())
    }

    /// View starting from an existing state (e.g., a different page size).
    #[must_use]
    pub fn with_state(backend: Arc<dyn OrderBackend>, state: OrderListState) -> Self {
        Self {
            state,
            fetcher: PageFetcher::new(Arc::clone(&backend)),
            stats: StatsAggregator::new(Arc::clone(&backend)),
            bulk: BulkActionExecutor::new(backend),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &OrderListState {
        &self.state
    }

    /// Apply `action` and wait until every request it caused has settled.
    pub async fn apply(&mut self, action: Action) -> &OrderListState {
        let mut in_flight: FuturesUnordered<_> = self
            .state
            .dispatch(action)
            .into_iter()
            .map(|command| self.execute(command))
            .collect();

        while let Some(outcome) = in_flight.next().await {
            for command in self.state.resolve(outcome) {
                in_flight.push(self.execute(command));
            }
        }

        &self.state
    }

    /// Process actions until the channel closes, publishing a snapshot after
    /// every transition.
    ///
    /// Requests still in flight when the channel closes are awaited and
    /// applied before returning the final state.
    pub async fn run(
        mut self,
        mut actions: mpsc::Receiver<Action>,
        snapshots: watch::Sender<OrderListState>,
    ) -> OrderListState {
        let mut in_flight: FuturesUnordered<BoxFuture<'static, Outcome>> = FuturesUnordered::new();
        let mut open = true;

        info!("Order list view started");

        loop {
            tokio::select! {
                action = actions.recv(), if open => match action {
                    Some(action) => {
                        for command in self.state.dispatch(action) {
                            in_flight.push(self.execute(command));
                        }
                    }
                    None => {
                        debug!(in_flight = in_flight.len(), "Action channel closed, draining");
                        open = false;
                    }
                },
                Some(outcome) = in_flight.next(), if !in_flight.is_empty() => {
                    for command in self.state.resolve(outcome) {
                        in_flight.push(self.execute(command));
                    }
                }
                else => break,
            }

            snapshots.send_replace(self.state.clone());
        }

        info!("Order list view stopped");
        self.state
    }

    /// Run the view on a new task.
    #[must_use]
    pub fn spawn(self) -> OrderListHandle {
        let (actions, receiver) = mpsc::channel(ACTION_BUFFER);
        let (sender, snapshots) = watch::channel(self.state.clone());
        let task = tokio::spawn(self.run(receiver, sender));

        OrderListHandle {
            actions,
            snapshots,
            task,
        }
    }

    fn execute(&self, command: Command) -> BoxFuture<'static, Outcome> {
        match command {
            Command::FetchPage(request) => {
                let fetcher = self.fetcher.clone();
                Box::pin(async move {
                    let result = fetcher
                        .fetch_page(request.page, request.size, request.status.clone())
                        .await;
                    Outcome::PageLoaded { request, result }
                })
            }
            Command::FetchStats(request) => {
                let stats = self.stats.clone();
                Box::pin(async move {
                    let result = stats.compute_stats().await;
                    Outcome::StatsLoaded { request, result }
                })
            }
            Command::RunBulk(request) => {
                let bulk = self.bulk.clone();
                Box::pin(async move {
                    let result = bulk.execute(&request).await;
                    Outcome::BulkFinished { request, result }
                })
            }
        }
    }
}

/// Handle to a view running on its own task.
#[derive(Debug)]
pub struct OrderListHandle {
    actions: mpsc::Sender<Action>,
    snapshots: watch::Receiver<OrderListState>,
    task: JoinHandle<OrderListState>,
}

impl OrderListHandle {
    /// Queue an action. Returns `false` if the view has stopped.
    pub async fn send(&self, action: Action) -> bool {
        self.actions.send(action).await.is_ok()
    }

    /// Receiver of state snapshots.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<OrderListState> {
        self.snapshots.clone()
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> OrderListState {
        self.snapshots.borrow().clone()
    }

    /// Wait until the latest snapshot shows no outstanding requests.
    ///
    /// Returns `None` if the view stopped first.
    pub async fn settled(&mut self) -> Option<OrderListState> {
        self.snapshots
            .wait_for(|state| !state.is_busy())
            .await
            .ok()
            .map(|state| OrderListState::clone(&state))
    }

    /// Send `action` and wait for the view to publish it and go idle.
    ///
    /// Intended for a single interactive sender that waits between actions.
    /// Returns `None` if the view has stopped.
    pub async fn apply(&mut self, action: Action) -> Option<OrderListState> {
        self.snapshots.mark_unchanged();
        if !self.send(action).await {
            return None;
        }
        self.snapshots.changed().await.ok()?;
        self.settled().await
    }

    /// Stop accepting actions and wait for in-flight requests to finish.
    ///
    /// # Errors
    ///
    /// Returns `JoinError` if the view task panicked.
    pub async fn shutdown(self) -> Result<OrderListState, JoinError> {
        drop(self.actions);
        self.task.await
    }
}
