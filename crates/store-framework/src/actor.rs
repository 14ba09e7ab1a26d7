//! # Store Task
//!
//! This module defines the `StoreActor`, the single owner of a store's state.
//! It processes messages sequentially, so every reducer runs atomically with
//! respect to every other one and no lock guards the state.

use crate::client::StoreHandle;
use crate::message::{Settlement, StoreRequest};
use crate::state::{Phase, TrackedState};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The task that owns a store's state.
///
/// # Concurrency Model
/// Remote calls never run inside this loop. A handle sends `Begin`, performs
/// the call on the caller's task, then sends `Settle`. Settlements are applied
/// in arrival order: when two fetches of the same kind overlap, the one that
/// settles last overwrites the store, regardless of dispatch order.
///
/// After every transition the new state is published on a `watch` channel so
/// readers never have to wait for the loop.
///
/// # Usage Pattern
///
/// ```rust
/// use store_framework::{StoreActor, TrackedState};
///
/// #[derive(Clone, Debug, Default)]
/// struct Names { items: Vec<String>, loading: bool, error: Option<String> }
///
/// impl TrackedState for Names {
///     type Lane = ();
///     fn loading_mut(&mut self, _: ()) -> &mut bool { &mut self.loading }
///     fn error_mut(&mut self) -> &mut Option<String> { &mut self.error }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, handle) = StoreActor::<Names>::new(10);
///     tokio::spawn(actor.run());
///
///     let call = async { Ok::<_, std::io::Error>(vec!["Pine board".to_string()]) };
///     handle
///         .track((), "list", call, |state, items| state.items = items)
///         .await
///         .unwrap();
///     assert_eq!(handle.state().items, vec!["Pine board".to_string()]);
/// }
/// ```
pub struct StoreActor<S: TrackedState> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    state: S,
    publisher: watch::Sender<S>,
}

impl<S: TrackedState> StoreActor<S> {
    /// Creates a new store task and the handle used to talk to it.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full,
    /// handle calls wait for room.
    pub fn new(buffer_size: usize) -> (Self, StoreHandle<S>) {
        Self::with_state(buffer_size, S::default())
    }

    /// Like [`StoreActor::new`], starting from a given state.
    pub fn with_state(buffer_size: usize, state: S) -> (Self, StoreHandle<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, watcher) = watch::channel(state.clone());
        let actor = Self {
            receiver,
            state,
            publisher,
        };
        (actor, StoreHandle::new(sender, watcher))
    }

    /// Runs the event loop until every handle has been dropped.
    pub async fn run(mut self) {
        // "RawMaterialState" rather than the full module path
        let store = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(store, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Begin {
                    lane,
                    op,
                    respond_to,
                } => {
                    self.state.begin(lane);
                    debug!(store, op, ?lane, phase = %Phase::Pending, "Begin");
                    self.publish();
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Settle {
                    lane,
                    op,
                    settlement,
                    respond_to,
                } => {
                    match settlement {
                        Settlement::Fulfilled(reducer) => {
                            reducer(&mut self.state);
                            self.state.succeed(lane);
                            info!(
                                store,
                                op,
                                ?lane,
                                phase = %Phase::Fulfilled,
                                size = self.state.size(),
                                "Settled"
                            );
                        }
                        Settlement::Rejected(message) => {
                            warn!(store, op, ?lane, phase = %Phase::Rejected, error = %message, "Settled");
                            self.state.fail(lane, message);
                        }
                    }
                    self.publish();
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Apply {
                    op,
                    reducer,
                    respond_to,
                } => {
                    reducer(&mut self.state);
                    debug!(store, op, size = self.state.size(), "Applied");
                    self.publish();
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
            }
        }

        info!(store, size = self.state.size(), "Shutdown");
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}
