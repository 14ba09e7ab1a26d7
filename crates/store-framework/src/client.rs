//! # Store Handle
//!
//! The cloneable handle used to drive a [`StoreActor`](crate::StoreActor).

use crate::error::{FrameworkError, OpError};
use crate::message::{Reducer, Settlement, StoreRequest};
use crate::state::TrackedState;
use std::future::Future;
use tokio::sync::{mpsc, oneshot, watch};

/// ## StoreHandle
///
/// Forwards lifecycle messages to the store task over a Tokio mpsc channel and
/// waits for the acknowledgement on a oneshot channel. Holds a `watch`
/// receiver for reading the latest published state without a round trip.
///
/// * **Cloneable** – holds only channel ends, so cloning is inexpensive.
/// * **Not optimistic** – the state is only touched at `begin` and at settlement.
#[derive(Clone)]
pub struct StoreHandle<S: TrackedState> {
    sender: mpsc::Sender<StoreRequest<S>>,
    watcher: watch::Receiver<S>,
}

impl<S: TrackedState> StoreHandle<S> {
    pub fn new(sender: mpsc::Sender<StoreRequest<S>>, watcher: watch::Receiver<S>) -> Self {
        Self { sender, watcher }
    }

    /// Wraps a remote call as a tracked operation.
    ///
    /// 1. `begin`: the lane is marked loading and the error is cleared.
    /// 2. `call` is awaited on the caller's task.
    /// 3. On success `merge(state, payload)` is applied; on failure the error's
    ///    `Display` text becomes the store error and data is left untouched.
    ///
    /// There is no retry, timeout or cancellation.
    pub async fn track<T, E, F, M>(
        &self,
        lane: S::Lane,
        op: &'static str,
        call: F,
        merge: M,
    ) -> Result<(), OpError<E>>
    where
        F: Future<Output = Result<T, E>>,
        T: Send + 'static,
        E: std::fmt::Display,
        M: FnOnce(&mut S, T) + Send + 'static,
    {
        self.begin(lane, op).await?;
        match call.await {
            Ok(payload) => {
                self.succeed(lane, op, move |state: &mut S| merge(state, payload))
                    .await?;
                Ok(())
            }
            Err(e) => {
                self.fail(lane, op, e.to_string()).await?;
                Err(OpError::Remote(e))
            }
        }
    }

    /// Marks an operation on `lane` as pending.
    pub async fn begin(&self, lane: S::Lane, op: &'static str) -> Result<(), FrameworkError> {
        self.request(|respond_to| StoreRequest::Begin {
            lane,
            op,
            respond_to,
        })
        .await
    }

    /// Settles an operation successfully, applying `merge`.
    pub async fn succeed<M>(
        &self,
        lane: S::Lane,
        op: &'static str,
        merge: M,
    ) -> Result<(), FrameworkError>
    where
        M: FnOnce(&mut S) + Send + 'static,
    {
        let reducer: Reducer<S> = Box::new(merge);
        self.request(|respond_to| StoreRequest::Settle {
            lane,
            op,
            settlement: Settlement::Fulfilled(reducer),
            respond_to,
        })
        .await
    }

    /// Settles an operation as rejected, recording `message`.
    pub async fn fail(
        &self,
        lane: S::Lane,
        op: &'static str,
        message: String,
    ) -> Result<(), FrameworkError> {
        self.request(|respond_to| StoreRequest::Settle {
            lane,
            op,
            settlement: Settlement::Rejected(message),
            respond_to,
        })
        .await
    }

    /// Applies a local transition that has no remote call behind it.
    pub async fn apply<M>(&self, op: &'static str, reducer: M) -> Result<(), FrameworkError>
    where
        M: FnOnce(&mut S) + Send + 'static,
    {
        let reducer: Reducer<S> = Box::new(reducer);
        self.request(|respond_to| StoreRequest::Apply {
            op,
            reducer,
            respond_to,
        })
        .await
    }

    /// Reads the state through the store task, ordered after every message
    /// already sent.
    pub async fn snapshot(&self) -> Result<S, FrameworkError> {
        self.request(|respond_to| StoreRequest::Snapshot { respond_to })
            .await
    }

    /// Latest published state.
    pub fn state(&self) -> S {
        self.watcher.borrow().clone()
    }

    /// A receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.watcher.clone()
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, FrameworkError>>) -> StoreRequest<S>,
    ) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::StoreClosed)?;
        response.await.map_err(|_| FrameworkError::StoreDropped)?
    }
}
