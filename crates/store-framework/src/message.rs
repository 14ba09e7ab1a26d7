//! # Store Messages
//!
//! The message types exchanged between a [`StoreHandle`](crate::StoreHandle)
//! and its [`StoreActor`](crate::StoreActor).
//!
//! Every request carries a one-shot `respond_to` channel. The handle awaits it,
//! so once a handle method returns, the store task has already applied the
//! transition and published the new state.

use crate::error::FrameworkError;
use crate::state::TrackedState;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by stores.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A state transition executed by the store task.
pub type Reducer<S> = Box<dyn FnOnce(&mut S) + Send + 'static>;

/// How a tracked operation settled.
pub enum Settlement<S> {
    /// The call succeeded; the reducer merges its payload.
    Fulfilled(Reducer<S>),
    /// The call failed with a human-readable message.
    Rejected(String),
}

/// Internal message type sent to the store task.
///
/// - **Begin**: an operation on `lane` is now pending.
/// - **Settle**: an operation on `lane` completed, successfully or not.
/// - **Apply**: a local, synchronous transition (no remote call behind it).
/// - **Snapshot**: read the current state in message order.
pub enum StoreRequest<S: TrackedState> {
    Begin {
        lane: S::Lane,
        op: &'static str,
        respond_to: Response<()>,
    },
    Settle {
        lane: S::Lane,
        op: &'static str,
        settlement: Settlement<S>,
        respond_to: Response<()>,
    },
    Apply {
        op: &'static str,
        reducer: Reducer<S>,
        respond_to: Response<()>,
    },
    Snapshot {
        respond_to: Response<S>,
    },
}

impl<S: TrackedState> fmt::Debug for StoreRequest<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreRequest::Begin { lane, op, .. } => f
                .debug_struct("Begin")
                .field("lane", lane)
                .field("op", op)
                .finish(),
            StoreRequest::Settle {
                lane,
                op,
                settlement,
                ..
            } => {
                let outcome = match settlement {
                    Settlement::Fulfilled(_) => "fulfilled",
                    Settlement::Rejected(_) => "rejected",
                };
                f.debug_struct("Settle")
                    .field("lane", lane)
                    .field("op", op)
                    .field("outcome", &outcome)
                    .finish()
            }
            StoreRequest::Apply { op, .. } => f.debug_struct("Apply").field("op", op).finish(),
            StoreRequest::Snapshot { .. } => f.write_str("Snapshot"),
        }
    }
}
