//! # TrackedState Trait
//!
//! The `TrackedState` trait is the contract every store state implements to be
//! owned by a [`StoreActor`](crate::StoreActor). It exposes the store's loading
//! flags and error slot so the framework can drive the uniform
//! pending/fulfilled/rejected lifecycle for any resource collection.
//!
//! # Lanes
//! Some stores run independent kinds of work side by side (a product catalog
//! and the currently selected product's BOM, for example). Each kind gets its
//! own loading flag, selected by the associated `Lane` type. Single-lane
//! stores use `()`.
//!
//! # Provided Methods (Hooks)
//! - [`TrackedState::begin`]
//! - [`TrackedState::succeed`]
//! - [`TrackedState::fail`]
//!
//! You do **not** need to implement these unless a store needs different
//! bookkeeping. Data is never touched by them; merging results is the job of
//! the reducer passed to [`StoreHandle::track`](crate::StoreHandle::track).

use std::fmt::{self, Debug, Display};

/// Trait that any store state must implement to be managed by `StoreActor`.
pub trait TrackedState: Clone + Default + Debug + Send + Sync + 'static {
    /// Identifies an independent loading flag inside the store.
    type Lane: Copy + Debug + Send + Sync + 'static;

    /// Mutable access to the loading flag of `lane`.
    fn loading_mut(&mut self, lane: Self::Lane) -> &mut bool;

    /// Mutable access to the store-wide error message.
    fn error_mut(&mut self) -> &mut Option<String>;

    /// Number of entities currently held, used for logging only.
    fn size(&self) -> usize {
        0
    }

    /// Pending: the lane is loading and any prior error is cleared.
    fn begin(&mut self, lane: Self::Lane) {
        *self.loading_mut(lane) = true;
        *self.error_mut() = None;
    }

    /// Fulfilled: the lane stops loading and the error is cleared.
    fn succeed(&mut self, lane: Self::Lane) {
        *self.loading_mut(lane) = false;
        *self.error_mut() = None;
    }

    /// Rejected: the lane stops loading and `message` is recorded.
    fn fail(&mut self, lane: Self::Lane, message: String) {
        *self.loading_mut(lane) = false;
        *self.error_mut() = Some(message);
    }
}

/// Observable phase of a single tracked operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Pending => "pending",
            Phase::Fulfilled => "fulfilled",
            Phase::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default)]
    struct Counter {
        value: u32,
        loading: bool,
        error: Option<String>,
    }

    impl TrackedState for Counter {
        type Lane = ();

        fn loading_mut(&mut self, _lane: ()) -> &mut bool {
            &mut self.loading
        }

        fn error_mut(&mut self) -> &mut Option<String> {
            &mut self.error
        }
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let mut state = Counter {
            error: Some("boom".into()),
            ..Default::default()
        };
        state.begin(());
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_fail_keeps_data() {
        let mut state = Counter {
            value: 7,
            ..Default::default()
        };
        state.begin(());
        state.fail((), "Network error".into());
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Network error"));
        assert_eq!(state.value, 7);
    }
}
