//! # StoreClient Trait
//!
//! Common read-side interface for domain stores that wrap a [`StoreHandle`].

use crate::{FrameworkError, StoreHandle, TrackedState};
use async_trait::async_trait;
use tokio::sync::watch;

/// Trait for domain stores to inherit the standard read operations.
///
/// A domain store only supplies [`StoreClient::handle`]; reading the state,
/// the error message, subscribing to changes and ordered snapshots come for free.
///
/// # Example
///
/// ```rust
/// use store_framework::{StoreActor, StoreClient, StoreHandle, TrackedState};
///
/// #[derive(Clone, Debug, Default)]
/// struct Bins { count: u32, loading: bool, error: Option<String> }
///
/// impl TrackedState for Bins {
///     type Lane = ();
///     fn loading_mut(&mut self, _: ()) -> &mut bool { &mut self.loading }
///     fn error_mut(&mut self) -> &mut Option<String> { &mut self.error }
/// }
///
/// #[derive(Clone)]
/// struct BinStore { handle: StoreHandle<Bins> }
///
/// impl StoreClient<Bins> for BinStore {
///     fn handle(&self) -> &StoreHandle<Bins> { &self.handle }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, handle) = StoreActor::<Bins>::new(4);
///     tokio::spawn(actor.run());
///     let store = BinStore { handle };
///     assert!(store.error().is_none());
///     assert_eq!(store.snapshot().await.unwrap().count, 0);
/// }
/// ```
#[async_trait]
pub trait StoreClient<S: TrackedState>: Send + Sync {
    /// Access the inner generic handle.
    fn handle(&self) -> &StoreHandle<S>;

    /// Latest published state.
    fn state(&self) -> S {
        self.handle().state()
    }

    /// Message of the last rejected operation, until a later one succeeds.
    fn error(&self) -> Option<String> {
        let mut state = self.handle().state();
        state.error_mut().take()
    }

    /// Receiver that observes every state change.
    fn subscribe(&self) -> watch::Receiver<S> {
        self.handle().subscribe()
    }

    /// State read through the store task, after every pending message.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<S, FrameworkError> {
        tracing::debug!("Reading snapshot");
        self.handle().snapshot().await
    }
}
