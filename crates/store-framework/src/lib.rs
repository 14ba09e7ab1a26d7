//! # Store Framework
//!
//! Building blocks for client-side state stores that synchronize with a remote
//! service. Every remote call is wrapped as a **tracked operation** with three
//! observable phases, and every store applies results through one sequential
//! owner task.
//!
//! ## The Tracked Operation
//!
//! - **begin**: the store's loading flag is set and the previous error cleared.
//! - **succeed**: a reducer merges the payload into the state; loading clears.
//! - **fail**: the error message is recorded; loading clears; data is untouched.
//!
//! Stores are never touched speculatively: nothing changes between `begin` and
//! settlement, so a failed mutation leaves the collection exactly as it was.
//!
//! ## Concurrency Model
//!
//! - Each store runs in its own Tokio task ([`StoreActor`]) and owns its state.
//! - Reducers execute **sequentially** in that task, so merges are atomic with
//!   respect to each other and no lock guards the state.
//! - Remote calls run on the caller's task. Nothing serializes or fences two
//!   overlapping calls: whichever settles **last** overwrites the store,
//!   independent of dispatch order. Callers that need "latest request wins"
//!   must add their own sequence token.
//! - No retry, timeout or cancellation is built in.
//!
//! ## Quick Start
//!
//! ```rust
//! use store_framework::{StoreActor, TrackedState};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Stock { units: Vec<u32>, loading: bool, error: Option<String> }
//!
//! impl TrackedState for Stock {
//!     type Lane = ();
//!     fn loading_mut(&mut self, _: ()) -> &mut bool { &mut self.loading }
//!     fn error_mut(&mut self) -> &mut Option<String> { &mut self.error }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, handle) = StoreActor::<Stock>::new(16);
//!     tokio::spawn(actor.run());
//!
//!     let failing = async { Err::<Vec<u32>, _>(std::io::Error::other("Server error")) };
//!     let _ = handle.track((), "list", failing, |s, units| s.units = units).await;
//!     assert_eq!(handle.state().error.as_deref(), Some("Server error"));
//!
//!     let ok = async { Ok::<_, std::io::Error>(vec![5, 8]) };
//!     handle.track((), "list", ok, |s, units| s.units = units).await.unwrap();
//!     assert!(handle.state().error.is_none());
//!     assert_eq!(handle.state().units, vec![5, 8]);
//! }
//! ```
//!
//! ## Testing
//!
//! See the [`mock`] module for scripted and deferred remote answers.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::StoreHandle;
pub use client_trait::StoreClient;
pub use error::{FrameworkError, OpError};
pub use message::{Reducer, Response, Settlement, StoreRequest};
pub use state::{Phase, TrackedState};
