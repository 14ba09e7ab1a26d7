//! # Mock Framework & Testing Guide
//!
//! Utilities for testing stores against a remote collaborator whose answers are
//! scripted by the test instead of produced by a real service.
//!
//! ## When to use what
//!
//! | Tool | Use Case |
//! |------|----------|
//! | [`deferred`] | One call whose settlement moment the test controls |
//! | [`ScriptedCalls`] | A queue of answers for every call of one operation |
//!
//! ## Testing Settlement Order
//!
//! Overlapping operations are the hard part of an asynchronous store: which
//! response wins when two fetches are in flight? Deferred answers let a test
//! resolve calls in any order and assert on the state afterwards.
//!
//! ```rust
//! use store_framework::mock::ScriptedCalls;
//!
//! #[tokio::main]
//! async fn main() {
//!     let calls = ScriptedCalls::<u32, String>::new("count");
//!     calls.expect().return_ok(3);
//!     let pending = calls.expect().deferred();
//!
//!     assert_eq!(calls.next().await, Ok(3));
//!
//!     let waiter = tokio::spawn({
//!         let calls = calls.clone();
//!         async move { calls.next().await }
//!     });
//!     calls.wait_for_calls(2).await;
//!     pending.resolve_err("unavailable".to_string());
//!     assert_eq!(waiter.await.unwrap(), Err("unavailable".to_string()));
//!
//!     calls.verify();
//! }
//! ```

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::{oneshot, watch};

// =============================================================================
// DEFERRED RESPONSES
// =============================================================================

/// Completes a [`deferred`] call.
pub struct Resolver<T, E> {
    sender: oneshot::Sender<Result<T, E>>,
}

impl<T, E> Resolver<T, E> {
    /// Settles the call successfully.
    pub fn resolve_ok(self, value: T) {
        let _ = self.sender.send(Ok(value));
    }

    /// Settles the call with an error.
    pub fn resolve_err(self, error: E) {
        let _ = self.sender.send(Err(error));
    }
}

/// Creates a call that stays pending until its [`Resolver`] is used.
///
/// # Panics
/// The returned future panics if the resolver is dropped without answering.
pub fn deferred<T, E>() -> (impl Future<Output = Result<T, E>> + Send, Resolver<T, E>)
where
    T: Send,
    E: Send,
{
    let (sender, receiver) = oneshot::channel();
    let call = async move {
        match receiver.await {
            Ok(result) => result,
            Err(_) => panic!("Deferred response dropped before it was resolved"),
        }
    };
    (call, Resolver { sender })
}

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer.
enum Expectation<T, E> {
    Ready(Result<T, E>),
    Deferred(oneshot::Receiver<Result<T, E>>),
}

/// A queue of scripted answers for one remote operation.
///
/// Each call to [`ScriptedCalls::next`] consumes the oldest expectation.
/// Clones share the same queue.
pub struct ScriptedCalls<T, E> {
    operation: &'static str,
    expectations: Arc<Mutex<VecDeque<Expectation<T, E>>>>,
    received: Arc<watch::Sender<usize>>,
}

impl<T, E> Clone for ScriptedCalls<T, E> {
    fn clone(&self) -> Self {
        Self {
            operation: self.operation,
            expectations: self.expectations.clone(),
            received: self.received.clone(),
        }
    }
}

impl<T, E> ScriptedCalls<T, E> {
    /// Creates an empty script for `operation`.
    pub fn new(operation: &'static str) -> Self {
        let (received, _) = watch::channel(0);
        Self {
            operation,
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            received: Arc::new(received),
        }
    }

    /// Queues the next answer.
    pub fn expect(&self) -> ExpectationBuilder<T, E> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Answers the next call from the script.
    ///
    /// # Panics
    /// Panics if no answer is scripted, or a deferred answer's resolver was
    /// dropped.
    pub async fn next(&self) -> Result<T, E> {
        let expectation = self.expectations.lock().unwrap().pop_front();
        self.received.send_modify(|count| *count += 1);

        match expectation {
            Some(Expectation::Ready(result)) => result,
            Some(Expectation::Deferred(receiver)) => match receiver.await {
                Ok(result) => result,
                Err(_) => panic!("Deferred answer for `{}` was dropped", self.operation),
            },
            None => panic!("Unexpected call to `{}`: nothing scripted", self.operation),
        }
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        *self.received.borrow()
    }

    /// Waits until at least `count` calls have been received.
    pub async fn wait_for_calls(&self, count: usize) {
        let mut watcher = self.received.subscribe();
        let _ = watcher.wait_for(|received| *received >= count).await;
    }

    /// Verifies that every scripted answer was consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!(
                "Not all expectations for `{}` were met. {} remaining",
                self.operation,
                exps.len()
            );
        }
    }
}

/// Builder for a single scripted answer.
pub struct ExpectationBuilder<T, E> {
    expectations: Arc<Mutex<VecDeque<Expectation<T, E>>>>,
}

impl<T, E> ExpectationBuilder<T, E> {
    /// The call succeeds immediately with `value`.
    pub fn return_ok(self, value: T) {
        self.push(Expectation::Ready(Ok(value)));
    }

    /// The call fails immediately with `error`.
    pub fn return_err(self, error: E) {
        self.push(Expectation::Ready(Err(error)));
    }

    /// The call stays pending until the returned resolver is used.
    pub fn deferred(self) -> Resolver<T, E> {
        let (sender, receiver) = oneshot::channel();
        self.push(Expectation::Deferred(receiver));
        Resolver { sender }
    }

    fn push(self, expectation: Expectation<T, E>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(expectation);
    }
}
