//! # Mock Framework
//!
//! Utilities for testing code that talks to a collection without running a real
//! `CollectionActor`.
//!
//! Use [`MockCollection`] to queue expected requests and their responses, hand its client
//! to the code under test, then call [`MockCollection::verify`]. For asserting on the exact
//! payload a client sends, use [`create_mock_client`] with [`expect_insert`].
//!
//! | Feature | MockCollection | Real Actor |
//! |---------|----------------|------------|
//! | **State** | None (queued responses) | Real documents |
//! | **Storage** | None | Memory or JSON file |
//! | **Error Injection** | `return_err` | Failing storage backend |
//! | **Use Case** | Logic *around* the client | The store itself, end to end |

use crate::framework::{CollectionClient, CollectionRequest, Document, FrameworkError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// An expected request and the response the mock will send for it.
enum Expectation<T: Document> {
    Insert(Result<T::Id, FrameworkError>),
    FindAll(Result<Vec<T>, FrameworkError>),
    DeleteAll(Result<usize, FrameworkError>),
    DeleteOne(Result<usize, FrameworkError>),
    DeleteMany(Result<Vec<(T::Id, bool)>, FrameworkError>),
    Pull(Result<usize, FrameworkError>),
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock collection with expectation tracking for fluent testing.
///
/// Requests are matched against expectations in FIFO order. A request that arrives with
/// no matching expectation is counted as unexpected and its response channel is dropped,
/// so the caller sees [`FrameworkError::ActorDropped`].
///
/// # Example
/// ```ignore
/// let mut mock = MockCollection::<Order>::new();
/// mock.expect_find_all().return_ok(vec![]);
/// mock.expect_delete_all().return_ok(0);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockCollection<T: Document> {
    client: CollectionClient<T>,
    expectations: Expectations<T>,
    unexpected: Arc<AtomicUsize>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Document> MockCollection<T> {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<CollectionRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let unexpected = Arc::new(AtomicUsize::new(0));

        let expectations_clone = expectations.clone();
        let unexpected_clone = unexpected.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .expect("mock expectations poisoned")
                    .pop_front();

                let matched = match (request, expectation) {
                    (CollectionRequest::Insert { respond_to, .. }, Some(Expectation::Insert(r))) => {
                        let _ = respond_to.send(r);
                        true
                    }
                    (CollectionRequest::FindAll { respond_to }, Some(Expectation::FindAll(r))) => {
                        let _ = respond_to.send(r);
                        true
                    }
                    (CollectionRequest::DeleteAll { respond_to }, Some(Expectation::DeleteAll(r))) => {
                        let _ = respond_to.send(r);
                        true
                    }
                    (CollectionRequest::DeleteOne { respond_to, .. }, Some(Expectation::DeleteOne(r))) => {
                        let _ = respond_to.send(r);
                        true
                    }
                    (CollectionRequest::DeleteMany { respond_to, .. }, Some(Expectation::DeleteMany(r))) => {
                        let _ = respond_to.send(r);
                        true
                    }
                    (CollectionRequest::Pull { respond_to, .. }, Some(Expectation::Pull(r))) => {
                        let _ = respond_to.send(r);
                        true
                    }
                    _ => false,
                };

                if !matched {
                    unexpected_clone.fetch_add(1, Ordering::SeqCst);
                }
            }
        });

        Self {
            client: CollectionClient::new(sender),
            expectations,
            unexpected,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    pub fn expect_insert(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(Expectation::Insert)
    }

    pub fn expect_find_all(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::FindAll)
    }

    pub fn expect_delete_all(&mut self) -> ExpectationBuilder<T, usize> {
        self.builder(Expectation::DeleteAll)
    }

    pub fn expect_delete_one(&mut self) -> ExpectationBuilder<T, usize> {
        self.builder(Expectation::DeleteOne)
    }

    pub fn expect_delete_many(&mut self) -> ExpectationBuilder<T, Vec<(T::Id, bool)>> {
        self.builder(Expectation::DeleteMany)
    }

    pub fn expect_pull(&mut self) -> ExpectationBuilder<T, usize> {
        self.builder(Expectation::Pull)
    }

    /// Number of requests received so far that matched no expectation.
    pub fn unexpected_requests(&self) -> usize {
        self.unexpected.load(Ordering::SeqCst)
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("mock expectations poisoned")
            .len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
        let unexpected = self.unexpected_requests();
        if unexpected > 0 {
            panic!("Received {} unexpected request(s)", unexpected);
        }
    }

    fn builder<R>(
        &self,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap,
        }
    }
}

impl<T: Document> Default for MockCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that queues the response for one expected request.
pub struct ExpectationBuilder<T: Document, R> {
    expectations: Expectations<T>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<T: Document, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .push_back((self.wrap)(response));
    }
}

/// Creates a client wired to a receiver the test controls.
///
/// The test reads each request off the receiver, asserts on its payload and answers it
/// through the enclosed responder.
pub fn create_mock_client<T: Document>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<CollectionRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Insert request.
pub async fn expect_insert<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Insert, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Insert { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Pull request.
pub async fn expect_pull<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Filter, T::Pull, oneshot::Sender<Result<usize, FrameworkError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Pull {
            filter,
            pull,
            respond_to,
        }) => Some((filter, pull, respond_to)),
        _ => None,
    }
}
