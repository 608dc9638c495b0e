//! # Mock Store & Testing Guide
//!
//! Utilities for testing domain clients without running a real reducer.
//!
//! ## When to use Mocks vs a Real Store
//!
//! | Feature | MockStore | Real Store |
//! |---------|-----------|------------|
//! | **State** | None (scripted responses) | Real snapshots |
//! | **Use Case** | Testing logic *around* the client | Testing the reducer or the full system |
//! | **Error Injection** | Easy (`return_err`) | Requires building the failing state |
//!
//! ## Two styles
//!
//! - **Scripted**: [`MockStore`] queues expected requests and their responses, then
//!   [`MockStore::verify`] checks they were all consumed.
//! - **Manual**: [`create_mock_client`] hands back the raw receiver; [`expect_dispatch`] and
//!   [`expect_snapshot`] pull the next request so the test can inspect the action and answer
//!   it by hand.

use crate::{Reducer, StoreClient, StoreError, StoreRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<S: Reducer> {
    Dispatch {
        response: Result<S::Outcome, StoreError>,
    },
    Snapshot {
        response: Result<Arc<S>, StoreError>,
    },
}

/// A scripted stand-in for a store.
///
/// # Example
/// ```ignore
/// let mut mock = MockStore::<CatalogState>::new();
/// mock.expect_snapshot().return_ok(state);
/// mock.expect_dispatch().return_ok(CatalogOutcome::Applied);
///
/// let client = ProductClient::new(mock.client(), settings);
/// // ...
/// mock.verify();
/// ```
pub struct MockStore<S: Reducer> {
    client: StoreClient<S>,
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: Reducer> MockStore<S> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<S>>(100);
        let expectations: Arc<Mutex<VecDeque<Expectation<S>>>> =
            Arc::new(Mutex::new(VecDeque::new()));
        let queue = Arc::clone(&expectations);

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().expect("mock queue poisoned").pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Dispatch { respond_to, .. },
                        Some(Expectation::Dispatch { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Snapshot { respond_to },
                        Some(Expectation::Snapshot { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<S> {
        self.client.clone()
    }

    /// Expects a `dispatch` request.
    pub fn expect_dispatch(&mut self) -> DispatchExpectationBuilder<S> {
        DispatchExpectationBuilder {
            expectations: Arc::clone(&self.expectations),
        }
    }

    /// Expects a `snapshot` request.
    pub fn expect_snapshot(&mut self) -> SnapshotExpectationBuilder<S> {
        SnapshotExpectationBuilder {
            expectations: Arc::clone(&self.expectations),
        }
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().expect("mock queue poisoned").len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

impl<S: Reducer> Default for MockStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `dispatch` expectations.
pub struct DispatchExpectationBuilder<S: Reducer> {
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
}

impl<S: Reducer> DispatchExpectationBuilder<S> {
    pub fn return_ok(self, outcome: S::Outcome) {
        self.push(Ok(outcome));
    }

    /// Answers with the reducer rejecting the action.
    pub fn return_rejected(self, error: S::Error) {
        self.push(Err(StoreError::Rejected(Box::new(error))));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<S::Outcome, StoreError>) {
        self.expectations
            .lock()
            .expect("mock queue poisoned")
            .push_back(Expectation::Dispatch { response });
    }
}

/// Builder for `snapshot` expectations.
pub struct SnapshotExpectationBuilder<S: Reducer> {
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
}

impl<S: Reducer> SnapshotExpectationBuilder<S> {
    pub fn return_ok(self, state: S) {
        self.push(Ok(Arc::new(state)));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Arc<S>, StoreError>) {
        self.expectations
            .lock()
            .expect("mock queue poisoned")
            .push_back(Expectation::Snapshot { response });
    }
}

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client<S: Reducer>(
    buffer_size: usize,
) -> (StoreClient<S>, mpsc::Receiver<StoreRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Pulls the next request, returning it if it is a dispatch.
pub async fn expect_dispatch<S: Reducer>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<(S::Action, oneshot::Sender<Result<S::Outcome, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Dispatch { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

/// Pulls the next request, returning its responder if it is a snapshot read.
pub async fn expect_snapshot<S: Reducer>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<oneshot::Sender<Result<Arc<S>, StoreError>>> {
    match receiver.recv().await {
        Some(StoreRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Shelf {
        items: Vec<String>,
    }

    #[derive(Debug)]
    enum ShelfAction {
        Put(String),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("shelf is full")]
    struct ShelfFull;

    impl Reducer for Shelf {
        type Action = ShelfAction;
        type Outcome = usize;
        type Context = ();
        type Error = ShelfFull;

        fn reduce(&self, action: ShelfAction, _: &()) -> Result<(Self, usize), ShelfFull> {
            let ShelfAction::Put(item) = action;
            let mut items = self.items.clone();
            items.push(item);
            let len = items.len();
            Ok((Shelf { items }, len))
        }
    }

    #[tokio::test]
    async fn test_manual_mock_client() {
        let (client, mut receiver) = create_mock_client::<Shelf>(10);

        let task = tokio::spawn(async move { client.dispatch(ShelfAction::Put("jar".into())).await });

        let (action, responder) = expect_dispatch(&mut receiver)
            .await
            .expect("Expected Dispatch request");
        assert!(matches!(action, ShelfAction::Put(ref item) if item == "jar"));
        responder.send(Ok(1)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_scripted_mock_store() {
        let mut mock = MockStore::<Shelf>::new();
        mock.expect_snapshot().return_ok(Shelf {
            items: vec!["cup".into()],
        });
        mock.expect_dispatch().return_rejected(ShelfFull);

        let client = mock.client();
        let shelf = client.snapshot().await.unwrap();
        assert_eq!(shelf.items, vec!["cup".to_string()]);

        let err = client
            .dispatch(ShelfAction::Put("bowl".into()))
            .await
            .unwrap_err();
        assert!(err.downcast::<ShelfFull>().is_ok());

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_reports_unused_expectations() {
        let mut mock = MockStore::<Shelf>::new();
        mock.expect_dispatch().return_ok(1);
        mock.verify();
    }
}
