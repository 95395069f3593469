//! Fakes and state builders shared by the router and handler tests.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::domain::signup::{
    signup_notifier::{NotifyError, SignupNotifier},
    signup_record::SignupRecord,
    signup_store::{InMemorySignupStore, SignupStore, StoreError},
};
use crate::init::state::ServerState;

/// Counts publishes and optionally fails every one of them.
#[derive(Default)]
pub struct FakeNotifier {
    pub published: AtomicUsize,
    pub fail: bool,
}

impl FakeNotifier {
    pub fn failing() -> Self {
        FakeNotifier {
            published: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn published(&self) -> usize {
        self.published.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SignupNotifier for FakeNotifier {
    async fn publish(&self, _record: &SignupRecord) -> Result<(), NotifyError> {
        self.published.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(NotifyError::Publish {
                message: "AuthorizationError: not allowed to publish".to_string(),
            });
        }
        Ok(())
    }
}

/// A store whose every insert fails the same way.
pub struct FailingStore(pub StoreError);

#[async_trait]
impl SignupStore for FailingStore {
    async fn insert(&self, _record: &SignupRecord) -> Result<(), StoreError> {
        Err(self.0.clone())
    }
}

pub fn test_state(
    store: Arc<dyn SignupStore>,
    notifier: Arc<dyn SignupNotifier>,
) -> Arc<ServerState> {
    Arc::new(
        ServerState::builder()
            .app_name_version("signup-frontend test".to_string())
            .server_start_time(tokio::time::Instant::now())
            .signup_store(store)
            .signup_notifier(notifier)
            .theme("flatly".to_string())
            .build()
            .unwrap(),
    )
}

pub fn memory_state() -> (Arc<ServerState>, Arc<InMemorySignupStore>, Arc<FakeNotifier>) {
    let store = Arc::new(InMemorySignupStore::new());
    let notifier = Arc::new(FakeNotifier::default());
    (test_state(store.clone(), notifier.clone()), store, notifier)
}
