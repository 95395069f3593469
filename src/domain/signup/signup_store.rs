use async_trait::async_trait;

use super::signup_record::SignupRecord;

/// Why a conditional insert did not go through.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("a signup for {email} already exists")]
    AlreadyExists { email: String },

    #[error("signup store rejected the write: {message}")]
    Rejected { message: String },

    #[error("signup store unavailable: {message}")]
    Unavailable { message: String },
}

/// Durable storage for signups, keyed by email.
///
/// `insert` is insert-if-absent: it never overwrites, and a present key must
/// surface as [`StoreError::AlreadyExists`]. Uniqueness under concurrent
/// requests is the backend's job.
#[async_trait]
pub trait SignupStore: Send + Sync {
    async fn insert(&self, record: &SignupRecord) -> Result<(), StoreError>;
}

/// Process-local store for `SIGNUP_BACKEND=memory` runs and tests.
#[derive(Default)]
pub struct InMemorySignupStore {
    records: scc::HashMap<String, SignupRecord>,
}

impl InMemorySignupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub async fn get(&self, email: &str) -> Option<SignupRecord> {
        self.records.read_async(email, |_, v| v.clone()).await
    }
}

#[async_trait]
impl SignupStore for InMemorySignupStore {
    async fn insert(&self, record: &SignupRecord) -> Result<(), StoreError> {
        self.records
            .insert_async(record.email().to_owned(), record.clone())
            .await
            .map_err(|(email, _)| StoreError::AlreadyExists { email })
    }
}
