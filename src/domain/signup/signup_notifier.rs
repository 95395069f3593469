use async_trait::async_trait;
use tracing::{error, info};

use super::signup_record::SignupRecord;

#[derive(thiserror::Error, Debug)]
pub enum NotifyError {
    #[error("could not serialize signup notification: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not publish signup notification: {message}")]
    Publish { message: String },
}

/// Announces a signup that is already durably stored.
#[async_trait]
pub trait SignupNotifier: Send + Sync {
    async fn publish(&self, record: &SignupRecord) -> Result<(), NotifyError>;
}

/// Publishes and drops any failure after logging it.
///
/// Callers reach this only after the record is stored, so the signup already
/// counts as successful and a lost notification must not change the response.
pub async fn publish_best_effort(notifier: &dyn SignupNotifier, record: &SignupRecord) {
    if let Err(e) = notifier.publish(record).await {
        error!(email = %record.email(), error = %e, "Error publishing signup notification");
    }
}

/// Writes notifications to the log instead of a topic.
pub struct LogSignupNotifier;

#[async_trait]
impl SignupNotifier for LogSignupNotifier {
    async fn publish(&self, record: &SignupRecord) -> Result<(), NotifyError> {
        let message = record.to_json()?;
        info!(subject = %record.notification_subject(), message = %message, "Signup notification");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingFailure {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SignupNotifier for CountingFailure {
        async fn publish(&self, _record: &SignupRecord) -> Result<(), NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(NotifyError::Publish {
                message: "topic does not exist".to_string(),
            })
        }
    }

    fn record() -> SignupRecord {
        SignupRecord::from_form_fields([("email".to_string(), "a@example.com".to_string())])
            .unwrap()
    }

    #[tokio::test]
    async fn best_effort_swallows_publish_errors() {
        let notifier = CountingFailure {
            calls: AtomicUsize::new(0),
        };

        publish_best_effort(&notifier, &record()).await;

        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn log_notifier_accepts_records() {
        assert!(LogSignupNotifier.publish(&record()).await.is_ok());
    }
}
