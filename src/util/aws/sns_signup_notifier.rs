use async_trait::async_trait;
use aws_sdk_sns::Client;
use aws_sdk_sns::error::DisplayErrorContext;
use tracing::debug;

use crate::domain::signup::{
    signup_notifier::{NotifyError, SignupNotifier},
    signup_record::SignupRecord,
};

/// Publishes each new signup to one SNS topic. The message body is the
/// record as JSON.
#[derive(Debug, Clone)]
pub struct SnsSignupNotifier {
    client: Client,
    topic_arn: String,
}

impl SnsSignupNotifier {
    pub fn new(client: Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }

    pub fn from_sdk_config(config: &aws_types::SdkConfig, topic_arn: impl Into<String>) -> Self {
        Self::new(Client::new(config), topic_arn)
    }
}

#[async_trait]
impl SignupNotifier for SnsSignupNotifier {
    async fn publish(&self, record: &SignupRecord) -> Result<(), NotifyError> {
        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .message(record.to_json()?)
            .subject(record.notification_subject())
            .send()
            .await
            .map_err(|e| NotifyError::Publish {
                message: DisplayErrorContext(&e).to_string(),
            })?;

        debug!(
            topic = %self.topic_arn,
            message_id = ?output.message_id(),
            "Signup notification published"
        );
        Ok(())
    }
}
