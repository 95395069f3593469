use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use crate::domain::signup::{
    signup_record::SignupRecord,
    signup_store::{SignupStore, StoreError},
};

/// Error codes that mean "try again later" rather than "bad request", even
/// though DynamoDB reports some of them with a 400 status.
const RETRYABLE_ERROR_CODES: [&str; 4] = [
    "ThrottlingException",
    "ServiceUnavailable",
    "InternalServerError",
    "RequestLimitExceeded",
];

/// Signup table in DynamoDB, partitioned on `email`.
///
/// Every form field becomes a string attribute. The put is guarded by
/// `attribute_not_exists(email)` so DynamoDB itself refuses a second signup
/// for the same address.
#[derive(Debug, Clone)]
pub struct DynamoSignupStore {
    client: Client,
    table_name: String,
}

impl DynamoSignupStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn from_sdk_config(config: &aws_types::SdkConfig, table_name: impl Into<String>) -> Self {
        Self::new(Client::new(config), table_name)
    }
}

#[async_trait]
impl SignupStore for DynamoSignupStore {
    async fn insert(&self, record: &SignupRecord) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(record)))
            .condition_expression("attribute_not_exists(#email)")
            .expression_attribute_names("#email", SignupRecord::EMAIL_FIELD)
            .send()
            .await
            .map_err(|e| classify_put_item_error(e, record.email()))?;

        debug!(table = %self.table_name, email = %record.email(), "Signup stored");
        Ok(())
    }
}

fn record_to_item(record: &SignupRecord) -> HashMap<String, AttributeValue> {
    record
        .iter()
        .map(|(name, value)| (name.to_owned(), AttributeValue::S(value.to_owned())))
        .collect()
}

fn classify_put_item_error<R>(err: SdkError<PutItemError, R>, email: &str) -> StoreError
where
    R: std::fmt::Debug + Send + Sync + 'static,
{
    match err.as_service_error() {
        Some(service_err) if service_err.is_conditional_check_failed_exception() => {
            StoreError::AlreadyExists {
                email: email.to_owned(),
            }
        }
        Some(service_err)
            if service_err.is_internal_server_error()
                || service_err.is_provisioned_throughput_exceeded_exception()
                || service_err.is_request_limit_exceeded()
                || service_err
                    .code()
                    .is_some_and(|code| RETRYABLE_ERROR_CODES.contains(&code)) =>
        {
            StoreError::Unavailable {
                message: DisplayErrorContext(service_err).to_string(),
            }
        }
        Some(service_err) => StoreError::Rejected {
            message: DisplayErrorContext(service_err).to_string(),
        },
        // timeouts, dispatch and credential failures never reached the table
        None => StoreError::Unavailable {
            message: DisplayErrorContext(&err).to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::error::ErrorMetadata;
    use aws_sdk_dynamodb::types::error::{
        ConditionalCheckFailedException, ProvisionedThroughputExceededException,
        ResourceNotFoundException,
    };

    use super::*;

    fn service_error(err: PutItemError) -> SdkError<PutItemError, ()> {
        SdkError::service_error(err, ())
    }

    #[test]
    fn item_carries_every_field_as_string() {
        let record = SignupRecord::from_form_fields([
            ("email".to_string(), "a@example.com".to_string()),
            ("name".to_string(), "Alice".to_string()),
        ])
        .unwrap();

        let item = record_to_item(&record);

        assert_eq!(item.len(), 2);
        assert_eq!(
            item.get("email"),
            Some(&AttributeValue::S("a@example.com".to_string()))
        );
        assert_eq!(item.get("name"), Some(&AttributeValue::S("Alice".to_string())));
    }

    #[test]
    fn conditional_check_failure_is_already_exists() {
        let err = service_error(PutItemError::ConditionalCheckFailedException(
            ConditionalCheckFailedException::builder()
                .message("The conditional request failed")
                .build(),
        ));

        assert_eq!(
            classify_put_item_error(err, "a@example.com"),
            StoreError::AlreadyExists {
                email: "a@example.com".to_string()
            }
        );
    }

    #[test]
    fn throttling_is_unavailable() {
        let err = service_error(PutItemError::ProvisionedThroughputExceededException(
            ProvisionedThroughputExceededException::builder()
                .message("slow down")
                .build(),
        ));
        assert!(matches!(
            classify_put_item_error(err, "a@example.com"),
            StoreError::Unavailable { .. }
        ));

        let err = service_error(PutItemError::generic(
            ErrorMetadata::builder()
                .code("ThrottlingException")
                .message("Rate exceeded")
                .build(),
        ));
        assert!(matches!(
            classify_put_item_error(err, "a@example.com"),
            StoreError::Unavailable { .. }
        ));
    }

    #[test]
    fn other_service_errors_are_rejections() {
        let err = service_error(PutItemError::ResourceNotFoundException(
            ResourceNotFoundException::builder()
                .message("Requested resource not found")
                .build(),
        ));
        assert!(matches!(
            classify_put_item_error(err, "a@example.com"),
            StoreError::Rejected { .. }
        ));

        let err = service_error(PutItemError::generic(
            ErrorMetadata::builder()
                .code("ValidationException")
                .message("One or more parameter values were invalid")
                .build(),
        ));
        assert!(matches!(
            classify_put_item_error(err, "a@example.com"),
            StoreError::Rejected { .. }
        ));
    }

    #[test]
    fn transport_failures_are_unavailable() {
        let err: SdkError<PutItemError, ()> = SdkError::timeout_error("operation timed out");
        assert!(matches!(
            classify_put_item_error(err, "a@example.com"),
            StoreError::Unavailable { .. }
        ));
    }
}
