use axum::http::{HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use serde_derive::Serialize;
use std::error::Error;
use std::fmt;
use tracing::Level;
use utoipa::ToSchema;

pub type HandlerResponse<T> = Result<T, CodeErrorResp>;

pub struct CodeError {
    pub success: bool,
    pub error_code: u16,
    pub http_status_code: StatusCode,
    pub log_level: Level,
    pub message: &'static str,
}

impl CodeError {
    pub const EMAIL_REQUIRED: CodeError = CodeError {
        success: false,
        error_code: 0,
        http_status_code: StatusCode::BAD_REQUEST,
        log_level: Level::WARN,
        message: "Signup form must include a non-empty email field!",
    };
    pub const SIGNUP_STORE_UNAVAILABLE: CodeError = CodeError {
        success: false,
        error_code: 1,
        http_status_code: StatusCode::SERVICE_UNAVAILABLE,
        log_level: Level::ERROR,
        message: "Signup store is unavailable!",
    };
    pub const TEMPLATE_RENDER_ERROR: CodeError = CodeError {
        success: false,
        error_code: 2,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        log_level: Level::ERROR,
        message: "Could not render page!",
    };
    pub const INVALID_PATH: CodeError = CodeError {
        success: false,
        error_code: 3,
        http_status_code: StatusCode::NOT_FOUND,
        log_level: Level::INFO,
        message: "Invalid path!",
    };
    pub const ASSET_NOT_FOUND: CodeError = CodeError {
        success: false,
        error_code: 4,
        http_status_code: StatusCode::NOT_FOUND,
        log_level: Level::INFO,
        message: "Static asset not found!",
    };
}

pub fn code_err(cerr: CodeError, e: impl fmt::Display) -> CodeErrorResp {
    CodeErrorResp {
        success: cerr.success,
        error_code: cerr.error_code,
        http_status_code: cerr.http_status_code,
        log_level: cerr.log_level,
        message: cerr.message.to_string(),
        error_message: e.to_string(),
    }
}

impl From<CodeError> for CodeErrorResp {
    fn from(cerr: CodeError) -> Self {
        code_err(cerr, "")
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CodeErrorResp {
    pub success: bool,
    pub error_code: u16,
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub http_status_code: StatusCode,
    #[serde(skip)]
    pub log_level: Level,
    pub message: String,
    pub error_message: String,
}

fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

impl fmt::Display for CodeErrorResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.error_message)
    }
}

impl Error for CodeErrorResp {}

// The logging middleware reads the x-error-* headers and strips them.
impl IntoResponse for CodeErrorResp {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::to_string(&self).unwrap_or_else(|_| "{}".to_string());
        let mut response = (
            self.http_status_code,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response();

        let headers = response.headers_mut();
        let error_headers = [
            ("x-error-log-level", self.log_level.to_string()),
            (
                "x-error-status-code",
                self.http_status_code.as_u16().to_string(),
            ),
            ("x-error-code", self.error_code.to_string()),
            ("x-error-message", self.message),
            ("x-error-detail", self.error_message),
        ];
        for (name, value) in error_headers {
            if let Ok(value) = HeaderValue::from_str(&value) {
                headers.insert(name, value);
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_carries_json_body_and_error_headers() {
        let response =
            code_err(CodeError::SIGNUP_STORE_UNAVAILABLE, "Rate exceeded").into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(headers["x-error-log-level"], "ERROR");
        assert_eq!(headers["x-error-code"], "1");
        assert_eq!(headers["x-error-detail"], "Rate exceeded");
    }

    #[test]
    fn serializes_status_as_number() {
        let body = serde_json::to_value(code_err(CodeError::EMAIL_REQUIRED, "missing")).unwrap();

        assert_eq!(body["http_status_code"], 400);
        assert_eq!(body["success"], false);
        assert_eq!(body["error_message"], "missing");
        assert!(body.get("log_level").is_none());
    }
}
