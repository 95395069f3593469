//! OpenAPI documentation registration for Swagger UI.
//!
//! Utoipa only exposes operations listed in `#[openapi(paths(...))]`; each
//! handler still needs its own `#[utoipa::path(...)]` attribute.

use utoipa::OpenApi;

use crate::dto::responses::server::healthcheck_response::ServerHealthcheckResponse;
use crate::errors::code_error::CodeErrorResp;
use crate::handlers::{server::healthcheck, signup::signup, site::welcome};

#[derive(OpenApi)]
#[openapi(
    paths(
        welcome::welcome_handler,
        signup::signup_handler,
        healthcheck::healthcheck,
    ),
    components(schemas(CodeErrorResp, ServerHealthcheckResponse)),
    tags(
        (name = "site", description = "Welcome page"),
        (name = "signup", description = "Signup submission"),
        (name = "server", description = "Server health")
    )
)]
pub struct ApiDoc;
