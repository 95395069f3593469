use std::sync::Arc;

use axum::{extract::State, response::Html};
use rust_embed::Embed;

use crate::{
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
};

#[derive(Embed)]
#[folder = "templates/"]
struct Templates;

const DEBUG_BANNER: &str =
    r#"<div class="debug-banner">Debug mode is on. Do not run this configuration in production.</div>"#;

#[utoipa::path(
    get,
    path = "/",
    tag = "site",
    responses(
        (status = 200, description = "Welcome page rendered as HTML"),
        (status = 500, description = "Template missing from the binary", body = CodeErrorResp)
    )
)]
pub async fn welcome_handler(
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<Html<String>> {
    let template = Templates::get("index.html")
        .ok_or_else(|| code_err(CodeError::TEMPLATE_RENDER_ERROR, "index.html is not embedded"))?;
    let source = std::str::from_utf8(&template.data)
        .map_err(|e| code_err(CodeError::TEMPLATE_RENDER_ERROR, e))?;

    Ok(Html(render_welcome_page(
        source,
        state.get_theme(),
        state.is_debug(),
    )))
}

fn render_welcome_page(source: &str, theme: &str, debug: bool) -> String {
    source
        .replace("{{ theme }}", theme)
        .replace("{{ debug_banner }}", if debug { DEBUG_BANNER } else { "" })
}
