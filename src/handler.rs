use crate::listing::directory_listing;
use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
};
use std::{path::Path, sync::Arc};
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer};

pub const WASM_CONTENT_TYPE: &str = "application/wasm";

/// Serves every path from `static_dir`.
///
/// Directories without an `index.html` are listed. Responses never get
/// cached by clients, and `.wasm` files are always sent as `application/wasm`.
pub fn router(static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref().to_path_buf();
    Router::new()
        .fallback_service(ServeDir::new(&static_dir))
        .layer(middleware::from_fn_with_state(
            Arc::new(static_dir),
            directory_listing,
        ))
        .layer(middleware::from_fn(wasm_content_type))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
}

async fn wasm_content_type(request: Request, next: Next) -> Response {
    let is_wasm = request.uri().path().ends_with(".wasm");
    let mut response = next.run(request).await;

    // Error bodies keep the content type they were produced with.
    if is_wasm && response.status().is_success() {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(WASM_CONTENT_TYPE));
    }
    response
}
