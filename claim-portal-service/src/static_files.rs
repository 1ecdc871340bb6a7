//! Embedded stylesheet and upload script

use axum::{
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// Embedded assets from assets/
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

pub fn serve_static(path: &str) -> Response {
    let path = path.trim_start_matches('/');

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

/// Handler for static assets
pub async fn asset(Path(path): Path<String>) -> Response {
    serve_static(&path)
}
