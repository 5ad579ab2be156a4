use std::sync::Arc;

use axum::{
    Router,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, Request, State},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tokio::io::AsyncWriteExt;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::config::Mode;
use crate::cors::cors;
use crate::error::AppError;
use crate::models::Listing;
use crate::{pages, qr, AppState};

type AppResult<T> = Result<T, AppError>;

/// Full application router for the configured mode, CORS and tracing included
pub fn router(state: Arc<AppState>) -> Router {
    let routes = match state.config.mode {
        Mode::Upload => upload_routes(state.config.max_upload_size),
        Mode::Browse => browse_routes(),
    };

    routes
        .layer(middleware::from_fn(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─── Upload Mode ─────────────────────────────────────────────────

pub fn upload_routes(max_upload_size: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(qr::show_qrcode))
        .route("/index", get(pages::upload_page))
        .route(
            "/upload",
            post(upload_files).layer(DefaultBodyLimit::max(max_upload_size)),
        )
}

/// Stream every `file` part of a multipart body into the root directory.
///
/// The first failure aborts the request; files already written stay on disk.
async fn upload_files(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<impl IntoResponse> {
    let mut multipart = multipart.map_err(|e| AppError::Multipart(e.body_text()))?;
    let mut stored = 0usize;

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        let destination = state.root.upload_destination(&file_name).await?;
        let mut file = tokio::fs::File::create(&destination).await?;
        let mut written = 0u64;
        while let Some(chunk) = field.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::info!("Stored upload: {} ({} bytes)", file_name, written);
        stored += 1;
    }

    tracing::info!("Upload request finished, {} file(s) stored", stored);
    Ok((
        [("content-type", "text/plain; charset=utf-8")],
        format!("All {} file(s) uploaded successfully\n", stored),
    ))
}

// ─── Browse Mode ─────────────────────────────────────────────────

pub fn browse_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(serve_path))
        .route("/*path", get(serve_path))
}

/// List a directory or send a file from under the root
async fn serve_path(State(state): State<Arc<AppState>>, request: Request) -> AppResult<Response> {
    let resolved = state.root.resolve(request.uri().path())?;
    let path = resolved.path;

    let meta = match tokio::fs::metadata(&path).await {
        Ok(meta) => meta,
        Err(_) => return Err(AppError::NotFound(resolved.display)),
    };
    state.root.ensure_contained(&path).await?;

    if meta.is_dir() {
        tracing::debug!("Listing directory {}", path.display());
        let entries = state.root.list(&path, &resolved.href).await?;
        let listing = Listing {
            path: resolved.display,
            href: resolved.href,
            entries,
        };
        return Ok(Html(pages::render_listing(&listing)?).into_response());
    }

    // ServeFile handles content type, ranges and conditional requests.
    let response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    Ok(response.into_response())
}
