use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    PathEscapesRoot(String),
    Multipart(String),
    Encoding(String),
    Render(std::fmt::Error),
    IoError(std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(path) => (
                StatusCode::NOT_FOUND,
                format!("404 page not found: {}", path),
            ),
            AppError::PathEscapesRoot(path) => {
                tracing::warn!("Rejected path outside root: {}", path);
                (StatusCode::FORBIDDEN, "403 forbidden".to_string())
            }
            // Multipart parse errors are passed through verbatim
            AppError::Multipart(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Encoding(msg) => {
                tracing::error!("Encoding failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Rendering failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::IoError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("I/O error: {}", e),
            ),
        };

        (
            status,
            [("content-type", "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::IoError(e)
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Multipart(e.body_text())
    }
}

impl From<std::fmt::Error> for AppError {
    fn from(e: std::fmt::Error) -> Self {
        AppError::Render(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        let cases = [
            (AppError::NotFound("/x".into()), StatusCode::NOT_FOUND),
            (AppError::PathEscapesRoot("../x".into()), StatusCode::FORBIDDEN),
            (AppError::Multipart("bad".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Encoding("qr".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Render(std::fmt::Error), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn io_errors_become_internal_errors() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
    }
}
