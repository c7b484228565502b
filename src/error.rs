use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::views;

/// Failure surface of the controller/router boundary.
///
/// Only this boundary produces user-visible status codes; the repository
/// layer resolves storage faults to empty values and never reaches here.
#[derive(Debug)]
pub enum AppError {
    /// A page or template that should exist could not be resolved.
    PageNotFound,
    /// Unexpected application failure.
    Internal(anyhow::Error),
}

impl AppError {
    /// Render the error as an HTML page. The 500 page carries the failure
    /// detail only when the instance runs in debug mode; either way the
    /// failure is logged server-side.
    pub fn render(self, debug: bool) -> Response {
        match self {
            AppError::PageNotFound => {
                (StatusCode::NOT_FOUND, views::not_found_page()).into_response()
            }
            AppError::Internal(err) => {
                tracing::error!("Unhandled application failure: {err:#}");
                let detail = debug.then(|| format!("{err:#}"));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    views::server_error_page(detail.as_deref()),
                )
                    .into_response()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.render(false)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}
