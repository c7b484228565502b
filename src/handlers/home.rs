use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::state::AppState;
use crate::views;

/// Home page. No inputs, no repository call.
pub async fn index(_state: &AppState) -> Result<Response, AppError> {
    Ok(views::home_page().into_response())
}

/// About page.
pub async fn about(_state: &AppState) -> Result<Response, AppError> {
    Ok(views::about_page().into_response())
}
