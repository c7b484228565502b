use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::input::RequestInput;
use crate::state::AppState;
use crate::views;

/// GET /injuries - list every injury in the catalog, ordered by name.
pub async fn index(state: &AppState) -> Result<Response, AppError> {
    let injuries = state.injuries.get_all().await;

    tracing::info!("Listed {} injuries", injuries.len());
    Ok(views::injuries_page(None, &injuries).into_response())
}

/// GET|POST /injuries/search - keyword search over injury names.
///
/// The keyword arrives in the `action` field (query or form). An empty or
/// absent keyword renders the search page with no results and no echoed
/// term, without touching the store.
pub async fn search(state: &AppState, input: &RequestInput) -> Result<Response, AppError> {
    let keyword = input.param("action", "");

    if keyword.is_empty() {
        return Ok(views::injuries_page(None, &[]).into_response());
    }

    let results = state.injuries.get_by_name(&keyword).await;

    tracing::info!("Injury search for '{}' returned {} results", keyword, results.len());
    Ok(views::injuries_page(Some(&keyword), &results).into_response())
}
