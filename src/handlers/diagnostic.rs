use axum::response::{IntoResponse, Redirect, Response};

use crate::error::AppError;
use crate::input::RequestInput;
use crate::routes;
use crate::state::AppState;
use crate::views;

/// Body-part label shown to the visitor -> stored match key.
///
/// Labels absent from this table are used verbatim as the search token; that
/// is the fallback, not an error.
const BODY_PART_TOKENS: &[(&str, &str)] = &[
    ("Ankle sprain", "ankle"),
    ("Ankle", "ankle"),
    ("Elbow", "elbow"),
    ("Groin", "groin"),
    ("Neck", "neck"),
    ("Thighs", "thighs"),
    ("Knee", "knee"),
];

pub fn search_token(label: &str) -> &str {
    BODY_PART_TOKENS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, token)| *token)
        .unwrap_or(label)
}

/// GET /diagnostic - the questionnaire page.
pub async fn index(_state: &AppState) -> Result<Response, AppError> {
    Ok(views::diagnostic_page().into_response())
}

/// GET|POST /diagnostic/result - look up a suggested diagnosis for the
/// body-part label carried in the `action` field.
///
/// Empty input and lookup misses both send the visitor back to the
/// questionnaire instead of an error page.
pub async fn result(state: &AppState, input: &RequestInput) -> Result<Response, AppError> {
    let body_part = input.param("action", "");

    if body_part.is_empty() {
        return Ok(Redirect::to(routes::DIAGNOSTIC).into_response());
    }

    let token = search_token(&body_part);

    match state.diagnostics.get_by_name(token).await {
        Some(diagnostic) => {
            tracing::info!("Diagnostic lookup for '{}' matched '{}'", body_part, diagnostic.name);
            Ok(views::diagnostic_result_page(&diagnostic, &body_part).into_response())
        }
        None => {
            tracing::info!("Diagnostic lookup for '{}' found no match", body_part);
            Ok(Redirect::to(routes::DIAGNOSTIC).into_response())
        }
    }
}
