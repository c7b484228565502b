//! Route path constants and the startup routing table - single source of
//! truth for all site paths.

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::router::{Action, RouteTable, dispatch_handler};
use crate::state::AppState;

pub const HOME: &str = "/";
pub const HOME_ALIAS: &str = "/home";
pub const ABOUT: &str = "/about";
pub const INJURIES: &str = "/injuries";
pub const INJURIES_SEARCH: &str = "/injuries/search";
pub const DIAGNOSTIC: &str = "/diagnostic";
pub const DIAGNOSTIC_RESULT: &str = "/diagnostic/result";
pub const HEALTH: &str = "/health";

/// Build the routing table. Called once at startup; read-only afterwards.
pub fn route_table() -> RouteTable {
    let mut table = RouteTable::new();

    table.get(HOME, Action::Home);
    table.get(HOME_ALIAS, Action::Home);
    table.get(ABOUT, Action::About);

    table.get(INJURIES, Action::InjuriesIndex);
    table.any(INJURIES_SEARCH, Action::InjuriesSearch);

    table.get(DIAGNOSTIC, Action::DiagnosticIndex);
    table.any(DIAGNOSTIC_RESULT, Action::DiagnosticResult);

    table.get(HEALTH, Action::Health);

    table
}

/// Assemble the axum application. Every request funnels through the route
/// table via the fallback dispatcher.
pub fn app(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
