//! Static-registration route table and the dispatch entry point.
//!
//! Routes are literal (method, path) pairs registered once at startup and
//! matched by exact equality after trailing-slash normalization. No wildcard
//! or parameter segments; with only a handful of fixed pages, a linear scan
//! over the registration order is the whole matcher.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Query, State};
use axum::http::{Method, Uri};
use axum::response::Response;

use crate::error::AppError;
use crate::handlers;
use crate::input::{ParamMap, RequestInput};
use crate::state::AppState;

/// HTTP method constraint for a registered route. `Any` matches every method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMethod {
    Get,
    Post,
    Any,
}

impl RouteMethod {
    fn matches(self, method: &Method) -> bool {
        match self {
            RouteMethod::Get => method == Method::GET,
            RouteMethod::Post => method == Method::POST,
            RouteMethod::Any => true,
        }
    }
}

/// The closed set of dispatch targets.
///
/// The original design resolved controller classes and action names at
/// dispatch time and fell back to 404 when either was missing; an enum makes
/// that failure mode unrepresentable, leaving the route miss as the only 404
/// path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Home,
    About,
    InjuriesIndex,
    InjuriesSearch,
    DiagnosticIndex,
    DiagnosticResult,
    Health,
}

struct Route {
    method: RouteMethod,
    path: String,
    action: Action,
}

/// Routing table built once at startup and read-only thereafter.
#[derive(Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a route. No duplicate detection or validation; registration
    /// order is the tie-break between routes sharing a path.
    pub fn register(&mut self, method: RouteMethod, path: &str, action: Action) {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            action,
        });
    }

    pub fn get(&mut self, path: &str, action: Action) {
        self.register(RouteMethod::Get, path, action);
    }

    pub fn post(&mut self, path: &str, action: Action) {
        self.register(RouteMethod::Post, path, action);
    }

    pub fn any(&mut self, path: &str, action: Action) {
        self.register(RouteMethod::Any, path, action);
    }

    /// Select the first registered route matching the method and normalized
    /// path. `None` means 404.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<Action> {
        let path = normalize_path(path);
        self.routes
            .iter()
            .find(|route| route.method.matches(method) && route.path == path)
            .map(|route| route.action)
    }
}

/// Strip trailing slashes; an empty result is coerced back to `/`.
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Single axum entry point: resolves the route table, builds the sanitized
/// request input, and invokes the matching handler.
///
/// A query string is read on every method; a urlencoded body is read on
/// non-GET requests (form values win over query values, as in the classic
/// POST-then-GET lookup order). Malformed input degrades to an empty
/// parameter map rather than a client error, since every page treats its
/// inputs as optional.
pub async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    query: Result<Query<ParamMap>, QueryRejection>,
    form: Result<Form<ParamMap>, FormRejection>,
) -> Response {
    let path = normalize_path(uri.path());

    let Some(action) = state.routes.resolve(&method, path) else {
        // A plain miss, not an anomaly worth a warning.
        tracing::debug!("No route matched {} {}", method, path);
        return AppError::PageNotFound.render(state.config.debug);
    };

    tracing::debug!("Dispatching {} {} to {:?}", method, path, action);

    let input = RequestInput::new(
        query.map(|Query(q)| q).unwrap_or_default(),
        form.map(|Form(f)| f).unwrap_or_default(),
    );

    let result = match action {
        Action::Home => handlers::home::index(&state).await,
        Action::About => handlers::home::about(&state).await,
        Action::InjuriesIndex => handlers::injury::index(&state).await,
        Action::InjuriesSearch => handlers::injury::search(&state, &input).await,
        Action::DiagnosticIndex => handlers::diagnostic::index(&state).await,
        Action::DiagnosticResult => handlers::diagnostic::result(&state, &input).await,
        Action::Health => handlers::health::health(&state).await,
    };

    match result {
        Ok(response) => response,
        Err(error) => error.render(state.config.debug),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_strips_trailing_slashes() {
        assert_eq!(normalize_path("/injuries/"), "/injuries");
        assert_eq!(normalize_path("/injuries"), "/injuries");
        assert_eq!(normalize_path("/injuries///"), "/injuries");
    }

    #[test]
    fn test_normalize_path_coerces_empty_to_root() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("///"), "/");
    }

    #[test]
    fn test_resolve_exact_match() {
        let mut table = RouteTable::new();
        table.get("/injuries", Action::InjuriesIndex);
        table.get("/about", Action::About);

        assert_eq!(
            table.resolve(&Method::GET, "/injuries"),
            Some(Action::InjuriesIndex)
        );
        assert_eq!(table.resolve(&Method::GET, "/about"), Some(Action::About));
    }

    #[test]
    fn test_resolve_trailing_slash_round_trip() {
        // Registering /injuries and dispatching /injuries/ resolves to the
        // same action.
        let mut table = RouteTable::new();
        table.get("/injuries", Action::InjuriesIndex);

        assert_eq!(
            table.resolve(&Method::GET, "/injuries/"),
            table.resolve(&Method::GET, "/injuries")
        );
        assert_eq!(
            table.resolve(&Method::GET, "/injuries/"),
            Some(Action::InjuriesIndex)
        );
    }

    #[test]
    fn test_resolve_unknown_path_is_none() {
        let mut table = RouteTable::new();
        table.get("/injuries", Action::InjuriesIndex);

        assert_eq!(table.resolve(&Method::GET, "/nope"), None);
        assert_eq!(table.resolve(&Method::POST, "/nope"), None);
        assert_eq!(table.resolve(&Method::DELETE, "/nope"), None);
    }

    #[test]
    fn test_resolve_method_mismatch_is_none() {
        let mut table = RouteTable::new();
        table.get("/injuries", Action::InjuriesIndex);

        assert_eq!(table.resolve(&Method::POST, "/injuries"), None);
    }

    #[test]
    fn test_any_matches_every_method() {
        let mut table = RouteTable::new();
        table.any("/injuries/search", Action::InjuriesSearch);

        for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
            assert_eq!(
                table.resolve(&method, "/injuries/search"),
                Some(Action::InjuriesSearch),
                "ANY should match {method}"
            );
        }
    }

    #[test]
    fn test_first_registered_route_wins_on_shared_path() {
        // GET registered before ANY: a GET request takes the first.
        let mut table = RouteTable::new();
        table.get("/page", Action::Home);
        table.any("/page", Action::About);

        assert_eq!(table.resolve(&Method::GET, "/page"), Some(Action::Home));
        // Non-GET methods fall through to the ANY route.
        assert_eq!(table.resolve(&Method::POST, "/page"), Some(Action::About));

        // ANY registered before GET: ANY shadows the GET route entirely.
        let mut table = RouteTable::new();
        table.any("/page", Action::About);
        table.get("/page", Action::Home);

        assert_eq!(table.resolve(&Method::GET, "/page"), Some(Action::About));
    }

    #[test]
    fn test_root_route_matches_empty_and_slashed_paths() {
        let mut table = RouteTable::new();
        table.get("/", Action::Home);

        assert_eq!(table.resolve(&Method::GET, "/"), Some(Action::Home));
        assert_eq!(table.resolve(&Method::GET, ""), Some(Action::Home));
    }
}
