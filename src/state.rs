use std::sync::Arc;

use crate::config::Config;
use crate::repository::{DiagnosticRepository, InjuryRepository};
use crate::router::RouteTable;
use crate::store::SpannerStore;

/// Shared application state, assembled once in the composition root.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub routes: Arc<RouteTable>,
    pub store: SpannerStore,
    pub injuries: InjuryRepository,
    pub diagnostics: DiagnosticRepository,
}

impl AppState {
    pub fn new(config: Config, routes: RouteTable, store: SpannerStore) -> Self {
        Self {
            config: Arc::new(config),
            routes: Arc::new(routes),
            injuries: InjuryRepository::new(store.clone()),
            diagnostics: DiagnosticRepository::new(store.clone()),
            store,
        }
    }
}
