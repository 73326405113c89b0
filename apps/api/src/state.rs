use std::sync::Arc;

use crate::ai::service::AiService;
use crate::config::Config;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Injected storage seam. `MemoryStore` in this build; a durable backend
    /// replaces the implementation without touching handlers.
    pub store: Arc<dyn RecordStore>,
    pub ai: Arc<AiService>,
    pub config: Config,
}
