use std::sync::Arc;

use crate::config::Config;
use crate::generation::generator::ProposalService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub proposals: Arc<ProposalService>,
    /// Read-only after startup; surfaced by the health check.
    pub config: Config,
}
