use std::sync::Arc;

use tokio::sync::RwLock;

use crate::ats::scoring::AtsScorer;
use crate::backend::BackendApi;
use crate::config::Config;
use crate::templates::export::ExportGuard;
use crate::templates::{RendererRegistry, TemplateCatalog};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn BackendApi>,
    pub config: Config,
    /// Built-in templates merged with the remote template table.
    /// Replaced wholesale after a seed run.
    pub catalog: Arc<RwLock<TemplateCatalog>>,
    pub renderers: Arc<RendererRegistry>,
    /// Pluggable ATS scorer. Default: FixedKeywordScorer.
    pub scorer: Arc<dyn AtsScorer>,
    /// One export in flight per user.
    pub export_guard: ExportGuard,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn BackendApi>,
        config: Config,
        catalog: TemplateCatalog,
        scorer: Arc<dyn AtsScorer>,
    ) -> Self {
        Self {
            backend,
            config,
            catalog: Arc::new(RwLock::new(catalog)),
            renderers: Arc::new(RendererRegistry::with_builtin()),
            scorer,
            export_guard: ExportGuard::new(),
        }
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use crate::ats::scoring::FixedKeywordScorer;
    use crate::backend::memory::MemoryBackend;
    use crate::config::TableIds;

    pub fn test_config() -> Config {
        Config {
            backend_url: "http://backend.test".to_string(),
            backend_api_key: "test-key".to_string(),
            backend_timeout_secs: 5,
            tables: TableIds::default(),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }

    pub fn test_state(backend: Arc<MemoryBackend>) -> AppState {
        AppState::new(
            backend,
            test_config(),
            TemplateCatalog::builtin(),
            Arc::new(FixedKeywordScorer),
        )
    }
}
