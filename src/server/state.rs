use std::sync::Arc;

use crate::config::toml_config::TomlConfig;
use crate::core::engine::MatrixEngine;
use crate::utils::error::Result;

/// Shared application state for the HTTP server
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: TomlConfig,
    engine: MatrixEngine,
}

impl AppState {
    pub fn new(config: TomlConfig) -> Result<Self> {
        let engine = MatrixEngine::with_delimiter(config.delimiter()?);

        Ok(Self {
            inner: Arc::new(AppStateInner { config, engine }),
        })
    }

    pub fn config(&self) -> &TomlConfig {
        &self.inner.config
    }

    pub fn engine(&self) -> &MatrixEngine {
        &self.inner.engine
    }
}
