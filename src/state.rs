// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::gemini::GeminiProvider;
use crate::services::provider::ChatProvider;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub provider: Arc<dyn ChatProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(GeminiProvider::new(config)))
    }
}
