//! Application state for the Port Tariff Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::llm::{ExplanationGenerator, GeminiClient, VesselTranslator};

/// Shared application state.
///
/// Holds the loaded tariff book and the language model collaborators. All
/// members are read-only and shared behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    translator: Arc<dyn VesselTranslator>,
    explainer: Arc<dyn ExplanationGenerator>,
}

impl AppState {
    /// Creates the state with a Gemini client acting as both collaborators.
    pub fn new(config: ConfigLoader, client: GeminiClient) -> Self {
        let client = Arc::new(client);
        Self {
            config: Arc::new(config),
            translator: client.clone(),
            explainer: client,
        }
    }

    /// Creates the state with explicit collaborators.
    pub fn with_collaborators(
        config: ConfigLoader,
        translator: Arc<dyn VesselTranslator>,
        explainer: Arc<dyn ExplanationGenerator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            translator,
            explainer,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the vessel translator.
    pub fn translator(&self) -> &dyn VesselTranslator {
        self.translator.as_ref()
    }

    /// Returns the explanation generator.
    pub fn explainer(&self) -> &dyn ExplanationGenerator {
        self.explainer.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone_and_shareable() {
        fn assert_axum_state<T: Clone + Send + Sync + 'static>() {}
        assert_axum_state::<AppState>();
    }
}
