use std::sync::Arc;

use crate::config::Config;
use crate::db::DocumentStore;
use crate::services::{EventRegistry, PollEngine, WritePolicy};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn write_policy(&self) -> WritePolicy {
        WritePolicy {
            max_attempts: self.config.max_write_attempts,
            store_timeout: self.config.store_timeout,
        }
    }

    pub fn events(&self) -> EventRegistry {
        EventRegistry::new(self.store.clone(), self.write_policy())
    }

    pub fn polls(&self) -> PollEngine {
        PollEngine::new(self.store.clone(), self.write_policy())
    }
}
