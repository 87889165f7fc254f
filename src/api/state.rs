// src/api/state.rs
use crate::config::AppConfig;
use crate::process::{ProcessRunner, SystemRunner};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub runner: Arc<dyn ProcessRunner>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let runner = SystemRunner::new(config.process_timeout);
        Self::with_runner(config, Arc::new(runner))
    }

    pub fn with_runner(config: AppConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            config: Arc::new(config),
            runner,
        }
    }
}
