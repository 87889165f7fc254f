// src/config.rs
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{Result, RunnerError};

pub const DEFAULT_SERVICE_NAME: &str = "Verilog compiler server";

/// High-level application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub service_name: String,
    /// Argv prefix of the compiler, e.g. `["iverilog"]`.
    pub compiler: Vec<String>,
    /// Argv prefix of the simulator, e.g. `["vvp"]`.
    pub simulator: Vec<String>,
    /// Parent directory for request workspaces. `None` uses the system temp dir.
    pub workspace_dir: Option<PathBuf>,
    /// Upper bound on each external process. `None` waits forever.
    pub process_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            compiler: vec!["iverilog".to_string()],
            simulator: vec!["vvp".to_string()],
            workspace_dir: None,
            process_timeout: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    /// Unset or blank keys fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = AppConfig::default();

        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port
                .parse()
                .map_err(|_| RunnerError::Config(format!("PORT must be a port number, got '{}'", port)))?;
        }
        if let Some(name) = get("SERVICE_NAME") {
            config.service_name = name;
        }
        if let Some(cmd) = get("COMPILER_CMD") {
            config.compiler = split_command(&cmd);
        }
        if let Some(cmd) = get("SIMULATOR_CMD") {
            config.simulator = split_command(&cmd);
        }
        if let Some(dir) = get("WORKSPACE_DIR") {
            config.workspace_dir = Some(PathBuf::from(dir));
        }
        if let Some(secs) = get("PROCESS_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                RunnerError::Config(format!("PROCESS_TIMEOUT_SECS must be a whole number, got '{}'", secs))
            })?;
            if secs == 0 {
                return Err(RunnerError::Config(
                    "PROCESS_TIMEOUT_SECS must be greater than zero".to_string(),
                ));
            }
            config.process_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn split_command(cmd: &str) -> Vec<String> {
    cmd.split_whitespace().map(|s| s.to_string()).collect()
}
