// src/models.rs
use serde::{Deserialize, Serialize};

pub const MISSING_CODE_MESSAGE: &str = "No Verilog code provided";

/// Body of `POST /run`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RunRequest {
    #[serde(default)]
    pub code: Option<String>,
}

impl RunRequest {
    /// The submitted source, or `None` when it is absent or empty.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref().filter(|code| !code.is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RunResponse {
    pub output: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
