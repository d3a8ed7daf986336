use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Tuning for the first name validators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Shortest accepted first name, in characters.
    #[serde(default = "default_first_name_min_len")]
    pub first_name_min_len: usize,
    /// Quiet period after the last edit before the async validator runs.
    #[serde(default = "default_async_debounce_ms")]
    pub async_debounce_ms: u64,
    /// Simulated latency of the async validator itself.
    #[serde(default = "default_async_delay_ms")]
    pub async_delay_ms: u64,
    /// Run the async validator even if the sync one already failed.
    #[serde(default)]
    pub async_always: bool,
}

/// Behaviour of the simulated remote collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Delay before the server answers.
    #[serde(default)]
    pub latency_ms: u64,
    /// Identifier handed out to every created person.
    #[serde(default = "default_assigned_id")]
    pub assigned_id: u64,
    /// First names the server refuses.
    #[serde(default = "default_taken_names")]
    pub taken_names: Vec<String>,
}

fn default_first_name_min_len() -> usize {
    3
}

fn default_async_debounce_ms() -> u64 {
    500
}

fn default_async_delay_ms() -> u64 {
    1000
}

fn default_assigned_id() -> u64 {
    23
}

fn default_taken_names() -> Vec<String> {
    vec!["Heinz".to_string()]
}

impl ValidationConfig {
    pub fn async_debounce(&self) -> Duration {
        Duration::from_millis(self.async_debounce_ms)
    }

    pub fn async_delay(&self) -> Duration {
        Duration::from_millis(self.async_delay_ms)
    }
}

impl ServerConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            first_name_min_len: default_first_name_min_len(),
            async_debounce_ms: default_async_debounce_ms(),
            async_delay_ms: default_async_delay_ms(),
            async_always: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            assigned_id: default_assigned_id(),
            taken_names: default_taken_names(),
        }
    }
}
