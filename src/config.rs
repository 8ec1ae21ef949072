//! Global Runtime Configuration
//!
//! Process-wide limits set once from the loaded [`HeliumConfig`]. Scanners
//! read them without threading the whole config through every call.

use std::sync::OnceLock;

use crate::models::config::HeliumConfig;

static CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub max_file_size_bytes: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 5 * 1024 * 1024,
        }
    }
}

impl From<&HeliumConfig> for RuntimeConfig {
    fn from(config: &HeliumConfig) -> Self {
        Self {
            max_file_size_bytes: config.search.max_file_size_bytes(),
        }
    }
}

pub fn init(config: &HeliumConfig) {
    let _ = CONFIG.set(RuntimeConfig::from(config));
}

pub fn max_file_size_bytes() -> u64 {
    config().max_file_size_bytes
}

fn config() -> RuntimeConfig {
    CONFIG.get().cloned().unwrap_or_default()
}
