use std::collections::HashMap;
use std::env;
use tracing::warn;

use crate::services::DEFAULT_WINDOW_SIZE;

/// Runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub window_size: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    ///
    /// Every variable has a default. An unusable `SLIDING_WINDOW_SIZE`
    /// (non-numeric or zero) falls back to the default with a warning
    /// rather than failing startup.
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let window_size = vars
            .get("SLIDING_WINDOW_SIZE")
            .map(|raw| match raw.parse::<usize>() {
                Ok(value) if value > 0 => value,
                _ => {
                    warn!(
                        value = %raw,
                        default = DEFAULT_WINDOW_SIZE,
                        "Unusable SLIDING_WINDOW_SIZE, using default"
                    );
                    DEFAULT_WINDOW_SIZE
                }
            })
            .unwrap_or(DEFAULT_WINDOW_SIZE);

        Config {
            bind_address,
            window_size,
        }
    }
}
