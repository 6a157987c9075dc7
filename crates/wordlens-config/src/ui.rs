use std::env;

use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Seconds between automatic refreshes
    pub refresh_secs: u64,
}

impl UiConfig {
    pub fn from_env() -> Self {
        let refresh_secs = env::var("WORDLENS_REFRESH_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        Self { refresh_secs }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { refresh_secs: 60 }
    }
}
