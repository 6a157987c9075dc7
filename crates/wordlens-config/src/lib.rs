use serde::{Deserialize, Serialize};

use self::ui::UiConfig;
use self::wordnik::WordnikConfig;

pub mod ui;
pub mod wordnik;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "no Wordnik API key found: set WORDNIK_API_KEY in the environment or in .env\n\
         (keys are free at https://developer.wordnik.com)"
    )]
    MissingApiKey,
}

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub wordnik: WordnikConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Assemble the full config from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            wordnik: WordnikConfig::from_env()?,
            ui: UiConfig::from_env(),
        })
    }
}
