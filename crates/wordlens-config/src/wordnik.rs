use std::env;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const DEFAULT_API_URL: &str = "https://api.wordnik.com/v4";
const DEFAULT_SOURCE_DICTS: &str = "ahd,wiktionary,webster,wordnet";

#[derive(Clone, Serialize, Deserialize)]
pub struct WordnikConfig {
    pub api_key: String,
    pub api_url: String,
    /// Allow-list of upstream source dictionaries for definition lookups
    pub source_dictionaries: Vec<String>,
}

impl WordnikConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("WORDNIK_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let api_url =
            env::var("WORDNIK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let source_dictionaries = env::var("WORDLENS_SOURCE_DICTS")
            .unwrap_or_else(|_| DEFAULT_SOURCE_DICTS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            api_key,
            api_url,
            source_dictionaries,
        })
    }
}
