use async_trait::async_trait;
use serde::Deserialize;
use wordlens_config::wordnik::WordnikConfig;
use wordlens_core::resolve::{LookupError, WordSource};
use wordlens_core::types::Definition;

/// Thin wrapper over the Wordnik v4 API. Every call is a single round-trip;
/// retry policy lives in the resolver, not here.
#[derive(Clone)]
pub struct WordnikClient {
    config: WordnikConfig,
    client: reqwest::Client,
}

impl WordnikClient {
    pub fn new(config: WordnikConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl WordSource for WordnikClient {
    async fn random_word(&self) -> Result<String, LookupError> {
        let url = format!("{}/words.json/randomWord", self.config.api_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("hasDictionaryDef", "true"),
                ("api_key", &self.config.api_key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body: RandomWordResponse = response.json().await?;
        if body.word.is_empty() {
            return Err(LookupError::Api("random word response had no word".to_string()));
        }

        tracing::debug!(word = %body.word, "drew random word");
        Ok(body.word)
    }

    async fn definitions(&self, word: &str) -> Result<Vec<Definition>, LookupError> {
        let url = format!("{}/word.json/{}/definitions", self.config.api_url, word);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("sourceDictionaries", self.config.source_dictionaries.join(",")),
                ("useCanonical", "true".to_string()),
                ("api_key", self.config.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let entries: Vec<RawDefinition> = response.json().await?;

        // Wordnik sometimes returns textless stub entries; a Definition's
        // text is non-empty prose, so those are dropped here.
        let definitions = entries
            .into_iter()
            .filter_map(|entry| {
                let text = entry.text.filter(|t| !t.is_empty())?;
                Some(Definition {
                    text,
                    part_of_speech: entry.part_of_speech,
                })
            })
            .collect();

        Ok(definitions)
    }
}

#[derive(Deserialize)]
struct RandomWordResponse {
    #[serde(default)]
    word: String,
}

#[derive(Deserialize)]
struct RawDefinition {
    #[serde(default)]
    text: Option<String>,
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: Option<String>,
}
