use serde::Deserialize;

/// A single dictionary sense as returned by the upstream service.
#[derive(Debug, Clone, Deserialize)]
pub struct Definition {
    pub text: String,
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: Option<String>,
}

impl Definition {
    pub fn new(text: impl Into<String>, part_of_speech: Option<&str>) -> Self {
        Self {
            text: text.into(),
            part_of_speech: part_of_speech.map(str::to_string),
        }
    }
}

/// One canonical word with its definitions, produced by the resolver.
///
/// `definitions` is never empty and `attempts` counts every definition
/// fetch performed to reach this result, re-rolls and redirects included.
#[derive(Debug, Clone)]
pub struct ResolutionResult {
    pub word: String,
    pub definitions: Vec<Definition>,
    pub attempts: u32,
}
