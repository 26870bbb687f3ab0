use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_CONCEPT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";
const DEFAULT_VOICE: &str = "Kore";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for [`super::GeminiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub concept_model: String,
    pub speech_model: String,
    pub voice: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            concept_model: DEFAULT_CONCEPT_MODEL.to_string(),
            speech_model: DEFAULT_SPEECH_MODEL.to_string(),
            voice: DEFAULT_VOICE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read settings from the process environment.
    ///
    /// `GEMINI_API_KEY` (or `API_KEY`) supplies the key; `SCIVIZ_API_BASE`,
    /// `SCIVIZ_CONCEPT_MODEL`, `SCIVIZ_SPEECH_MODEL` and `SCIVIZ_VOICE`
    /// override the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let api_key = read("GEMINI_API_KEY")
            .or_else(|| read("API_KEY"))
            .unwrap_or_default();

        let mut config = Self::new(api_key.trim());
        if let Some(base) = read("SCIVIZ_API_BASE") {
            config.base_url = base.trim_end_matches('/').to_string();
        }
        if let Some(model) = read("SCIVIZ_CONCEPT_MODEL") {
            config.concept_model = model;
        }
        if let Some(model) = read("SCIVIZ_SPEECH_MODEL") {
            config.speech_model = model;
        }
        if let Some(voice) = read("SCIVIZ_VOICE") {
            config.voice = voice;
        }
        config
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// `generateContent` endpoint for `model`.
    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = GeminiConfig::from_lookup(lookup(&[]));
        assert!(!config.has_api_key());
        assert_eq!(config.voice, "Kore");
        assert_eq!(
            config.endpoint(&config.concept_model),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn falls_back_to_generic_key_and_applies_overrides() {
        let config = GeminiConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "  "),
            ("API_KEY", "secret"),
            ("SCIVIZ_API_BASE", "http://localhost:8080/v1/"),
            ("SCIVIZ_VOICE", "Puck"),
        ]));
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.voice, "Puck");
        assert_eq!(config.speech_model, "gemini-2.5-flash-preview-tts");
    }
}
