//! Blocking client for the `generateContent` endpoint.

use log::{debug, info};
use reqwest::blocking::Client;
use serde_json::{json, Value};

use crate::asset::AudioAsset;
use crate::concept::{ConceptData, ConceptGenerator};
use crate::pcm::decode_speech;

use super::prompt::{concept_prompt, SYSTEM_INSTRUCTION};
use super::{GeminiConfig, ServiceError};

/// Generation service client producing concepts and narrated speech.
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ServiceError> {
        if !config.has_api_key() {
            return Err(ServiceError::MissingApiKey);
        }
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("sciviz/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    fn generate_content(&self, model: &str, body: &Value) -> Result<Value, ServiceError> {
        let url = self.config.endpoint(model);
        debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl ConceptGenerator for GeminiClient {
    fn generate_concept(&self, prompt: &str) -> Result<ConceptData, ServiceError> {
        info!("Requesting concept for \"{}\"", prompt);
        let response = self.generate_content(
            &self.config.concept_model,
            &concept_request(prompt),
        )?;
        parse_concept(&response)
    }

    fn generate_speech(&self, text: &str) -> Result<AudioAsset, ServiceError> {
        info!("Requesting narration ({} chars)", text.chars().count());
        let response = self.generate_content(
            &self.config.speech_model,
            &speech_request(text, &self.config.voice),
        )?;
        let payload = inline_audio(&response)?;
        Ok(decode_speech(payload)?)
    }
}

/// Request body asking for a JSON concept.
pub(crate) fn concept_request(term: &str) -> Value {
    json!({
        "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "contents": [{ "role": "user", "parts": [{ "text": concept_prompt(term) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING" },
                    "svgCode": {
                        "type": "STRING",
                        "description": "The full raw SVG string with animations, defs, and filters."
                    },
                    "explanation": {
                        "type": "STRING",
                        "description": "The text explanation script in Chinese."
                    }
                },
                "required": ["title", "svgCode", "explanation"]
            }
        }
    })
}

/// Request body asking for narrated audio of `text`.
pub(crate) fn speech_request(text: &str, voice: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": text }] }],
        "generationConfig": {
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": voice } }
            }
        }
    })
}

fn first_parts(response: &Value) -> Option<&Vec<Value>> {
    response
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
}

/// Concatenated text parts of the first candidate.
pub(crate) fn response_text(response: &Value) -> Result<String, ServiceError> {
    let text: String = first_parts(response)
        .into_iter()
        .flatten()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if text.trim().is_empty() {
        return Err(ServiceError::EmptyResponse("text"));
    }
    Ok(text)
}

pub(crate) fn parse_concept(response: &Value) -> Result<ConceptData, ServiceError> {
    let text = response_text(response)?;
    Ok(serde_json::from_str(text.trim())?)
}

/// Base64 audio payload of the first candidate's first part.
pub(crate) fn inline_audio(response: &Value) -> Result<&str, ServiceError> {
    response
        .pointer("/candidates/0/content/parts/0/inlineData/data")
        .and_then(Value::as_str)
        .filter(|data| !data.is_empty())
        .ok_or(ServiceError::EmptyResponse("audio data"))
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().chars().take(200).collect())
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    use super::*;

    #[test]
    fn concept_request_requires_all_fields() {
        let body = concept_request("黑洞");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"],
            json!(["title", "svgCode", "explanation"])
        );
        let user = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(user.contains("\"黑洞\""));
        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("0 0 1200 800"));
    }

    #[test]
    fn speech_request_selects_voice() {
        let body = speech_request("你好", "Kore");
        assert_eq!(body["generationConfig"]["responseModalities"], json!(["AUDIO"]));
        assert_eq!(
            body["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]
                ["voiceName"],
            "Kore"
        );
        assert_eq!(body["contents"][0]["parts"][0]["text"], "你好");
    }

    #[test]
    fn parses_concept_split_across_parts() {
        let response = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "{\"title\":\"相对论\"," },
                        { "text": "\"svgCode\":\"<svg></svg>\",\"explanation\":\"时空弯曲\"}" }
                    ]
                }
            }]
        });
        let concept = parse_concept(&response).expect("parse concept");
        assert_eq!(concept.title, "相对论");
        assert_eq!(concept.explanation, "时空弯曲");
    }

    #[test]
    fn missing_text_is_an_empty_response() {
        let response = json!({ "candidates": [] });
        assert!(matches!(
            parse_concept(&response),
            Err(ServiceError::EmptyResponse("text"))
        ));
        let response = json!({ "candidates": [{ "content": { "parts": [{ "text": "not json" }] } }] });
        assert!(matches!(parse_concept(&response), Err(ServiceError::Parse(_))));
    }

    #[test]
    fn extracts_and_decodes_inline_audio() {
        let data = STANDARD.encode([0u8; 480]);
        let response = json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "mimeType": "audio/L16;rate=24000", "data": data } }] }
            }]
        });
        let payload = inline_audio(&response).expect("audio payload");
        let asset = decode_speech(payload).expect("decode");
        assert_eq!(asset.frames(), 240);
        assert!(inline_audio(&json!({})).is_err());
    }

    #[test]
    fn api_errors_prefer_structured_message() {
        assert_eq!(
            api_error_message(r#"{"error":{"code":403,"message":"API key not valid"}}"#),
            "API key not valid"
        );
        assert_eq!(api_error_message("  bad gateway \n"), "bad gateway");
    }

    #[test]
    fn client_requires_api_key() {
        assert!(matches!(
            GeminiClient::new(GeminiConfig::new("")),
            Err(ServiceError::MissingApiKey)
        ));
    }
}
