//! Thin HTTP client for the generation endpoints.
//!
//! - `generate_image` posts a text prompt and returns the first inline
//!   image payload from the response candidates.
//! - `generate_speech` requests audio with a fixed prebuilt voice.
//! - `analyze_image` sends an image plus an instruction and returns the
//!   model's text.
//!
//! The API credential is resolved per call; its absence fails before any
//! request is issued.
use std::str::FromStr;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};

const FLASH_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const PRO_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";
const TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";
const ANALYSIS_MODEL: &str = "gemini-3-flash-preview";
const TTS_VOICE: &str = "Kore";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "4:3")]
    Landscape,
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "9:16")]
    Tall,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Wide => "16:9",
            AspectRatio::Tall => "9:16",
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Square
    }
}

impl FromStr for AspectRatio {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1:1" => Ok(AspectRatio::Square),
            "3:4" => Ok(AspectRatio::Portrait),
            "4:3" => Ok(AspectRatio::Landscape),
            "16:9" => Ok(AspectRatio::Wide),
            "9:16" => Ok(AspectRatio::Tall),
            other => Err(AppError::Validation(format!(
                "unsupported aspect ratio '{}', expected one of 1:1, 3:4, 4:3, 16:9, 9:16",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateImageOptions {
    pub aspect_ratio: AspectRatio,
    pub use_pro: bool,
}

#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub base64: String,
    pub mime_type: String,
}

#[derive(Clone)]
pub struct GenClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GenClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        GenClient {
            client: Client::new(),
            base_url: base,
            api_key,
        }
    }

    fn key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or(AppError::MissingCredential)
    }

    async fn post_generate(&self, model: &str, body: Value) -> AppResult<Value> {
        let api_key = self.key()?;
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        tracing::debug!("Sending generation request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if response.status().is_success() {
            response.json().await.map_err(AppError::HttpClient)
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            let message = format!("status {}: {}", status, error_body);
            tracing::error!("Generation request failed: {}", message);
            Err(AppError::Generation(message))
        }
    }

    /// Generate an image from a text prompt.
    ///
    /// The pro tier selects the higher-quality model and requests a 2K
    /// output; callers gate it on the key-selection capability.
    pub async fn generate_image(
        &self,
        prompt: &str,
        options: GenerateImageOptions,
    ) -> AppResult<GeneratedImage> {
        let model = if options.use_pro { PRO_IMAGE_MODEL } else { FLASH_IMAGE_MODEL };

        let mut image_config = json!({ "aspectRatio": options.aspect_ratio.as_str() });
        if options.use_pro {
            image_config["imageSize"] = json!("2K");
        }

        let body = json!({
            "contents": { "parts": [ { "text": prompt } ] },
            "config": { "imageConfig": image_config },
        });

        let value = self.post_generate(model, body).await?;
        first_inline_data(&value)
            .map(|(data, mime)| GeneratedImage {
                base64: data.to_string(),
                mime_type: mime.unwrap_or("image/png").to_string(),
            })
            .ok_or(AppError::NoPayload("no image data found in response"))
    }

    /// Generate speech audio for a text, returned as base64.
    pub async fn generate_speech(&self, text: &str) -> AppResult<String> {
        let body = json!({
            "contents": [ { "parts": [ { "text": text } ] } ],
            "config": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": TTS_VOICE },
                    },
                },
            },
        });

        let value = self.post_generate(TTS_MODEL, body).await?;
        first_inline_data(&value)
            .map(|(data, _)| data.to_string())
            .ok_or(AppError::NoPayload("no audio data generated"))
    }

    /// Describe an image. Returns the model's text, or a stock line when
    /// the response carries none.
    pub async fn analyze_image(
        &self,
        base64_data: &str,
        mime_type: &str,
        prompt: Option<&str>,
    ) -> AppResult<String> {
        let instruction = prompt.unwrap_or("Describe this image in detail.");
        let body = json!({
            "contents": {
                "parts": [
                    { "inlineData": { "mimeType": mime_type, "data": base64_data } },
                    { "text": instruction },
                ]
            },
        });

        let value = self.post_generate(ANALYSIS_MODEL, body).await?;
        Ok(first_text(&value).unwrap_or_else(|| "No description generated.".to_string()))
    }
}

/// First part of the first candidate carrying inline binary data, as
/// `(base64, mime_type)`.
fn first_inline_data(value: &Value) -> Option<(&str, Option<&str>)> {
    let parts = value.pointer("/candidates/0/content/parts")?.as_array()?;
    for part in parts {
        if let Some(inline) = part.get("inlineData") {
            if let Some(data) = inline.get("data").and_then(|d| d.as_str()) {
                let mime = inline.get("mimeType").and_then(|m| m.as_str());
                return Some((data, mime));
            }
        }
    }
    None
}

/// First non-empty text part of the first candidate.
fn first_text(value: &Value) -> Option<String> {
    let parts = value.pointer("/candidates/0/content/parts")?.as_array()?;
    parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .find(|t| !t.is_empty())
        .map(String::from)
}
