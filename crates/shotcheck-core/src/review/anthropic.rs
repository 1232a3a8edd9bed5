//! Anthropic reviewer using the Messages API.
//!
//! Sends one base64 image block plus one text block per request and takes
//! the first text segment of the response as the analysis.

use super::reviewer::Reviewer;
use crate::encode::EncodedScreenshot;
use crate::error::ReviewError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Reviewer backed by the Anthropic Messages API.
pub struct AnthropicReviewer {
    api_key: String,
    model: String,
    max_tokens: u32,
    client: reqwest::Client,
}

impl AnthropicReviewer {
    pub fn new(api_key: &str, model: &str, max_tokens: u32) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens,
            client: reqwest::Client::new(),
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: Vec<ContentBlock>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "image")]
    Image { source: ImageSource },
    #[serde(rename = "text")]
    Text { text: String },
}

#[derive(Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    source_type: String,
    media_type: String,
    data: String,
}

// --- Response types ---

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    text: Option<String>,
}

#[async_trait]
impl Reviewer for AnthropicReviewer {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn review(
        &self,
        image: &EncodedScreenshot,
        prompt: &str,
    ) -> Result<String, ReviewError> {
        let body = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![
                    ContentBlock::Image {
                        source: ImageSource {
                            source_type: "base64".to_string(),
                            media_type: image.media_type.clone(),
                            data: image.data.clone(),
                        },
                    },
                    ContentBlock::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
        };

        let resp = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ReviewError::Transport {
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ReviewError::Auth {
                    status: status.as_u16(),
                    message: text,
                });
            }
            return Err(ReviewError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let messages_resp: MessagesResponse =
            resp.json().await.map_err(|e| ReviewError::Malformed {
                message: format!("failed to parse response body: {e}"),
            })?;

        messages_resp
            .content
            .into_iter()
            .find_map(|c| c.text)
            .ok_or_else(|| ReviewError::Malformed {
                message: "response contained no text content".to_string(),
            })
    }
}
