//! OpenAI chat completions client that structures DIY pages

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::{ExtractedProject, IngestError, ProjectExtractor};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 120;

const SYSTEM_PROMPT: &str = "You extract structured data from DIY project pages. \
Use only the text provided and do not invent anything. \
Answer with a single JSON object and nothing else.";

const SCHEMA_PROMPT: &str = r#"Extract the following from this DIY page's text and return it as JSON:

{
  "title": "string",
  "description": "string",
  "avg_price": float or null,
  "step_count": integer,
  "estimated_time_minutes": integer or null,
  "is_rental_safe": boolean,
  "materials_json": ["string"],
  "tools_json": ["string"],
  "steps": [
    {"step_number": integer, "instruction_text": "string"}
  ]
}

Rental safe rule: is_rental_safe is false if a drill is required or holes are drilled.
If a value is not present in the text, use null.

Page text:
"#;

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiExtractor {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiExtractor {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, IngestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| IngestError::Extractor(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: OPENAI_BASE_URL.to_string(),
        })
    }
}

#[async_trait]
impl ProjectExtractor for OpenAiExtractor {
    async fn extract(&self, page_text: &str) -> Result<ExtractedProject, IngestError> {
        let messages = vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user",
                content: format!("{}{}", SCHEMA_PROMPT, page_text),
            },
        ];
        let body = json!({
            "model": self.model,
            "messages": messages,
            "response_format": {"type": "json_object"},
        });

        debug!("Requesting extraction from {}", self.model);
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| IngestError::Extractor(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IngestError::Extractor(format!(
                "completion request failed: {}",
                response.status()
            )));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| IngestError::Extractor(e.to_string()))?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| IngestError::MalformedExtraction("empty completion".to_string()))?;

        ExtractedProject::from_json(&content)
    }
}
