use crate::config::Config;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One-shot text generation from a (system instruction, user content) pair.
///
/// Implementations never fail loudly: an empty string means "no result".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system_instruction: &str, user_content: &str) -> String;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct AIService {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl AIService {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            timeout: Duration::from_secs(config.llm_timeout_secs),
        }
    }

    async fn generate_content(&self, system_instruction: &str, user_content: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let payload = GenerateContentRequest {
            system_instruction: Content {
                parts: vec![Part {
                    text: system_instruction,
                }],
            },
            contents: vec![Content {
                parts: vec![Part { text: user_content }],
            }],
        };

        let res = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Gemini API Error {}: {}", status, text).into());
        }

        let body: GenerateContentResponse = res.json().await?;
        body.first_text()
            .ok_or_else(|| anyhow::anyhow!("Invalid Gemini response format").into())
    }
}

#[async_trait]
impl TextGenerator for AIService {
    async fn generate(&self, system_instruction: &str, user_content: &str) -> String {
        match self.generate_content(system_instruction, user_content).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, model = %self.model, "Generation request failed");
                String::new()
            }
        }
    }
}
