use anyhow::{anyhow, Context};
use async_trait::async_trait;
use mockall::automock;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
    pub max_tokens: u32,
    pub stream: bool,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionMessage {
    pub role: Option<String>,
    pub content: Option<String>,
}

impl ChatCompletionMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: Some(String::from("system")),
            content: Some(content.to_string()),
        }
    }

    pub fn user(content: String) -> Self {
        Self {
            role: Some(String::from("user")),
            content: Some(content),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatCompletionResponseChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponseChoice {
    pub message: Option<ChatCompletionMessage>,
}

impl ChatCompletionResponse {
    /// Text content of the first choice, if the model produced any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
    }
}

/// Anything that can answer a chat completion request.
#[automock]
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn call_model(
        &self,
        payload: ChatCompletionRequest,
    ) -> anyhow::Result<ChatCompletionResponse>;
}

pub struct OpenAI {
    api_key: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenAI {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            api_key,
            timeout,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatModel for OpenAI {
    // A single attempt per call, bounded by the configured timeout.
    async fn call_model(
        &self,
        payload: ChatCompletionRequest,
    ) -> anyhow::Result<ChatCompletionResponse> {
        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .with_context(|| "Failed to call open ai chat completion endpoint")?;

        let status = response.status();
        if status != StatusCode::OK {
            let response_body = response
                .text()
                .await
                .with_context(|| "Failed to extract text from openai error body")?;

            return Err(anyhow!("Error calling openai ({status}): {response_body}"));
        }

        response
            .json::<ChatCompletionResponse>()
            .await
            .with_context(|| "Failed to decode openai chat completion response")
    }
}
