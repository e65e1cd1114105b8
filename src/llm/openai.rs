//! OpenAI client implementation
//!
//! Async HTTP client for the Chat Completions API, non-streaming.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{Config, DuologueError, Result};
use crate::llm::traits::{Completion, CompletionBackend, CompletionOptions, ContentSegment};

/// OpenAI API client
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    debug: bool,
}

/// Chat completions request
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_completion_tokens: u32,
    response_format: ResponseFormat,
}

/// Chat message wire format
#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response format selector ({"type": "text"})
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Chat completions response
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    model: String,
}

/// One choice in a chat completions response
#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

/// Assistant message within a choice; content is null for pure tool calls
#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    /// Create a new client from configuration
    ///
    /// Fails if no API key is configured in the file or the environment.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?.to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.openai.timeout_secs))
            .build()
            .map_err(|e| DuologueError::openai(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.openai.base_url.clone(),
            api_key,
            debug: config.dispatch.debug,
        })
    }

    /// Create a client with a custom base URL and key
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| DuologueError::openai(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            debug: false,
        })
    }

    /// Enable or disable debug output
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Convert a parsed response into a Completion
    fn to_completion(response: ChatResponse) -> Completion {
        let segments = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| vec![ContentSegment::Text(text)])
            .unwrap_or_default();

        Completion {
            segments,
            model: response.model,
        }
    }

    /// Debug print if enabled
    fn debug_print(&self, label: &str, content: &str) {
        if self.debug {
            if content.len() > 500 {
                eprintln!("DEBUG {}: {}...", label, &content[..500]);
            } else {
                eprintln!("DEBUG {}: {}", label, content);
            }
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<Completion> {
        let request = ChatRequest {
            model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: system_prompt,
                },
                WireMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_completion_tokens: options.max_output_tokens,
            response_format: ResponseFormat {
                format_type: "text",
            },
        };

        let request_json = serde_json::to_string(&request)?;
        self.debug_print("Request", &request_json);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    DuologueError::openai(format!(
                        "Cannot reach the OpenAI API at {}",
                        self.base_url
                    ))
                } else {
                    DuologueError::from(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(DuologueError::openai(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let response_text = response.text().await?;
        self.debug_print("Response", &response_text);

        let chat_response: ChatResponse = serde_json::from_str(&response_text)
            .map_err(|e| DuologueError::openai(format!("Failed to parse response: {}", e)))?;

        Ok(Self::to_completion(chat_response))
    }

    fn name(&self) -> &str {
        "openai"
    }
}
