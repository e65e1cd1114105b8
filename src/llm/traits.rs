//! Completion backend trait for abstracting the LLM API
//!
//! Enables swapping the real OpenAI client for a stub in tests.

use async_trait::async_trait;

use crate::core::Result;

/// Options for a completion call
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    /// Response-size ceiling in output tokens
    pub max_output_tokens: u32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_output_tokens: 512,
        }
    }
}

/// One content part of a completion result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSegment {
    /// Plain text produced by the model
    Text(String),
    /// Non-text content (refusals, audio, images); ignored when extracting text
    Other,
}

/// Result of one completion call against the backend
#[derive(Debug, Clone, Default)]
pub struct Completion {
    /// Ordered content segments of the first choice
    pub segments: Vec<ContentSegment>,
    /// Model that generated the response
    pub model: String,
}

impl Completion {
    /// Create a completion holding a single text segment
    pub fn text_segment(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            segments: vec![ContentSegment::Text(text.into())],
            model: model.into(),
        }
    }

    /// Concatenate the payloads of all text segments, in order
    ///
    /// Non-text segments are skipped; an empty segment list yields the
    /// empty string.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            if let ContentSegment::Text(payload) = segment {
                out.push_str(payload);
            }
        }
        out
    }
}

/// Trait for completion backends
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run one system+user completion against the given model
    async fn complete(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<Completion>;

    /// Get the backend name
    fn name(&self) -> &str;
}
