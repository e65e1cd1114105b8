//! LLM module - completion backend integrations
//!
//! Provides the backend abstraction with OpenAI as the primary implementation.

pub mod openai;
pub mod traits;

pub use openai::OpenAiClient;
pub use traits::{Completion, CompletionBackend, CompletionOptions, ContentSegment};
