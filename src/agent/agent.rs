//! Conversational agent
//!
//! A named persona that produces one formatted reply per invocation via
//! the completion backend.

use std::sync::Arc;

use crate::core::{AgentProfile, DuologueError, Result};
use crate::llm::{CompletionBackend, CompletionOptions};

/// A configured persona backed by the completion API
#[derive(Clone)]
pub struct Agent {
    /// Display name, prefixed onto every response
    name: String,
    /// System instruction fixing the persona
    system_prompt: String,
    /// Model that serves this agent's requests
    model: String,
    /// Completion backend
    backend: Arc<dyn CompletionBackend>,
    /// Per-call completion options
    options: CompletionOptions,
}

/// True when a required string input is empty or whitespace-only
fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl Agent {
    /// Create an agent with the default persona under the given name
    pub fn new(backend: Arc<dyn CompletionBackend>, default_name: impl Into<String>) -> Self {
        let defaults = AgentProfile::agent1();
        Self {
            name: default_name.into(),
            system_prompt: defaults.system_prompt,
            model: defaults.model,
            backend,
            options: CompletionOptions::default(),
        }
    }

    /// Create an agent from a persona profile
    pub fn from_profile(backend: Arc<dyn CompletionBackend>, profile: &AgentProfile) -> Result<Self> {
        let mut agent = Self::new(backend, profile.name.clone());
        agent.configure(&profile.name, &profile.system_prompt, &profile.model)?;
        Ok(agent)
    }

    /// Replace the agent's name, system prompt, and model
    ///
    /// All three fields are validated before any of them is touched, so a
    /// failed call leaves the previous configuration intact.
    pub fn configure(&mut self, name: &str, system_prompt: &str, model: &str) -> Result<()> {
        if is_blank(name) {
            return Err(DuologueError::invalid_argument(
                "Agent name must not be empty or whitespace",
            ));
        }

        if is_blank(system_prompt) {
            return Err(DuologueError::invalid_argument(
                "System prompt must not be empty or whitespace",
            ));
        }

        if is_blank(model) {
            return Err(DuologueError::invalid_argument(
                "Model must not be empty or whitespace",
            ));
        }

        self.name = name.to_string();
        self.system_prompt = system_prompt.to_string();
        self.model = model.to_string();

        Ok(())
    }

    /// Set the response-size ceiling for completion calls
    pub fn set_max_output_tokens(&mut self, max_output_tokens: u32) {
        self.options.max_output_tokens = max_output_tokens;
    }

    /// Get the agent's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the agent's system prompt
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Get the agent's model
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Produce one reply to the given prompt
    ///
    /// Runs a single completion call with the agent's system prompt and
    /// model, trims the extracted text, and returns it decorated as
    /// `"**{name}**: {text}"`. An empty completion yields `"**{name}**: "`.
    /// Backend errors propagate unwrapped; no retry is performed.
    pub async fn respond(&self, prompt: &str) -> Result<String> {
        if is_blank(prompt) {
            return Err(DuologueError::invalid_argument(
                "Prompt must not be empty or whitespace",
            ));
        }

        let completion = self
            .backend
            .complete(&self.model, &self.system_prompt, prompt, &self.options)
            .await?;

        let text = completion.text();

        Ok(format!("**{}**: {}", self.name, text.trim()))
    }
}
