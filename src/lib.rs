//! Duologue - Two-Agent Conversation Dispatcher
//!
//! Orchestrates a turn-based conversation between two independently
//! configured agents backed by the OpenAI Chat Completions API, relaying
//! each agent's output as the next agent's input for a fixed number of
//! turns.
//!
//! # Architecture
//!
//! - **Core**: Configuration and error handling
//! - **LLM**: Completion backend abstraction with an OpenAI implementation
//! - **Agent**: Agent personas and the alternating dispatch loop
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use duologue::{Agent, Config, Dispatcher, OpenAiClient};
//!
//! #[tokio::main]
//! async fn main() -> duologue::Result<()> {
//!     let config = Config::load();
//!     let backend = Arc::new(OpenAiClient::from_config(&config)?);
//!
//!     let agent1 = Agent::from_profile(backend.clone(), &config.agent1)?;
//!     let agent2 = Agent::from_profile(backend, &config.agent2)?;
//!
//!     let dispatcher = Dispatcher::new(agent1, agent2);
//!     let responses = dispatcher.dispatch("Pick a topic", "agent1", 4).await?;
//!
//!     for response in responses {
//!         println!("{}", response);
//!     }
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod core;
pub mod llm;

// Re-export commonly used items
pub use agent::{Agent, Dispatcher, HandlerId, Selector};
pub use core::{Config, DuologueError, Result};
pub use llm::{Completion, CompletionBackend, CompletionOptions, ContentSegment, OpenAiClient};
