//! Core module - shared infrastructure for Duologue
//!
//! This module contains configuration and error handling used throughout
//! the application.

pub mod config;
pub mod error;

pub use config::{AgentProfile, Config, DispatchConfig, OpenAiConfig};
pub use error::{DuologueError, Result};
