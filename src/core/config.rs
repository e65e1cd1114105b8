//! Configuration management for Duologue
//!
//! Supports environment variables, config files, and runtime overrides.
//! Agent personas and models are interchangeable via settings.
//!
//! Config file location: ~/.config/duologue/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{DuologueError, Result};

/// Main configuration for Duologue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenAI API configuration
    pub openai: OpenAiConfig,
    /// First agent persona
    pub agent1: AgentProfile,
    /// Second agent persona
    pub agent2: AgentProfile,
    /// Dispatch loop configuration
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// OpenAI API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key; falls back to the OPENAI_API_KEY environment variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL of the API (default: https://api.openai.com/v1)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Persona configuration for one agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Display name, prefixed onto every response
    pub name: String,
    /// System instruction fixing the agent's behavior
    pub system_prompt: String,
    /// Model that serves this agent's requests
    pub model: String,
}

/// Dispatch loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Which agent answers the first turn ("agent1" or "agent2")
    pub starting_agent: String,
    /// Number of turns per dispatch
    /// Default: 4
    pub iterations: u32,
    /// Response-size ceiling per completion call
    /// Default: 512
    pub max_output_tokens: u32,
    /// Whether to show debug output
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai: OpenAiConfig::default(),
            agent1: AgentProfile::agent1(),
            agent2: AgentProfile::agent2(),
            dispatch: DispatchConfig::default(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: env::var("OPENAI_API_KEY").ok(),
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            timeout_secs: 120,
        }
    }
}

impl AgentProfile {
    /// Default persona for the first agent
    pub fn agent1() -> Self {
        Self {
            name: "Agent1".to_string(),
            system_prompt: "You are a helpful assistant.".to_string(),
            model: env::var("DUOLOGUE_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        }
    }

    /// Default persona for the second agent
    pub fn agent2() -> Self {
        Self {
            name: "Agent2".to_string(),
            ..Self::agent1()
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            starting_agent: "agent1".to_string(),
            iterations: 4,
            max_output_tokens: 512,
            debug: env::var("DUOLOGUE_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("duologue")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        // Try to load from config file
        if let Ok(config) = Self::load_from_file() {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(DuologueError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| DuologueError::config(format!("Failed to read config: {}", e)))?;

        let mut config: Config = toml::from_str(&content)
            .map_err(|e| DuologueError::config(format!("Failed to parse config: {}", e)))?;

        // The environment always wins for the API key
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            config.openai.api_key = Some(key);
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| DuologueError::config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| DuologueError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| DuologueError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Check if a config file exists
    pub fn config_exists() -> bool {
        Self::config_file().exists()
    }

    /// Resolve the API key from config or environment
    pub fn api_key(&self) -> Result<&str> {
        self.openai.api_key.as_deref().ok_or_else(|| {
            DuologueError::config(
                "OpenAI API key is not configured. Set 'openai.api_key' or the \
                 OPENAI_API_KEY environment variable.",
            )
        })
    }

    /// Generate a default config file content for display
    pub fn default_config_toml() -> String {
        let mut config = Config::default();
        // Never echo a real key into a sample file
        config.openai.api_key = None;
        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| String::from("# Error generating config"))
    }
}
