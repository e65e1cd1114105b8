//! Duologue - Two-Agent Conversation Dispatcher
//!
//! Main entry point for the CLI application.

use std::sync::Arc;

use clap::Parser;
use futures::FutureExt;

use duologue::{Agent, Config, Dispatcher, OpenAiClient};

/// Duologue - Two-Agent Conversation Dispatcher
#[derive(Parser, Debug)]
#[command(name = "duologue")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Opening prompt handed to the starting agent
    prompt: Option<String>,

    /// Which agent answers first (agent1 or agent2)
    #[arg(long, short = 's')]
    starting_agent: Option<String>,

    /// Number of turns to run
    #[arg(long, short = 'n')]
    iterations: Option<u32>,

    /// Model override for the first agent
    #[arg(long)]
    model1: Option<String>,

    /// Model override for the second agent
    #[arg(long)]
    model2: Option<String>,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,

    /// Print a sample config file and exit
    #[arg(long)]
    show_config: bool,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.show_config {
        println!("{}", Config::default_config_toml());
        return Ok(());
    }

    if args.init_config {
        if Config::config_exists() {
            anyhow::bail!("Config file already exists: {}", Config::config_file().display());
        }
        let mut config = Config::default();
        config.openai.api_key = None;
        config.save()?;
        println!("Wrote {}", Config::config_file().display());
        return Ok(());
    }

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(ref model) = args.model1 {
        config.agent1.model = model.clone();
    }

    if let Some(ref model) = args.model2 {
        config.agent2.model = model.clone();
    }

    if args.debug {
        config.dispatch.debug = true;
    }

    let prompt = args
        .prompt
        .ok_or_else(|| anyhow::anyhow!("No prompt given. Usage: duologue \"<prompt>\""))?;
    let starting_agent = args
        .starting_agent
        .unwrap_or_else(|| config.dispatch.starting_agent.clone());
    let iterations = args.iterations.unwrap_or(config.dispatch.iterations);

    // Wire the backend and the two agents
    let backend = Arc::new(OpenAiClient::from_config(&config)?);

    let mut agent1 = Agent::from_profile(backend.clone(), &config.agent1)?;
    agent1.set_max_output_tokens(config.dispatch.max_output_tokens);

    let mut agent2 = Agent::from_profile(backend, &config.agent2)?;
    agent2.set_max_output_tokens(config.dispatch.max_output_tokens);

    let mut dispatcher = Dispatcher::new(agent1, agent2);

    // Print each turn as it is produced
    dispatcher.on_message(|message| {
        async move {
            println!("{}", message);
            Ok(())
        }
        .boxed()
    });

    dispatcher
        .dispatch(&prompt, &starting_agent, iterations)
        .await?;

    Ok(())
}
