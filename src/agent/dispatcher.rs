//! Turn-based conversation dispatcher
//!
//! Runs an alternating N-turn conversation between two agents, relaying
//! each sanitized response as the next agent's prompt, and broadcasts
//! every produced message to registered handlers.

use futures::future::BoxFuture;

use crate::agent::agent::Agent;
use crate::core::{DuologueError, Result};

/// Which of the two agents answers the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Agent1,
    Agent2,
}

impl Selector {
    /// Alternate to the other agent
    pub fn flip(self) -> Self {
        match self {
            Selector::Agent1 => Selector::Agent2,
            Selector::Agent2 => Selector::Agent1,
        }
    }

    /// Resolve a starting-agent name, case-insensitively
    pub fn parse(agent: &str) -> Result<Self> {
        if agent.eq_ignore_ascii_case("agent1") {
            Ok(Selector::Agent1)
        } else if agent.eq_ignore_ascii_case("agent2") {
            Ok(Selector::Agent2)
        } else {
            Err(DuologueError::invalid_argument(
                "Agent must be either 'agent1' or 'agent2'",
            ))
        }
    }
}

/// Handler invoked once per produced message, in registration order
pub type MessageHandler = Box<dyn Fn(String) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// Identifies a registered handler for later removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerId(u64);

/// Orchestrates alternating turns between two agents
pub struct Dispatcher {
    agent1: Agent,
    agent2: Agent,
    handlers: Vec<(HandlerId, MessageHandler)>,
    next_handler_id: u64,
}

impl Dispatcher {
    /// Create a dispatcher owning the two agents
    pub fn new(agent1: Agent, agent2: Agent) -> Self {
        Self {
            agent1,
            agent2,
            handlers: Vec::new(),
            next_handler_id: 0,
        }
    }

    /// Get the first agent
    pub fn agent1(&self) -> &Agent {
        &self.agent1
    }

    /// Get the second agent
    pub fn agent2(&self) -> &Agent {
        &self.agent2
    }

    /// Get the first agent for reconfiguration
    ///
    /// Must not race with an in-flight `dispatch` using this agent;
    /// callers serialize configuration changes before dispatching.
    pub fn agent1_mut(&mut self) -> &mut Agent {
        &mut self.agent1
    }

    /// Get the second agent for reconfiguration
    pub fn agent2_mut(&mut self) -> &mut Agent {
        &mut self.agent2
    }

    /// Register a per-message handler; returns an id for removal
    pub fn on_message<F>(&mut self, handler: F) -> HandlerId
    where
        F: Fn(String) -> BoxFuture<'static, Result<()>> + Send + Sync + 'static,
    {
        let id = HandlerId(self.next_handler_id);
        self.next_handler_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Unregister a handler; returns whether it was registered
    pub fn off_message(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Run an alternating conversation for exactly `iterations` turns
    ///
    /// Each turn calls `respond` on the selected agent, broadcasts the
    /// formatted response, sanitizes it into the next prompt, and flips
    /// the selector. Returns every response in generation order. Turns
    /// run strictly sequentially; an agent or handler error aborts the
    /// call and discards the bulk result (handlers have already seen the
    /// earlier turns).
    pub async fn dispatch(
        &self,
        prompt: &str,
        starting_agent: &str,
        iterations: u32,
    ) -> Result<Vec<String>> {
        if prompt.trim().is_empty() {
            return Err(DuologueError::invalid_argument("Prompt cannot be empty"));
        }

        if starting_agent.trim().is_empty() {
            return Err(DuologueError::invalid_argument("Agent cannot be empty"));
        }

        if iterations < 1 {
            return Err(DuologueError::out_of_range(
                "Number of iterations must be at least 1",
            ));
        }

        let mut responses = Vec::with_capacity(iterations as usize);
        let mut current_prompt = prompt.to_string();
        let mut current_agent = Selector::parse(starting_agent)?;

        for _ in 0..iterations {
            let response = match current_agent {
                Selector::Agent1 => self.agent1.respond(&current_prompt).await?,
                Selector::Agent2 => self.agent2.respond(&current_prompt).await?,
            };

            responses.push(response.clone());
            self.notify(&response).await?;

            current_prompt = Self::prepare_next_prompt(&response);
            current_agent = current_agent.flip();
        }

        Ok(responses)
    }

    /// Await every handler sequentially, in registration order
    async fn notify(&self, message: &str) -> Result<()> {
        for (_, handler) in &self.handlers {
            handler(message.to_string()).await?;
        }
        Ok(())
    }

    /// Strip the display decoration from a response to form the next prompt
    ///
    /// Takes the substring strictly after the first `:` (dropping the
    /// `**{name}**` prefix), removes every literal `**`, and trims. A
    /// response with no colon is used whole after the same stripping; a
    /// blank response yields the empty string.
    fn prepare_next_prompt(response: &str) -> String {
        if response.trim().is_empty() {
            return String::new();
        }

        let content = match response.find(':') {
            Some(idx) if idx + 1 < response.len() => &response[idx + 1..],
            _ => response,
        };

        content.replace("**", "").trim().to_string()
    }
}
