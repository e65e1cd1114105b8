//! Agent module - personas and the dispatch loop
//!
//! Contains the agent abstraction and the dispatcher that alternates
//! turns between two agents.

pub mod agent;
pub mod dispatcher;

pub use agent::Agent;
pub use dispatcher::{Dispatcher, HandlerId, MessageHandler, Selector};
