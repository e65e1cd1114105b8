//! Dispatch loop integration tests
//!
//! Exercises the dispatcher end to end against a stub completion backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::FutureExt;

use duologue::{
    Agent, Completion, CompletionBackend, CompletionOptions, Dispatcher, DuologueError, Result,
};

/// Backend that echoes the user prompt back as the completion text
struct EchoBackend;

#[async_trait]
impl CompletionBackend for EchoBackend {
    async fn complete(
        &self,
        model: &str,
        _system_prompt: &str,
        user_prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<Completion> {
        Ok(Completion::text_segment(model, format!("Re {}", user_prompt)))
    }

    fn name(&self) -> &str {
        "echo"
    }
}

/// Backend that always fails, for error propagation tests
struct FailingBackend;

#[async_trait]
impl CompletionBackend for FailingBackend {
    async fn complete(
        &self,
        _model: &str,
        _system_prompt: &str,
        _user_prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<Completion> {
        Err(DuologueError::openai("backend down"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Build a dispatcher over the echo backend with agents named A and B
fn echo_dispatcher() -> Dispatcher {
    let backend = Arc::new(EchoBackend);

    let mut agent1 = Agent::new(backend.clone(), "Agent1");
    agent1.configure("A", "You are A.", "test-model").unwrap();

    let mut agent2 = Agent::new(backend, "Agent2");
    agent2.configure("B", "You are B.", "test-model").unwrap();

    Dispatcher::new(agent1, agent2)
}

#[tokio::test]
async fn dispatch_returns_one_response_per_iteration() {
    let dispatcher = echo_dispatcher();

    for n in [1u32, 2, 5] {
        let responses = dispatcher.dispatch("Start topic", "agent1", n).await.unwrap();
        assert_eq!(responses.len(), n as usize);
    }
}

#[tokio::test]
async fn agents_alternate_from_either_start() {
    let dispatcher = echo_dispatcher();

    let responses = dispatcher.dispatch("Start topic", "agent1", 4).await.unwrap();
    assert!(responses[0].starts_with("**A**: "));
    assert!(responses[1].starts_with("**B**: "));
    assert!(responses[2].starts_with("**A**: "));
    assert!(responses[3].starts_with("**B**: "));

    let responses = dispatcher.dispatch("Start topic", "AGENT2", 3).await.unwrap();
    assert!(responses[0].starts_with("**B**: "));
    assert!(responses[1].starts_with("**A**: "));
    assert!(responses[2].starts_with("**B**: "));
}

#[tokio::test]
async fn each_turn_feeds_on_the_previous_sanitized_output() {
    let dispatcher = echo_dispatcher();

    let responses = dispatcher.dispatch("Start topic", "agent1", 3).await.unwrap();

    // Turn 1 echoes the opening prompt; each later turn echoes the
    // undecorated text of the turn before it.
    assert_eq!(responses[0], "**A**: Re Start topic");
    assert_eq!(responses[1], "**B**: Re Re Start topic");
    assert_eq!(responses[2], "**A**: Re Re Re Start topic");
}

#[tokio::test]
async fn notifications_match_returned_responses_in_order() {
    let mut dispatcher = echo_dispatcher();
    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    dispatcher.on_message(move |message| {
        let sink = sink.clone();
        async move {
            sink.lock().unwrap().push(message);
            Ok(())
        }
        .boxed()
    });

    let responses = dispatcher.dispatch("Start topic", "agent1", 4).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(*seen, responses);
}

#[tokio::test]
async fn handlers_run_in_registration_order() {
    let mut dispatcher = echo_dispatcher();
    let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    for label in ["first", "second", "third"] {
        let sink = order.clone();
        dispatcher.on_message(move |_| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(label);
                Ok(())
            }
            .boxed()
        });
    }

    dispatcher.dispatch("Start topic", "agent1", 1).await.unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
}

#[tokio::test]
async fn removed_handler_is_not_invoked() {
    let mut dispatcher = echo_dispatcher();
    let count = Arc::new(Mutex::new(0u32));

    let sink = count.clone();
    let id = dispatcher.on_message(move |_| {
        let sink = sink.clone();
        async move {
            *sink.lock().unwrap() += 1;
            Ok(())
        }
        .boxed()
    });

    assert!(dispatcher.off_message(id));
    assert!(!dispatcher.off_message(id));

    dispatcher.dispatch("Start topic", "agent1", 2).await.unwrap();
    assert_eq!(*count.lock().unwrap(), 0);
}

#[tokio::test]
async fn failing_handler_aborts_the_dispatch() {
    let mut dispatcher = echo_dispatcher();
    let delivered = Arc::new(Mutex::new(0u32));

    let sink = delivered.clone();
    dispatcher.on_message(move |_| {
        let sink = sink.clone();
        async move {
            *sink.lock().unwrap() += 1;
            Err(DuologueError::invalid_argument("handler refused"))
        }
        .boxed()
    });

    let err = dispatcher
        .dispatch("Start topic", "agent1", 3)
        .await
        .unwrap_err();
    assert!(matches!(err, DuologueError::InvalidArgument(_)));

    // The first turn reached the handler; no further turns ran
    assert_eq!(*delivered.lock().unwrap(), 1);
}

#[tokio::test]
async fn backend_failure_propagates_unwrapped() {
    let backend = Arc::new(FailingBackend);
    let agent1 = Agent::new(backend.clone(), "Agent1");
    let agent2 = Agent::new(backend, "Agent2");
    let dispatcher = Dispatcher::new(agent1, agent2);

    let err = dispatcher
        .dispatch("Start topic", "agent1", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, DuologueError::OpenAi(_)));
}

#[tokio::test]
async fn invalid_inputs_are_rejected() {
    let dispatcher = echo_dispatcher();

    let err = dispatcher.dispatch("", "agent1", 1).await.unwrap_err();
    assert!(matches!(err, DuologueError::InvalidArgument(_)));

    let err = dispatcher.dispatch("hi", "  ", 1).await.unwrap_err();
    assert!(matches!(err, DuologueError::InvalidArgument(_)));

    let err = dispatcher.dispatch("hi", "agent3", 1).await.unwrap_err();
    assert!(matches!(err, DuologueError::InvalidArgument(_)));

    let err = dispatcher.dispatch("hi", "agent1", 0).await.unwrap_err();
    assert!(matches!(err, DuologueError::OutOfRange(_)));
}

#[tokio::test]
async fn no_subscriber_dispatch_succeeds() {
    let dispatcher = echo_dispatcher();
    let responses = dispatcher.dispatch("Start topic", "agent2", 2).await.unwrap();
    assert_eq!(responses.len(), 2);
}
