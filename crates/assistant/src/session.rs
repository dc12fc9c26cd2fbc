//! Chat session — the per-session state container and turn state machine.
//!
//! State machine for a single turn: Idle → Sending → (Success | Failure) →
//! Idle. Submission is rejected while a turn is in flight; both terminal
//! branches restore Idle, so there is no fatal path.

use taskchat_core::error::SessionError;
use taskchat_core::message::Conversation;
use taskchat_core::task::Task;
use tracing::{debug, warn};

use crate::gateway::AssistantGateway;
use crate::interpreter::{extracted_task, interpret};

/// The fixed assistant message shown when the model's reply cannot be parsed.
pub const PARSE_FALLBACK_MESSAGE: &str = "Sorry, I couldn't process that.";

/// Where the session is within the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    Sending,
}

/// The result of one completed turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The assistant text appended to the transcript
    pub reply: String,

    /// The task appended to the task list, if one was extracted
    pub new_task: Option<Task>,
}

/// In-memory state for one chat session: the transcript, the extracted tasks,
/// and the turn state. All mutations are append-only.
#[derive(Debug, Default)]
pub struct ChatSession {
    conversation: Conversation,
    tasks: Vec<Task>,
    state: TurnState,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Run one full turn: append the user message, ask the gateway, interpret
    /// the reply, and append the assistant message (plus a task when the
    /// intent warrants it).
    ///
    /// The only error is `TurnInFlight`; every remote or parse failure is
    /// downgraded to a fallback assistant message and the session returns to
    /// `Idle`.
    pub async fn submit(
        &mut self,
        gateway: &AssistantGateway,
        text: &str,
    ) -> Result<TurnOutcome, SessionError> {
        if self.state == TurnState::Sending {
            return Err(SessionError::TurnInFlight);
        }

        self.state = TurnState::Sending;
        self.conversation.push_user(text);

        // The prompt renders the prior turns and the new utterance as
        // separate slots, so the gateway gets the transcript as it was
        // before this submission.
        let prior_len = self.conversation.len() - 1;
        let prior = &self.conversation.messages()[..prior_len];
        let raw = gateway.ask(prior, text).await;

        let outcome = match interpret(&raw) {
            Ok(reply) => {
                let new_task = extracted_task(&reply).cloned();
                self.conversation.push_assistant(&reply.response);
                if let Some(task) = &new_task {
                    debug!(task = %task, "Extracted task from turn");
                    self.tasks.push(task.clone());
                }
                TurnOutcome {
                    reply: reply.response,
                    new_task,
                }
            }
            Err(e) => {
                warn!(error = %e, "Could not interpret model reply, substituting fallback");
                self.conversation.push_assistant(PARSE_FALLBACK_MESSAGE);
                TurnOutcome {
                    reply: PARSE_FALLBACK_MESSAGE.to_string(),
                    new_task: None,
                }
            }
        };

        self.state = TurnState::Idle;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::gateway::GATEWAY_FALLBACK_JSON;
    use taskchat_core::error::ProviderError;
    use taskchat_core::message::Role;
    use taskchat_core::provider::{GenerationRequest, GenerationResponse, Provider};

    struct MockProvider {
        response: Result<String, ProviderError>,
    }

    #[async_trait::async_trait]
    impl Provider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn generate(
            &self,
            _request: GenerationRequest,
        ) -> Result<GenerationResponse, ProviderError> {
            match &self.response {
                Ok(text) => Ok(GenerationResponse {
                    text: text.clone(),
                    model: "mock-model".into(),
                    usage: None,
                }),
                Err(e) => Err(e.clone()),
            }
        }
    }

    fn gateway_returning(text: &str) -> AssistantGateway {
        AssistantGateway::new(
            Arc::new(MockProvider {
                response: Ok(text.into()),
            }),
            "mock-model",
            0.2,
        )
    }

    fn failing_gateway() -> AssistantGateway {
        AssistantGateway::new(
            Arc::new(MockProvider {
                response: Err(ProviderError::Network("unreachable".into())),
            }),
            "mock-model",
            0.2,
        )
    }

    #[tokio::test]
    async fn chat_turn_grows_transcript_only() {
        let gateway =
            gateway_returning(r#"{"intent":"chat","response":"Doing well, thanks! How can I help?"}"#);
        let mut session = ChatSession::new();

        let outcome = session.submit(&gateway, "hey, how's it going").await.unwrap();
        assert_eq!(outcome.reply, "Doing well, thanks! How can I help?");
        assert!(outcome.new_task.is_none());

        assert_eq!(session.conversation().len(), 2);
        assert!(session.tasks().is_empty());
        assert_eq!(session.state(), TurnState::Idle);
    }

    #[tokio::test]
    async fn task_turn_appends_reply_and_task() {
        let gateway = gateway_returning(
            r#"```json
{"intent":"task","response":"Got it, I'll remind you.","task":{"taskName":"Call mom","dueDate":"2026-08-31T17:00:00Z","priority":"normal","category":"personal"}}
```"#,
        );
        let mut session = ChatSession::new();

        let outcome = session
            .submit(&gateway, "remind me to call mom tomorrow at 5pm")
            .await
            .unwrap();

        assert_eq!(outcome.reply, "Got it, I'll remind you.");
        assert_eq!(outcome.new_task.as_ref().unwrap().name, "Call mom");
        assert_eq!(session.tasks().len(), 1);
        assert_eq!(session.tasks()[0].name, "Call mom");
        assert_eq!(session.conversation().len(), 2);
    }

    #[tokio::test]
    async fn incomplete_task_never_appends_a_task() {
        let gateway = gateway_returning(
            r#"{"intent":"incomplete_task","response":"When is it due?","task":{"taskName":"Call mom"}}"#,
        );
        let mut session = ChatSession::new();

        let outcome = session.submit(&gateway, "remind me to call mom").await.unwrap();
        assert!(outcome.new_task.is_none());
        assert!(session.tasks().is_empty());
        assert_eq!(outcome.reply, "When is it due?");
    }

    #[tokio::test]
    async fn remote_failure_appends_fixed_apology() {
        let gateway = failing_gateway();
        let mut session = ChatSession::new();

        let outcome = session.submit(&gateway, "hello?").await.unwrap();
        assert_eq!(
            outcome.reply,
            "Sorry, I encountered an error. Please try again."
        );
        assert!(outcome.new_task.is_none());
        assert!(session.tasks().is_empty());
        assert_eq!(session.state(), TurnState::Idle);
    }

    #[tokio::test]
    async fn unparseable_reply_appends_parse_fallback() {
        let gateway = gateway_returning("I decided to answer in prose instead of JSON.");
        let mut session = ChatSession::new();

        let outcome = session.submit(&gateway, "hello").await.unwrap();
        assert_eq!(outcome.reply, PARSE_FALLBACK_MESSAGE);
        assert!(session.tasks().is_empty());
        assert_eq!(session.state(), TurnState::Idle);

        // The failure branch still appends exactly one assistant message.
        assert_eq!(session.conversation().len(), 2);
        assert_eq!(session.conversation().messages()[1].role, Role::Assistant);
        assert_eq!(
            session.conversation().messages()[1].content,
            PARSE_FALLBACK_MESSAGE
        );
    }

    #[tokio::test]
    async fn n_turns_produce_2n_messages_in_order() {
        let gateway = gateway_returning(r#"{"intent":"chat","response":"ok"}"#);
        let mut session = ChatSession::new();

        for i in 0..5 {
            session.submit(&gateway, &format!("message {i}")).await.unwrap();
        }

        assert_eq!(session.conversation().len(), 10);
        for (i, msg) in session.conversation().messages().iter().enumerate() {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            assert_eq!(msg.role, expected, "message {i} out of order");
        }
    }

    #[tokio::test]
    async fn submit_while_sending_is_rejected_without_mutation() {
        let gateway = gateway_returning(r#"{"intent":"chat","response":"ok"}"#);
        let mut session = ChatSession::new();
        session.state = TurnState::Sending;

        let err = session.submit(&gateway, "hello").await.unwrap_err();
        assert!(matches!(err, SessionError::TurnInFlight));
        assert!(session.conversation().is_empty());
        assert!(session.tasks().is_empty());
        assert_eq!(session.state(), TurnState::Sending);
    }

    #[tokio::test]
    async fn gateway_fallback_text_parses_as_chat() {
        // The gateway's canned failure blob must flow through the normal
        // interpret path, not the parse-fallback path.
        let gateway = gateway_returning(GATEWAY_FALLBACK_JSON);
        let mut session = ChatSession::new();

        let outcome = session.submit(&gateway, "hi").await.unwrap();
        assert_eq!(
            outcome.reply,
            "Sorry, I encountered an error. Please try again."
        );
    }
}
