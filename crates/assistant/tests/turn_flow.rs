//! End-to-end turn flow: scripted provider → gateway → interpreter → session.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use taskchat_assistant::{AssistantGateway, ChatSession, PARSE_FALLBACK_MESSAGE};
use taskchat_core::error::ProviderError;
use taskchat_core::message::Role;
use taskchat_core::provider::{GenerationRequest, GenerationResponse, Provider};
use taskchat_core::task::TaskCategory;

/// A provider that replays a fixed script of responses, one per call.
struct ScriptedProvider {
    script: Vec<Result<String, ProviderError>>,
    cursor: AtomicUsize,
}

impl ScriptedProvider {
    fn new(script: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            script,
            cursor: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        _request: GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        let i = self.cursor.fetch_add(1, Ordering::SeqCst);
        match self.script.get(i) {
            Some(Ok(text)) => Ok(GenerationResponse {
                text: text.clone(),
                model: "scripted-model".into(),
                usage: None,
            }),
            Some(Err(e)) => Err(e.clone()),
            None => Err(ProviderError::EmptyResponse("script exhausted".into())),
        }
    }
}

fn gateway_over(script: Vec<Result<String, ProviderError>>) -> AssistantGateway {
    AssistantGateway::new(Arc::new(ScriptedProvider::new(script)), "scripted-model", 0.2)
}

#[tokio::test]
async fn mixed_session_accumulates_transcript_and_tasks() {
    let gateway = gateway_over(vec![
        Ok(r#"{"intent":"chat","response":"Doing well, thanks! How can I help?"}"#.into()),
        Ok(r#"```json
{"intent":"task","response":"Got it, I'll remind you.","task":{"taskName":"Call mom","dueDate":"2026-08-31T17:00:00Z","priority":"normal","category":"personal"}}
```"#
            .into()),
        Ok(r#"{"intent":"incomplete_task","response":"What should I remind you about?"}"#.into()),
        Err(ProviderError::Network("connection reset".into())),
        Ok("chatty prose that is not json".into()),
    ]);

    let mut session = ChatSession::new();

    let turns = [
        "hey, how's it going",
        "remind me to call mom tomorrow at 5pm",
        "remind me about the thing",
        "are you still there?",
        "hello?",
    ];
    let mut replies = Vec::new();
    for text in turns {
        let outcome = session.submit(&gateway, text).await.unwrap();
        replies.push(outcome.reply);
    }

    // 5 turns ⇒ exactly 10 messages, strictly alternating
    assert_eq!(session.conversation().len(), 10);
    for (i, msg) in session.conversation().messages().iter().enumerate() {
        let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
        assert_eq!(msg.role, expected);
    }

    assert_eq!(replies[0], "Doing well, thanks! How can I help?");
    assert_eq!(replies[1], "Got it, I'll remind you.");
    assert_eq!(replies[2], "What should I remind you about?");
    assert_eq!(replies[3], "Sorry, I encountered an error. Please try again.");
    assert_eq!(replies[4], PARSE_FALLBACK_MESSAGE);

    // Only the one complete task made it into the list
    assert_eq!(session.tasks().len(), 1);
    let task = &session.tasks()[0];
    assert_eq!(task.name, "Call mom");
    assert_eq!(task.due_date.as_deref(), Some("2026-08-31T17:00:00Z"));
    assert_eq!(task.category, TaskCategory::Personal);
}

#[tokio::test]
async fn failed_turns_still_count_toward_transcript_pairing() {
    let gateway = gateway_over(vec![
        Err(ProviderError::ApiError {
            status_code: 503,
            message: "overloaded".into(),
        }),
        Ok(r#"{"intent":"chat","response":"Back now!"}"#.into()),
    ]);

    let mut session = ChatSession::new();
    session.submit(&gateway, "first").await.unwrap();
    session.submit(&gateway, "second").await.unwrap();

    assert_eq!(session.conversation().len(), 4);
    assert_eq!(
        session.conversation().messages()[1].content,
        "Sorry, I encountered an error. Please try again."
    );
    assert_eq!(session.conversation().messages()[3].content, "Back now!");
    assert!(session.tasks().is_empty());
}

#[tokio::test]
async fn prompt_carries_prior_turns_to_the_provider() {
    // Capture the prompt the provider actually receives on the second turn.
    struct CapturingProvider {
        prompts: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Provider for CapturingProvider {
        fn name(&self) -> &str {
            "capturing"
        }

        async fn generate(
            &self,
            request: GenerationRequest,
        ) -> Result<GenerationResponse, ProviderError> {
            self.prompts.lock().unwrap().push(request.prompt);
            Ok(GenerationResponse {
                text: r#"{"intent":"chat","response":"ok"}"#.into(),
                model: "capturing-model".into(),
                usage: None,
            })
        }
    }

    let provider = Arc::new(CapturingProvider {
        prompts: std::sync::Mutex::new(Vec::new()),
    });
    let gateway = AssistantGateway::new(provider.clone(), "capturing-model", 0.2);

    let mut session = ChatSession::new();
    session.submit(&gateway, "my name is Sam").await.unwrap();
    session.submit(&gateway, "what's my name?").await.unwrap();

    let prompts = provider.prompts.lock().unwrap();
    // First prompt: empty transcript, utterance in its own slot
    assert!(prompts[0].contains("New user message: my name is Sam"));
    assert!(!prompts[0].contains("User: my name is Sam"));
    // Second prompt: first turn appears as labeled transcript lines
    assert!(prompts[1].contains("User: my name is Sam"));
    assert!(prompts[1].contains("AI: ok"));
    assert!(prompts[1].contains("New user message: what's my name?"));
}
