//! CLI channel — interactive terminal-based chat.
//!
//! Reads from stdin, writes to stdout. Used by `taskchat chat` interactive
//! mode. Submission while a turn is in flight cannot happen here: the chat
//! loop consumes one line at a time and awaits the turn before reading the
//! next.

use async_trait::async_trait;
use taskchat_core::channel::{Channel, ChannelId, ChannelMessage};
use taskchat_core::error::ChannelError;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Interactive CLI channel for terminal-based chat.
pub struct CliChannel {
    id: ChannelId,
}

impl CliChannel {
    pub fn new() -> Self {
        Self {
            id: ChannelId("cli".into()),
        }
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    fn id(&self) -> &ChannelId {
        &self.id
    }

    async fn start(
        &self,
    ) -> Result<mpsc::Receiver<Result<ChannelMessage, ChannelError>>, ChannelError> {
        let (tx, rx) = mpsc::channel(32);
        let channel_id = self.id.clone();

        tokio::spawn(async move {
            let stdin = io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim().to_string();
                        if line.is_empty() {
                            continue;
                        }

                        // Check for exit commands
                        if matches!(line.as_str(), "exit" | "quit" | "/exit" | "/quit" | ":q") {
                            break;
                        }

                        let msg = ChannelMessage {
                            channel_id: channel_id.clone(),
                            sender_id: "local_user".into(),
                            sender_name: Some("User".into()),
                            content: line,
                            chat_id: "cli_session".into(),
                        };

                        if tx.send(Ok(msg)).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF (Ctrl+D)
                    Err(e) => {
                        let _ = tx
                            .send(Err(ChannelError::ConnectionLost(e.to_string())))
                            .await;
                        break;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send(&self, _chat_id: &str, content: &str) -> Result<(), ChannelError> {
        println!("{content}");
        Ok(())
    }

    fn is_allowed(&self, _sender_id: &str) -> bool {
        true // CLI is always allowed (local user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_channel_properties() {
        let ch = CliChannel::new();
        assert_eq!(ch.name(), "cli");
        assert_eq!(ch.id().0, "cli");
        assert!(ch.is_allowed("anyone"));
    }

    #[tokio::test]
    async fn send_and_stop_always_succeed() {
        // stdout delivery has no failure mode; the chat loop relies on this.
        let ch = CliChannel::new();
        assert!(ch.send("cli_session", "  Assistant > hi").await.is_ok());
        assert!(ch.stop().await.is_ok());
    }
}
