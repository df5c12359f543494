//! Chatbot conversation with a canned, delayed bot reply.
//!
//! Each reply is a tokio task owned by its `ChatSession`. Dropping the
//! session aborts any reply still waiting, so nothing is appended to a
//! conversation after it has been closed.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

pub const GREETING: &str = "Hello! I'm your portfolio assistant. How can I help you today?";
pub const CANNED_REPLY: &str =
    "Sorry, I am still learning. Please ask about projects, skills, or experience.";

#[derive(Debug, Error, PartialEq)]
pub enum ChatError {
    #[error("Message cannot be empty")]
    EmptyMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Bot,
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Transcript {
    fn push(&mut self, sender: Sender, text: String) -> ChatMessage {
        self.next_id += 1;
        let message = ChatMessage {
            id: self.next_id,
            sender,
            text,
            sent_at: Utc::now(),
        };
        self.messages.push(message.clone());
        message
    }
}

pub struct ChatSession {
    transcript: Arc<Mutex<Transcript>>,
    pending: Vec<JoinHandle<()>>,
    reply_delay: Duration,
}

impl ChatSession {
    pub fn new(reply_delay: Duration) -> Self {
        let mut transcript = Transcript::default();
        transcript.push(Sender::Bot, GREETING.to_string());
        Self {
            transcript: Arc::new(Mutex::new(transcript)),
            pending: Vec::new(),
            reply_delay,
        }
    }

    /// Appends the user's message as typed and schedules the bot reply.
    /// Whitespace-only input is rejected.
    pub async fn send(&mut self, text: String) -> Result<ChatMessage, ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let message = self.transcript.lock().await.push(Sender::User, text);

        self.pending.retain(|handle| !handle.is_finished());
        let transcript = Arc::clone(&self.transcript);
        let delay = self.reply_delay;
        self.pending.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            transcript
                .lock()
                .await
                .push(Sender::Bot, CANNED_REPLY.to_string());
        }));

        Ok(message)
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.transcript.lock().await.messages.clone()
    }

    pub fn pending_replies(&self) -> usize {
        self.pending
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        let outstanding = self.pending_replies();
        for handle in &self.pending {
            handle.abort();
        }
        if outstanding > 0 {
            debug!("Chat session dropped; aborted {outstanding} pending replies");
        }
    }
}
