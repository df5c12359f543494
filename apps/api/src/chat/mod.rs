// Chatbot page: canned-reply conversations and the sessions that own them.

pub mod handlers;
pub mod session;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use self::session::{ChatError, ChatMessage, ChatSession};

struct OpenChat {
    session: ChatSession,
    touched: Instant,
}

/// Open chat sessions. Removing a session, by close or idle eviction, drops
/// it, which cancels its pending replies.
#[derive(Clone)]
pub struct ChatSessions {
    sessions: Arc<RwLock<HashMap<Uuid, OpenChat>>>,
    reply_delay: Duration,
}

impl ChatSessions {
    pub fn new(reply_delay: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            reply_delay,
        }
    }

    pub async fn create(&self) -> (Uuid, Vec<ChatMessage>) {
        let id = Uuid::new_v4();
        let session = ChatSession::new(self.reply_delay);
        let messages = session.messages().await;
        self.sessions.write().await.insert(
            id,
            OpenChat {
                session,
                touched: Instant::now(),
            },
        );
        info!("Opened chat session {id}");
        (id, messages)
    }

    pub async fn messages(&self, id: Uuid) -> Option<Vec<ChatMessage>> {
        let mut sessions = self.sessions.write().await;
        let open = sessions.get_mut(&id)?;
        open.touched = Instant::now();
        Some(open.session.messages().await)
    }

    pub async fn send(&self, id: Uuid, text: String) -> Option<Result<ChatMessage, ChatError>> {
        let mut sessions = self.sessions.write().await;
        let open = sessions.get_mut(&id)?;
        open.touched = Instant::now();
        Some(open.session.send(text).await)
    }

    pub async fn close(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id);
        if removed.is_some() {
            info!("Closed chat session {id}");
        }
        removed.is_some()
    }

    /// Drops sessions not read or written for at least `ttl`, cancelling
    /// their pending replies. Returns how many were dropped.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, open| open.touched.elapsed() < ttl);
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_close_stops_replies_and_forgets_session() {
        let chats = ChatSessions::new(Duration::from_millis(1000));
        let (id, greeting) = chats.create().await;
        assert_eq!(greeting.len(), 1);

        chats.send(id, "hi".to_string()).await.unwrap().unwrap();
        assert!(chats.close(id).await);
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(chats.messages(id).await.is_none());
        assert!(chats.send(id, "again".to_string()).await.is_none());
        assert!(!chats.close(id).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_chat_is_evicted() {
        let chats = ChatSessions::new(Duration::from_secs(120));
        let (idle, _) = chats.create().await;
        let (active, _) = chats.create().await;
        chats.send(idle, "anyone there?".to_string()).await.unwrap().unwrap();

        tokio::time::advance(Duration::from_secs(50)).await;
        chats.messages(active).await.unwrap();
        tokio::time::advance(Duration::from_secs(20)).await;

        assert_eq!(chats.evict_idle(Duration::from_secs(60)).await, 1);
        assert!(chats.messages(idle).await.is_none());
        assert_eq!(chats.messages(active).await.unwrap().len(), 1);
    }
}
