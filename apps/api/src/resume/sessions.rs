use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use super::document::ResumeDocument;

struct OpenResume {
    document: ResumeDocument,
    touched: Instant,
}

/// In-memory resume documents, one per builder session. Nothing here is
/// persisted; closing or evicting a session discards its document.
#[derive(Clone, Default)]
pub struct ResumeSessions {
    documents: Arc<RwLock<HashMap<Uuid, OpenResume>>>,
}

impl ResumeSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> (Uuid, ResumeDocument) {
        let id = Uuid::new_v4();
        let document = ResumeDocument::new();
        self.documents.write().await.insert(
            id,
            OpenResume {
                document: document.clone(),
                touched: Instant::now(),
            },
        );
        info!("Opened resume session {id}");
        (id, document)
    }

    pub async fn get(&self, id: Uuid) -> Option<ResumeDocument> {
        let mut documents = self.documents.write().await;
        let open = documents.get_mut(&id)?;
        open.touched = Instant::now();
        Some(open.document.clone())
    }

    /// Runs `f` against the session's document under the write lock and
    /// returns its result alongside a snapshot of the updated document.
    /// `None` when the session does not exist.
    pub async fn update<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut ResumeDocument) -> R,
    ) -> Option<(R, ResumeDocument)> {
        let mut documents = self.documents.write().await;
        let open = documents.get_mut(&id)?;
        open.touched = Instant::now();
        let result = f(&mut open.document);
        Some((result, open.document.clone()))
    }

    pub async fn close(&self, id: Uuid) -> bool {
        let removed = self.documents.write().await.remove(&id).is_some();
        if removed {
            info!("Closed resume session {id}");
        }
        removed
    }

    /// Drops sessions not read or written for at least `ttl`. Returns how many
    /// were dropped.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|_, open| open.touched.elapsed() < ttl);
        before - documents.len()
    }
}
