use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::about::{AboutPage, StoreAboutRepository};
use crate::chat::ChatSessions;
use crate::config::{Config, StorageBackend};
use crate::resume::ResumeSessions;
use crate::storage::{FileStore, KeyValueStore, MemoryStore, RedisStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Backing store for the About page. Swapped via STORAGE_BACKEND.
    pub store: Arc<dyn KeyValueStore>,
    /// The About page and its single edit selector.
    pub about: Arc<Mutex<AboutPage>>,
    pub resumes: ResumeSessions,
    pub chats: ChatSessions,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = match config.storage_backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage; About edits will not survive a restart");
                Arc::new(MemoryStore::new())
            }
            StorageBackend::File => Arc::new(
                FileStore::open(&config.storage_path)
                    .await
                    .with_context(|| {
                        format!("Failed to open store file {}", config.storage_path.display())
                    })?,
            ),
            StorageBackend::Redis => {
                let url = config
                    .redis_url
                    .as_deref()
                    .context("REDIS_URL is required for the redis backend")?;
                Arc::new(
                    RedisStore::connect(url, config.redis_key_prefix.clone())
                        .await
                        .context("Failed to connect to Redis")?,
                )
            }
        };
        Self::with_store(config, store).await
    }

    /// Builds state over an already constructed store.
    pub async fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let repo = Arc::new(StoreAboutRepository::new(Arc::clone(&store)));
        let about = AboutPage::load(repo)
            .await
            .context("Failed to load About page record")?;

        Ok(Self {
            chats: ChatSessions::new(config.chat_reply_delay),
            resumes: ResumeSessions::new(),
            about: Arc::new(Mutex::new(about)),
            store,
            config,
        })
    }

    /// Periodically drops resume and chat sessions idle for longer than
    /// `session_idle_ttl`. Runs until the returned handle is aborted.
    pub fn spawn_session_reaper(&self) -> JoinHandle<()> {
        let resumes = self.resumes.clone();
        let chats = self.chats.clone();
        let ttl = self.config.session_idle_ttl;
        let mut ticker = tokio::time::interval(self.config.session_sweep_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::spawn(async move {
            loop {
                ticker.tick().await;
                let resumes_dropped = resumes.evict_idle(ttl).await;
                let chats_dropped = chats.evict_idle(ttl).await;
                if resumes_dropped + chats_dropped > 0 {
                    info!(
                        resumes = resumes_dropped,
                        chats = chats_dropped,
                        "Evicted idle sessions"
                    );
                }
            }
        })
    }

    #[cfg(test)]
    pub async fn in_memory(config: Config) -> Result<Self> {
        Self::with_store(config, Arc::new(MemoryStore::new())).await
    }
}
