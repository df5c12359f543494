//! Persistence seam for the About page.
//!
//! The editor talks to an `AboutRepository`; the default implementation
//! encodes each section under its own key in a `KeyValueStore`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::models::{AboutRecord, AboutSection, SectionValue};
use crate::storage::{KeyValueStore, StorageError};

#[async_trait]
pub trait AboutRepository: Send + Sync {
    /// Loads one section, falling back to its default when nothing is stored.
    /// An empty stored bio also reads as the default bio.
    async fn load(&self, section: AboutSection) -> Result<SectionValue, StorageError>;

    async fn save(&self, value: &SectionValue) -> Result<(), StorageError>;

    async fn load_record(&self) -> Result<AboutRecord, StorageError> {
        let mut record = AboutRecord::default();
        for section in AboutSection::ALL {
            record.apply(self.load(section).await?);
        }
        Ok(record)
    }
}

/// `aboutMe` is stored as the plain string; `skills` and `workExperience` as
/// JSON.
pub struct StoreAboutRepository {
    store: Arc<dyn KeyValueStore>,
}

impl StoreAboutRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

fn decode_or_default<T: DeserializeOwned>(
    section: AboutSection,
    raw: &str,
    default: impl FnOnce() -> T,
) -> T {
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Stored value for '{section}' is not valid JSON ({e}); using default");
            default()
        }
    }
}

#[async_trait]
impl AboutRepository for StoreAboutRepository {
    async fn load(&self, section: AboutSection) -> Result<SectionValue, StorageError> {
        let Some(raw) = self.store.get(section.storage_key()).await? else {
            return Ok(SectionValue::default_for(section));
        };

        let value = match section {
            AboutSection::AboutMe if raw.is_empty() => SectionValue::default_for(section),
            AboutSection::AboutMe => SectionValue::AboutMe(raw),
            AboutSection::Skills => SectionValue::Skills(decode_or_default(
                section,
                &raw,
                super::models::default_skills,
            )),
            AboutSection::WorkExperience => SectionValue::WorkExperience(decode_or_default(
                section,
                &raw,
                super::models::default_work_experience,
            )),
        };
        Ok(value)
    }

    async fn save(&self, value: &SectionValue) -> Result<(), StorageError> {
        let section = value.section();
        let key = section.storage_key();
        let encoded = match value {
            SectionValue::AboutMe(text) => Ok(text.clone()),
            SectionValue::Skills(skills) => serde_json::to_string(skills),
            SectionValue::WorkExperience(items) => serde_json::to_string(items),
        }
        .map_err(|e| StorageError::Encode {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        self.store.set(key, &encoded).await?;
        info!("Saved about section '{section}' ({} bytes)", encoded.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::about::models::{default_skills, SkillCategories, WorkItem};
    use crate::storage::MemoryStore;

    fn repo() -> (Arc<MemoryStore>, StoreAboutRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = StoreAboutRepository::new(store.clone());
        (store, repo)
    }

    #[tokio::test]
    async fn test_empty_store_loads_defaults() {
        let (_, repo) = repo();
        assert_eq!(repo.load_record().await.unwrap(), AboutRecord::default());
    }

    #[tokio::test]
    async fn test_about_me_is_stored_as_plain_text() {
        let (store, repo) = repo();
        repo.save(&SectionValue::AboutMe("New bio".to_string()))
            .await
            .unwrap();
        assert_eq!(store.get("aboutMe").await.unwrap().as_deref(), Some("New bio"));
    }

    #[tokio::test]
    async fn test_empty_stored_bio_reads_as_default() {
        let (store, repo) = repo();
        store.set("aboutMe", "").await.unwrap();
        assert_eq!(
            repo.load(AboutSection::AboutMe).await.unwrap(),
            SectionValue::default_for(AboutSection::AboutMe)
        );

        store.set("aboutMe", " ").await.unwrap();
        assert_eq!(
            repo.load(AboutSection::AboutMe).await.unwrap(),
            SectionValue::AboutMe(" ".to_string())
        );
    }

    #[tokio::test]
    async fn test_skills_are_stored_as_json_object() {
        let (store, repo) = repo();
        let skills = SkillCategories {
            frontend: vec!["Leptos".to_string()],
            backend: vec![],
            database: vec!["SQLite".to_string()],
        };
        repo.save(&SectionValue::Skills(skills.clone())).await.unwrap();

        let raw = store.get("skills").await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["frontend"][0], "Leptos");
        assert_eq!(json["database"][0], "SQLite");
        assert_eq!(
            repo.load(AboutSection::Skills).await.unwrap(),
            SectionValue::Skills(skills)
        );
    }

    #[tokio::test]
    async fn test_work_experience_json_shape() {
        let (store, repo) = repo();
        let items = vec![WorkItem {
            title: "Dev".to_string(),
            company: "Acme".to_string(),
            period: "2020".to_string(),
            description: "Things".to_string(),
        }];
        repo.save(&SectionValue::WorkExperience(items)).await.unwrap();

        let raw = store.get("workExperience").await.unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"title":"Dev","company":"Acme","period":"2020","description":"Things"}]"#
        );
    }

    #[tokio::test]
    async fn test_malformed_json_degrades_to_default() {
        let (store, repo) = repo();
        store.set("skills", "{not json").await.unwrap();
        assert_eq!(
            repo.load(AboutSection::Skills).await.unwrap(),
            SectionValue::Skills(default_skills())
        );
    }

    #[tokio::test]
    async fn test_partial_skills_object_fills_missing_categories() {
        let (store, repo) = repo();
        store.set("skills", r#"{"frontend":["Yew"]}"#).await.unwrap();
        let SectionValue::Skills(skills) = repo.load(AboutSection::Skills).await.unwrap() else {
            panic!("expected skills");
        };
        assert_eq!(skills.frontend, vec!["Yew".to_string()]);
        assert!(skills.backend.is_empty());
    }
}
