//! About-page edit cycle: Viewing ⇄ Editing(draft).
//!
//! Exactly one section can be under edit. Saving decodes the draft, persists
//! it through the repository, then commits it to the in-memory record. A failed
//! save leaves the page in Editing with the draft untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::codec::{skills_to_text, text_to_skills, text_to_work_exp, work_exp_to_text};
use super::models::{AboutRecord, AboutSection, SectionValue, SkillCategories};
use super::repository::AboutRepository;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("No section is being edited")]
    NotEditing,

    #[error("Draft is for '{got}' but '{expected}' is being edited")]
    DraftMismatch {
        expected: AboutSection,
        got: AboutSection,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The editable flat-text form of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "camelCase")]
pub enum Draft {
    AboutMe {
        text: String,
    },
    Skills {
        frontend: String,
        backend: String,
        database: String,
    },
    WorkExperience {
        text: String,
    },
}

impl Draft {
    pub fn section(&self) -> AboutSection {
        match self {
            Draft::AboutMe { .. } => AboutSection::AboutMe,
            Draft::Skills { .. } => AboutSection::Skills,
            Draft::WorkExperience { .. } => AboutSection::WorkExperience,
        }
    }

    pub fn from_record(record: &AboutRecord, section: AboutSection) -> Self {
        match section {
            AboutSection::AboutMe => Draft::AboutMe {
                text: record.about_me.clone(),
            },
            AboutSection::Skills => Draft::Skills {
                frontend: skills_to_text(&record.skills.frontend),
                backend: skills_to_text(&record.skills.backend),
                database: skills_to_text(&record.skills.database),
            },
            AboutSection::WorkExperience => Draft::WorkExperience {
                text: work_exp_to_text(&record.work_experience),
            },
        }
    }

    /// Never fails: malformed text degrades to empty fields or dropped lines.
    pub fn decode(&self) -> SectionValue {
        match self {
            Draft::AboutMe { text } => SectionValue::AboutMe(text.clone()),
            Draft::Skills {
                frontend,
                backend,
                database,
            } => SectionValue::Skills(SkillCategories {
                frontend: text_to_skills(frontend),
                backend: text_to_skills(backend),
                database: text_to_skills(database),
            }),
            Draft::WorkExperience { text } => SectionValue::WorkExperience(text_to_work_exp(text)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Viewing,
    Editing(Draft),
}

/// Snapshot returned to the UI layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutView {
    #[serde(flatten)]
    pub record: AboutRecord,
    pub editing: Option<AboutSection>,
    pub draft: Option<Draft>,
}

pub struct AboutPage {
    record: AboutRecord,
    mode: EditMode,
    repo: Arc<dyn AboutRepository>,
}

impl AboutPage {
    /// Loads every section from the repository; absent sections use defaults.
    pub async fn load(repo: Arc<dyn AboutRepository>) -> Result<Self, StorageError> {
        let record = repo.load_record().await?;
        Ok(Self {
            record,
            mode: EditMode::Viewing,
            repo,
        })
    }

    pub fn record(&self) -> &AboutRecord {
        &self.record
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn editing(&self) -> Option<AboutSection> {
        match &self.mode {
            EditMode::Viewing => None,
            EditMode::Editing(draft) => Some(draft.section()),
        }
    }

    pub fn view(&self) -> AboutView {
        let draft = match &self.mode {
            EditMode::Viewing => None,
            EditMode::Editing(draft) => Some(draft.clone()),
        };
        AboutView {
            record: self.record.clone(),
            editing: draft.as_ref().map(Draft::section),
            draft,
        }
    }

    /// Fills a fresh draft from the current record. Selecting a section while
    /// another is under edit switches to it and drops the old draft.
    pub fn begin_edit(&mut self, section: AboutSection) -> Draft {
        if let Some(previous) = self.editing() {
            debug!("Switching about edit from '{previous}' to '{section}'; previous draft discarded");
        }
        let draft = Draft::from_record(&self.record, section);
        self.mode = EditMode::Editing(draft.clone());
        draft
    }

    pub fn update_draft(&mut self, draft: Draft) -> Result<(), EditorError> {
        let EditMode::Editing(current) = &mut self.mode else {
            return Err(EditorError::NotEditing);
        };
        if current.section() != draft.section() {
            return Err(EditorError::DraftMismatch {
                expected: current.section(),
                got: draft.section(),
            });
        }
        *current = draft;
        Ok(())
    }

    pub async fn save(&mut self) -> Result<&AboutRecord, EditorError> {
        let EditMode::Editing(draft) = &self.mode else {
            return Err(EditorError::NotEditing);
        };
        let value = draft.decode();
        self.repo.save(&value).await?;

        info!("Committed about section '{}'", value.section());
        self.record.apply(value);
        self.mode = EditMode::Viewing;
        Ok(&self.record)
    }

    /// Discards the draft. Returns whether anything was being edited.
    pub fn cancel(&mut self) -> bool {
        let was_editing = self.editing().is_some();
        self.mode = EditMode::Viewing;
        was_editing
    }

    /// Direct commit of the bio text, bypassing the draft cycle. Any draft in
    /// progress is left as it is.
    pub async fn replace_about_me(&mut self, content: String) -> Result<(), StorageError> {
        let value = SectionValue::AboutMe(content);
        self.repo.save(&value).await?;
        self.record.apply(value);
        Ok(())
    }
}
