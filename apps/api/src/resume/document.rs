//! Resume Builder document model.
//!
//! Lists keep insertion order. Every entry gets an `EntryId` when it is
//! created; ids stay valid across edits to other entries and are never reused,
//! while positional indices shift down on removal (splice semantics). Both
//! addressing styles are supported and both report misses as errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_PROFICIENCY: u8 = 50;
pub const MAX_PROFICIENCY: u8 = 100;

#[derive(Debug, Error, PartialEq)]
pub enum ResumeError {
    #[error("Unknown field '{field}' for {target}")]
    UnknownField { target: String, field: String },

    #[error("Index {index} is out of range for {list} (length {len})")]
    IndexOutOfRange {
        list: ListName,
        index: usize,
        len: usize,
    },

    #[error("No entry {id} in {list}")]
    UnknownEntry { list: ListName, id: EntryId },

    #[error("Proficiency must be a number, got '{0}'")]
    InvalidProficiency(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        EntryId(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(EntryId)
    }
}

/// The three list-typed sections of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListName {
    Experiences,
    Education,
    Skills,
}

impl ListName {
    pub fn as_str(self) -> &'static str {
        match self {
            ListName::Experiences => "experiences",
            ListName::Education => "education",
            ListName::Skills => "skills",
        }
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "experiences" => Ok(ListName::Experiences),
            "education" => Ok(ListName::Education),
            "skills" => Ok(ListName::Skills),
            other => Err(format!("Unknown resume list '{other}'")),
        }
    }
}

fn unknown_field(target: &str, field: &str) -> ResumeError {
    ResumeError::UnknownField {
        target: target.to_string(),
        field: field.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Personal block
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub professional_title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub summary: String,
}

impl PersonalInfo {
    /// Free text, no validation. Only the field name is checked.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), ResumeError> {
        let slot = match field {
            "fullName" => &mut self.full_name,
            "professionalTitle" => &mut self.professional_title,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "location" => &mut self.location,
            "website" => &mut self.website,
            "summary" => &mut self.summary,
            other => return Err(unknown_field("personal", other)),
        };
        *slot = value.to_string();
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// List entries
// ────────────────────────────────────────────────────────────────────────────

/// Behaviour shared by every list-typed entry.
pub trait ListEntry: Default + Clone {
    const LIST: ListName;

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), ResumeError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

impl ListEntry for ExperienceEntry {
    const LIST: ListName = ListName::Experiences;

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), ResumeError> {
        let slot = match field {
            "jobTitle" => &mut self.job_title,
            "company" => &mut self.company,
            "location" => &mut self.location,
            "startDate" => &mut self.start_date,
            "endDate" => &mut self.end_date,
            "description" => &mut self.description,
            other => return Err(unknown_field(Self::LIST.as_str(), other)),
        };
        *slot = value.to_string();
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

impl ListEntry for EducationEntry {
    const LIST: ListName = ListName::Education;

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), ResumeError> {
        let slot = match field {
            "degree" => &mut self.degree,
            "institution" => &mut self.institution,
            "location" => &mut self.location,
            "startDate" => &mut self.start_date,
            "endDate" => &mut self.end_date,
            "description" => &mut self.description,
            other => return Err(unknown_field(Self::LIST.as_str(), other)),
        };
        *slot = value.to_string();
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    pub skill_name: String,
    pub proficiency: u8,
}

impl Default for SkillEntry {
    fn default() -> Self {
        Self {
            skill_name: String::new(),
            proficiency: DEFAULT_PROFICIENCY,
        }
    }
}

impl ListEntry for SkillEntry {
    const LIST: ListName = ListName::Skills;

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), ResumeError> {
        match field {
            "skillName" => self.skill_name = value.to_string(),
            "proficiency" => self.proficiency = parse_proficiency(value)?,
            other => return Err(unknown_field(Self::LIST.as_str(), other)),
        }
        Ok(())
    }
}

/// Coerces slider input to an integer percentage.
///
/// Blank input reads as 0, fractions truncate toward zero, and the result is
/// clamped to `0..=100`. Anything that is not a finite number is rejected.
pub fn parse_proficiency(value: &str) -> Result<u8, ResumeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let number: f64 = trimmed
        .parse()
        .map_err(|_| ResumeError::InvalidProficiency(value.to_string()))?;
    if !number.is_finite() {
        return Err(ResumeError::InvalidProficiency(value.to_string()));
    }
    Ok(number.trunc().clamp(0.0, MAX_PROFICIENCY as f64) as u8)
}

/// An entry plus the id it was created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyed<T> {
    pub id: EntryId,
    #[serde(flatten)]
    pub entry: T,
}

/// Ordered list of entries addressable by position or by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList<T> {
    items: Vec<Keyed<T>>,
}

impl<T> Default for EntryList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: ListEntry> EntryList<T> {
    /// A list holding one empty entry, as a fresh form starts.
    pub fn seeded() -> Self {
        let mut list = Self::default();
        list.append();
        list
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyed<T>> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Keyed<T>> {
        self.items.get(index)
    }

    pub fn find(&self, id: EntryId) -> Option<&Keyed<T>> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Appends an empty entry and returns its id.
    pub fn append(&mut self) -> EntryId {
        let id = EntryId::new();
        self.items.push(Keyed {
            id,
            entry: T::default(),
        });
        id
    }

    fn check_index(&self, index: usize) -> Result<(), ResumeError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(ResumeError::IndexOutOfRange {
                list: T::LIST,
                index,
                len: self.items.len(),
            })
        }
    }

    fn index_of(&self, id: EntryId) -> Result<usize, ResumeError> {
        self.position(id)
            .ok_or(ResumeError::UnknownEntry { list: T::LIST, id })
    }

    pub fn update_at(&mut self, index: usize, field: &str, value: &str) -> Result<(), ResumeError> {
        self.check_index(index)?;
        self.items[index].entry.set_field(field, value)
    }

    pub fn update(&mut self, id: EntryId, field: &str, value: &str) -> Result<(), ResumeError> {
        let index = self.index_of(id)?;
        self.items[index].entry.set_field(field, value)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Keyed<T>, ResumeError> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    pub fn remove(&mut self, id: EntryId) -> Result<Keyed<T>, ResumeError> {
        let index = self.index_of(id)?;
        Ok(self.items.remove(index))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal: PersonalInfo,
    pub experiences: EntryList<ExperienceEntry>,
    pub education: EntryList<EducationEntry>,
    pub skills: EntryList<SkillEntry>,
}

/// Runs `$body` with `$l` bound to the named list, whatever its entry type.
macro_rules! on_list {
    ($doc:expr, $list:expr, |$l:ident| $body:expr) => {
        match $list {
            ListName::Experiences => {
                let $l = &mut $doc.experiences;
                $body
            }
            ListName::Education => {
                let $l = &mut $doc.education;
                $body
            }
            ListName::Skills => {
                let $l = &mut $doc.skills;
                $body
            }
        }
    };
}

/// Result of appending an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appended {
    pub entry_id: EntryId,
    pub length: usize,
}

impl Default for ResumeDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeDocument {
    /// Fresh document: empty personal block, each list seeded with one empty
    /// entry.
    pub fn new() -> Self {
        Self {
            personal: PersonalInfo::default(),
            experiences: EntryList::seeded(),
            education: EntryList::seeded(),
            skills: EntryList::seeded(),
        }
    }

    pub fn update_field(&mut self, field: &str, value: &str) -> Result<(), ResumeError> {
        self.personal.set_field(field, value)
    }

    pub fn update_list_item(
        &mut self,
        list: ListName,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<(), ResumeError> {
        on_list!(self, list, |l| l.update_at(index, field, value))
    }

    pub fn append_list_item(&mut self, list: ListName) -> Appended {
        on_list!(self, list, |l| Appended {
            entry_id: l.append(),
            length: l.len(),
        })
    }

    pub fn remove_list_item(&mut self, list: ListName, index: usize) -> Result<(), ResumeError> {
        on_list!(self, list, |l| l.remove_at(index).map(|_| ()))
    }

    pub fn update_entry(
        &mut self,
        list: ListName,
        id: EntryId,
        field: &str,
        value: &str,
    ) -> Result<(), ResumeError> {
        on_list!(self, list, |l| l.update(id, field, value))
    }

    pub fn remove_entry(&mut self, list: ListName, id: EntryId) -> Result<(), ResumeError> {
        on_list!(self, list, |l| l.remove(id).map(|_| ()))
    }
}
