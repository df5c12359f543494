//! Read-only projection of a `ResumeDocument` for display.
//!
//! Pure and uncached: recomputed from the document on every read.

use serde::Serialize;

use super::document::ResumeDocument;

pub const NAME_PLACEHOLDER: &str = "Your Name";
pub const TITLE_PLACEHOLDER: &str = "Professional Title";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Email,
    Phone,
    Location,
    Website,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactItem {
    pub kind: ContactKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePreview {
    pub job_title: String,
    pub company: String,
    /// `"{location} | {start} - {end}"`
    pub meta: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationPreview {
    pub degree: String,
    pub institution: String,
    pub location: String,
    /// `"{start} - {end}"`
    pub meta: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPreview {
    pub skill_name: String,
    pub proficiency: u8,
    /// `"{name} - {proficiency}%"`
    pub label: String,
}

/// Display structure. Optional blocks are `None` when their source is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewView {
    pub name: String,
    pub title: String,
    pub contact: Vec<ContactItem>,
    pub summary: Option<String>,
    pub experience: Option<Vec<ExperiencePreview>>,
    pub education: Option<Vec<EducationPreview>>,
    pub skills: Option<Vec<SkillPreview>>,
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// Presence is an empty-string check only; whitespace counts as content.
fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn non_empty_list<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

pub fn project(doc: &ResumeDocument) -> PreviewView {
    let personal = &doc.personal;

    let contact = [
        (ContactKind::Email, &personal.email),
        (ContactKind::Phone, &personal.phone),
        (ContactKind::Location, &personal.location),
        (ContactKind::Website, &personal.website),
    ]
    .into_iter()
    .filter_map(|(kind, value)| {
        non_empty(value).map(|value| ContactItem { kind, value })
    })
    .collect();

    let experience = doc
        .experiences
        .iter()
        .map(|item| {
            let e = &item.entry;
            ExperiencePreview {
                job_title: e.job_title.clone(),
                company: e.company.clone(),
                meta: format!("{} | {} - {}", e.location, e.start_date, e.end_date),
                description: e.description.clone(),
            }
        })
        .collect();

    let education = doc
        .education
        .iter()
        .map(|item| {
            let e = &item.entry;
            EducationPreview {
                degree: e.degree.clone(),
                institution: e.institution.clone(),
                location: e.location.clone(),
                meta: format!("{} - {}", e.start_date, e.end_date),
                description: e.description.clone(),
            }
        })
        .collect();

    let skills = doc
        .skills
        .iter()
        .map(|item| {
            let s = &item.entry;
            SkillPreview {
                skill_name: s.skill_name.clone(),
                proficiency: s.proficiency,
                label: format!("{} - {}%", s.skill_name, s.proficiency),
            }
        })
        .collect();

    PreviewView {
        name: or_placeholder(&personal.full_name, NAME_PLACEHOLDER),
        title: or_placeholder(&personal.professional_title, TITLE_PLACEHOLDER),
        contact,
        summary: non_empty(&personal.summary),
        experience: non_empty_list(experience),
        education: non_empty_list(education),
        skills: non_empty_list(skills),
    }
}

/// Renders the preview as a Markdown document for download.
pub fn render_markdown(view: &PreviewView) -> String {
    let mut md = format!("# {}\n\n_{}_\n\n", view.name, view.title);

    if !view.contact.is_empty() {
        let line = view
            .contact
            .iter()
            .map(|c| c.value.as_str())
            .collect::<Vec<_>>()
            .join(" · ");
        md.push_str(&line);
        md.push_str("\n\n");
    }

    if let Some(summary) = &view.summary {
        md.push_str("## Professional Summary\n\n");
        md.push_str(summary);
        md.push_str("\n\n");
    }

    if let Some(experience) = &view.experience {
        md.push_str("## Experience\n\n");
        for e in experience {
            md.push_str(&format!("### {}\n", e.job_title));
            md.push_str(&format!("**{}**  \n{}\n\n", e.company, e.meta));
            if !e.description.is_empty() {
                md.push_str(&format!("{}\n\n", e.description));
            }
        }
    }

    if let Some(education) = &view.education {
        md.push_str("## Education\n\n");
        for e in education {
            md.push_str(&format!("### {}\n", e.degree));
            md.push_str(&format!(
                "**{}**  \n{}  \n{}\n\n",
                e.institution, e.location, e.meta
            ));
            if !e.description.is_empty() {
                md.push_str(&format!("{}\n\n", e.description));
            }
        }
    }

    if let Some(skills) = &view.skills {
        md.push_str("## Skills\n\n");
        for s in skills {
            md.push_str(&format!("- {}\n", s.label));
        }
        md.push('\n');
    }

    md
}
