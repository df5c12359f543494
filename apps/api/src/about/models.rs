use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One independently editable and persisted unit of the About page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AboutSection {
    AboutMe,
    Skills,
    WorkExperience,
}

impl AboutSection {
    pub const ALL: [AboutSection; 3] = [
        AboutSection::AboutMe,
        AboutSection::Skills,
        AboutSection::WorkExperience,
    ];

    /// Storage key for this section. Equal to the section's wire name.
    pub fn storage_key(self) -> &'static str {
        match self {
            AboutSection::AboutMe => "aboutMe",
            AboutSection::Skills => "skills",
            AboutSection::WorkExperience => "workExperience",
        }
    }
}

impl fmt::Display for AboutSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

impl FromStr for AboutSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AboutSection::ALL
            .into_iter()
            .find(|section| section.storage_key() == s)
            .ok_or_else(|| format!("Unknown about section '{s}'"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategories {
    #[serde(default)]
    pub frontend: Vec<String>,
    #[serde(default)]
    pub backend: Vec<String>,
    #[serde(default)]
    pub database: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
}

/// The About page's full state, as shown in the viewing mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutRecord {
    pub about_me: String,
    pub skills: SkillCategories,
    pub work_experience: Vec<WorkItem>,
}

impl AboutRecord {
    pub fn apply(&mut self, value: SectionValue) {
        match value {
            SectionValue::AboutMe(text) => self.about_me = text,
            SectionValue::Skills(skills) => self.skills = skills,
            SectionValue::WorkExperience(items) => self.work_experience = items,
        }
    }
}

impl Default for AboutRecord {
    fn default() -> Self {
        Self {
            about_me: default_about_me(),
            skills: default_skills(),
            work_experience: default_work_experience(),
        }
    }
}

/// The structured value of a single section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", content = "value", rename_all = "camelCase")]
pub enum SectionValue {
    AboutMe(String),
    Skills(SkillCategories),
    WorkExperience(Vec<WorkItem>),
}

impl SectionValue {
    pub fn section(&self) -> AboutSection {
        match self {
            SectionValue::AboutMe(_) => AboutSection::AboutMe,
            SectionValue::Skills(_) => AboutSection::Skills,
            SectionValue::WorkExperience(_) => AboutSection::WorkExperience,
        }
    }

    pub fn default_for(section: AboutSection) -> Self {
        match section {
            AboutSection::AboutMe => SectionValue::AboutMe(default_about_me()),
            AboutSection::Skills => SectionValue::Skills(default_skills()),
            AboutSection::WorkExperience => SectionValue::WorkExperience(default_work_experience()),
        }
    }
}

pub fn default_about_me() -> String {
    "I'm a passionate developer with expertise in creating modern web applications and digital experiences."
        .to_string()
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_skills() -> SkillCategories {
    SkillCategories {
        frontend: owned(&[
            "React",
            "Vue.js",
            "Angular",
            "JavaScript/TypeScript",
            "HTML5/CSS3",
            "Tailwind CSS",
            "SASS/SCSS",
        ]),
        backend: owned(&[
            "Node.js",
            "Express",
            "Django",
            "Ruby on Rails",
            "PHP",
            "RESTful APIs",
            "GraphQL",
        ]),
        database: owned(&[
            "MongoDB",
            "PostgreSQL",
            "MySQL",
            "Firebase",
            "Redis",
            "Supabase",
            "Prisma ORM",
        ]),
    }
}

pub fn default_work_experience() -> Vec<WorkItem> {
    vec![
        WorkItem {
            title: "Senior Frontend Developer".to_string(),
            company: "TechCorp Solutions".to_string(),
            period: "2022 - Present".to_string(),
            description: "Leading the frontend development team in building scalable web applications. Implementing modern UI/UX designs and optimizing performance.".to_string(),
        },
        WorkItem {
            title: "Full Stack Developer".to_string(),
            company: "Digital Innovations".to_string(),
            period: "2019 - 2022".to_string(),
            description: "Developed and maintained full-stack applications using React, Node.js, and MongoDB. Collaborated with design and product teams to deliver high-quality software.".to_string(),
        },
    ]
}
