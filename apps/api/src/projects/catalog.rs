use serde::{Deserialize, Serialize};

pub const ALL_CATEGORIES: &str = "All";
pub const CATEGORIES: [&str; 5] = [
    ALL_CATEGORIES,
    "Web Development",
    "Mobile Apps",
    "UI/UX Design",
    "Machine Learning",
];

const IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1506744038136-46273834b3fb?auto=format&fit=crop&w=800&q=80";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image_url: String,
}

fn project(id: u32, title: &str, description: &str, category: &str, tags: &[&str]) -> Project {
    Project {
        id,
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        image_url: IMAGE_URL.to_string(),
    }
}

pub fn catalog() -> Vec<Project> {
    vec![
        project(
            1,
            "Sentiment Analysis Tool",
            "Machine learning application that analyzes text data to determine sentiment and emotional tone.",
            "Machine Learning",
            &["Python", "TensorFlow", "NLTK", "Flask"],
        ),
        project(
            2,
            "Social Media Platform",
            "A social networking platform with real-time messaging, post sharing, and user connections.",
            "Web Development",
            &["React", "Socket.io", "Express", "PostgreSQL"],
        ),
        project(
            3,
            "Travel Companion App",
            "Mobile app for planning trips, discovering local attractions, and sharing travel experiences.",
            "Mobile Apps",
            &["Flutter", "Dart", "Google Maps API"],
        ),
        project(
            4,
            "E-commerce Website",
            "A full-stack e-commerce platform with product listings, shopping cart, and payment integration.",
            "Web Development",
            &["React", "Node.js", "MongoDB", "Stripe"],
        ),
        project(
            5,
            "Portfolio Website",
            "Personal portfolio website showcasing projects, skills, and contact information.",
            "UI/UX Design",
            &["HTML", "CSS", "JavaScript", "Figma"],
        ),
    ]
}

/// Category must match exactly unless it is `All`; the search term matches
/// title or description case-insensitively. An empty term matches everything.
pub fn filter<'a>(projects: &'a [Project], category: &str, search: &str) -> Vec<&'a Project> {
    let needle = search.to_lowercase();
    projects
        .iter()
        .filter(|p| category == ALL_CATEGORIES || p.category == category)
        .filter(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect()
}
