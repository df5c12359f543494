// Projects page: static catalog with category and text filtering.

pub mod catalog;

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use self::catalog::{catalog, filter, Project, ALL_CATEGORIES, CATEGORIES};

#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub categories: Vec<&'static str>,
    pub projects: Vec<Project>,
}

/// GET /api/v1/projects?category=&search=
pub async fn handle_list_projects(Query(query): Query<ProjectQuery>) -> Json<ProjectListResponse> {
    let projects = catalog();
    let category = query.category.as_deref().unwrap_or(ALL_CATEGORIES);
    let search = query.search.as_deref().unwrap_or_default();
    let matches = filter(&projects, category, search)
        .into_iter()
        .cloned()
        .collect();
    Json(ProjectListResponse {
        categories: CATEGORIES.to_vec(),
        projects: matches,
    })
}
