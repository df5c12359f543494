pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::about::handlers as about;
use crate::chat::handlers as chat;
use crate::contact;
use crate::projects;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // About content contract
        .route(
            "/api/about",
            get(about::handle_get_about_content).post(about::handle_save_about_content),
        )
        // About page editor
        .route("/api/v1/about", get(about::handle_get_about))
        .route("/api/v1/about/edit/:section", post(about::handle_begin_edit))
        .route("/api/v1/about/draft", put(about::handle_update_draft))
        .route("/api/v1/about/save", post(about::handle_save))
        .route("/api/v1/about/cancel", post(about::handle_cancel))
        // Resume Builder
        .route("/api/v1/resumes", post(resume::handle_create_resume))
        .route(
            "/api/v1/resumes/:id",
            get(resume::handle_get_resume).delete(resume::handle_close_resume),
        )
        .route(
            "/api/v1/resumes/:id/personal",
            patch(resume::handle_update_personal),
        )
        .route("/api/v1/resumes/:id/preview", get(resume::handle_preview))
        .route("/api/v1/resumes/:id/export", get(resume::handle_export))
        .route("/api/v1/resumes/:id/:list", post(resume::handle_append_entry))
        .route(
            "/api/v1/resumes/:id/:list/:entry_id",
            patch(resume::handle_update_entry).delete(resume::handle_remove_entry),
        )
        .route(
            "/api/v1/resumes/:id/:list/at/:index",
            patch(resume::handle_update_entry_at).delete(resume::handle_remove_entry_at),
        )
        // Chatbot
        .route("/api/v1/chats", post(chat::handle_create_chat))
        .route(
            "/api/v1/chats/:id",
            get(chat::handle_get_chat).delete(chat::handle_close_chat),
        )
        .route("/api/v1/chats/:id/messages", post(chat::handle_send_message))
        // Projects & contact
        .route("/api/v1/projects", get(projects::handle_list_projects))
        .route("/api/v1/contact", post(contact::handle_contact))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    async fn test_app() -> (AppState, Router) {
        let state = AppState::in_memory(Config::for_tests()).await.unwrap();
        (state.clone(), build_router(state))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let (_, app) = test_app().await;
        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }

    #[tokio::test]
    async fn test_about_edit_save_cycle_persists_to_store() {
        let (state, app) = test_app().await;

        let (status, body) = call(&app, Method::POST, "/api/v1/about/edit/aboutMe", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["editing"], "aboutMe");
        assert_eq!(body["draft"]["section"], "aboutMe");

        let (status, _) = call(
            &app,
            Method::PUT,
            "/api/v1/about/draft",
            Some(json!({"section": "aboutMe", "text": "New bio"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(&app, Method::POST, "/api/v1/about/save", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["aboutMe"], "New bio");
        assert!(body["editing"].is_null());

        assert_eq!(
            state.store.get("aboutMe").await.unwrap().as_deref(),
            Some("New bio")
        );
        let (_, text) = call(&app, Method::GET, "/api/about", None).await;
        assert_eq!(text, "New bio");
    }

    #[tokio::test]
    async fn test_about_draft_rules_over_http() {
        let (_, app) = test_app().await;

        let (status, _) = call(&app, Method::POST, "/api/v1/about/save", None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = call(&app, Method::POST, "/api/v1/about/edit/hobbies", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        call(&app, Method::POST, "/api/v1/about/edit/skills", None).await;
        let (status, _) = call(
            &app,
            Method::PUT,
            "/api/v1/about/draft",
            Some(json!({"section": "aboutMe", "text": "wrong section"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = call(&app, Method::POST, "/api/v1/about/cancel", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["draft"].is_null());
        assert_eq!(body["skills"]["frontend"][0], "React");
    }

    #[tokio::test]
    async fn test_legacy_about_post_returns_success() {
        let (_, app) = test_app().await;
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/about",
            Some(json!({"content": "Posted bio"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (_, view) = call(&app, Method::GET, "/api/v1/about", None).await;
        assert_eq!(view["aboutMe"], "Posted bio");
    }

    #[tokio::test]
    async fn test_resume_session_flow() {
        let (_, app) = test_app().await;

        let (status, created) = call(&app, Method::POST, "/api/v1/resumes", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["preview"]["name"], "Your Name");

        let (status, updated) = call(
            &app,
            Method::PATCH,
            &format!("/api/v1/resumes/{id}/personal"),
            Some(json!({"field": "summary", "value": " "})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["preview"]["summary"], " ");

        let (status, appended) =
            call(&app, Method::POST, &format!("/api/v1/resumes/{id}/skills"), None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(appended["length"], 2);
        let entry_id = appended["entryId"].as_str().unwrap().to_string();

        let (status, updated) = call(
            &app,
            Method::PATCH,
            &format!("/api/v1/resumes/{id}/skills/{entry_id}"),
            Some(json!({"field": "proficiency", "value": "75"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["document"]["skills"][1]["proficiency"], json!(75));

        let (status, removed) = call(
            &app,
            Method::DELETE,
            &format!("/api/v1/resumes/{id}/skills/{entry_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(removed["document"]["skills"].as_array().unwrap().len(), 1);

        let (status, _) = call(
            &app,
            Method::DELETE,
            &format!("/api/v1/resumes/{id}/skills/{entry_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, Method::DELETE, &format!("/api/v1/resumes/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&app, Method::GET, &format!("/api/v1/resumes/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_resume_bad_inputs() {
        let (_, app) = test_app().await;
        let (_, created) = call(&app, Method::POST, "/api/v1/resumes", None).await;
        let id = created["id"].as_str().unwrap().to_string();
        let skill_id = created["document"]["skills"][0]["id"].as_str().unwrap().to_string();

        let (status, _) =
            call(&app, Method::POST, &format!("/api/v1/resumes/{id}/hobbies"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(
            &app,
            Method::PATCH,
            &format!("/api/v1/resumes/{id}/skills/{skill_id}"),
            Some(json!({"field": "proficiency", "value": "very"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(
            &app,
            Method::PATCH,
            &format!("/api/v1/resumes/{id}/skills/not-a-uuid"),
            Some(json!({"field": "skillName", "value": "Rust"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, updated) = call(
            &app,
            Method::PATCH,
            &format!("/api/v1/resumes/{id}/skills/{skill_id}"),
            Some(json!({"field": "proficiency", "value": 30})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["document"]["skills"][0]["proficiency"], json!(30));
    }

    #[tokio::test]
    async fn test_resume_entries_by_position() {
        let (_, app) = test_app().await;
        let (_, created) = call(&app, Method::POST, "/api/v1/resumes", None).await;
        let id = created["id"].as_str().unwrap().to_string();
        call(&app, Method::POST, &format!("/api/v1/resumes/{id}/experiences"), None).await;
        call(&app, Method::POST, &format!("/api/v1/resumes/{id}/experiences"), None).await;

        for (index, title) in ["First", "Second", "Third"].iter().enumerate() {
            let (status, _) = call(
                &app,
                Method::PATCH,
                &format!("/api/v1/resumes/{id}/experiences/at/{index}"),
                Some(json!({"field": "jobTitle", "value": title})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, removed) = call(
            &app,
            Method::DELETE,
            &format!("/api/v1/resumes/{id}/experiences/at/1"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = removed["document"]["experiences"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["jobTitle"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["First", "Third"]);

        let (status, body) = call(
            &app,
            Method::PATCH,
            &format!("/api/v1/resumes/{id}/experiences/at/2"),
            Some(json!({"field": "jobTitle", "value": "Missing"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (status, _) = call(
            &app,
            Method::DELETE,
            &format!("/api/v1/resumes/{id}/skills/at/1"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_resume_export_is_markdown() {
        let (_, app) = test_app().await;
        let (_, created) = call(&app, Method::POST, "/api/v1/resumes", None).await;
        let id = created["id"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/resumes/{id}/export"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/markdown; charset=utf-8"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8(bytes.to_vec()).unwrap().starts_with("# Your Name"));
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_and_accepts_text() {
        let (_, app) = test_app().await;
        let (status, created) = call(&app, Method::POST, "/api/v1/chats", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["messages"][0]["sender"], "bot");

        let uri = format!("/api/v1/chats/{id}/messages");
        let (status, _) = call(&app, Method::POST, &uri, Some(json!({"text": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, sent) = call(&app, Method::POST, &uri, Some(json!({"text": "Hi"}))).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(sent["sender"], "user");

        let (status, _) = call(&app, Method::DELETE, &format!("/api/v1/chats/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_projects_filtering_and_contact() {
        let (_, app) = test_app().await;
        let (status, body) = call(
            &app,
            Method::GET,
            "/api/v1/projects?category=Mobile%20Apps&search=trip",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["projects"].as_array().unwrap().len(), 1);
        assert_eq!(body["projects"][0]["title"], "Travel Companion App");
        assert_eq!(body["categories"][0], "All");

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/contact",
            Some(json!({"name": "Ada", "email": "ada@example.com", "message": "Hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
    }
}
