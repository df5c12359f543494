//! Contact form submission. Nothing is delivered anywhere; accepted messages
//! are written to the log.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub received: bool,
}

pub fn validate_contact(request: &ContactRequest) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if request.name.trim().is_empty() {
        missing.push("name");
    }
    if request.email.trim().is_empty() {
        missing.push("email");
    }
    if request.message.trim().is_empty() {
        missing.push("message");
    }
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }
    if !request.email.contains('@') {
        return Err(AppError::Validation(format!(
            "'{}' is not an email address",
            request.email
        )));
    }
    Ok(())
}

/// POST /api/v1/contact
pub async fn handle_contact(
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    validate_contact(&request)?;
    info!(
        name = %request.name,
        email = %request.email,
        subject = %request.subject,
        message_len = request.message.len(),
        "Contact form submitted"
    );
    Ok((StatusCode::ACCEPTED, Json(ContactResponse { received: true })))
}
