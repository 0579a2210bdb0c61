// SPDX-License-Identifier: MIT

//! Contact-form submission route.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::contact::{ContactMessage, ContactRequest};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/contact/submit", post(submit_contact))
}

#[derive(Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub data: ContactData,
}

#[derive(Serialize)]
pub struct ContactData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

/// Validate and persist a contact-form submission.
async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>)> {
    req.validate()
        .map_err(|_| AppError::BadRequest("Name, email, and message are required".to_string()))?;

    let message = ContactMessage::from_request(req);
    state.db.insert_contact(&message).await?;

    tracing::info!(id = %message.id, "Contact message stored");

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            message: "Message sent successfully!".to_string(),
            data: ContactData {
                id: message.id,
                name: message.name,
                email: message.email,
                created_at: message.created_at,
            },
        }),
    ))
}
