//! Contact-form message model.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A contact-form submission as received from the frontend.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 300))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000, message = "message is required"))]
    pub message: String,
}

/// A stored contact-form message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Submission time (RFC 3339)
    pub created_at: String,
}

impl ContactMessage {
    pub fn from_request(req: ContactRequest) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: req.name,
            email: req.email,
            subject: req.subject,
            message: req.message,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
