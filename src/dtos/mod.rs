pub mod inventory;
pub mod transaction;
pub mod sale;
pub mod expense;
pub mod invoice;
pub mod report;
pub mod user;

use serde::Serialize;

// Shared shape for plain success/message mutations.
#[derive(Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }
}
