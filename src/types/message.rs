//! Message types
//!
//! Defines the record kept for each message sent from the input.

use crate::types::attachment::UploadResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A message sent from the chat input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique identifier, used as the render key
    pub id: String,
    /// The message text as typed
    pub text: String,
    /// The uploaded file, if one was attached
    pub attachment: Option<UploadResult>,
    /// When the message was sent
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new message stamped with the current time
    pub fn new(text: impl Into<String>, attachment: Option<UploadResult>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            attachment,
            sent_at: Utc::now(),
        }
    }

    /// Whether there is any text to show besides the attachment
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
