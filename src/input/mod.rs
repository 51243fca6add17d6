//! Chat input logic
//!
//! UI-independent state and behavior behind the chat input: file validation,
//! the draft/attachment/error state, and the controller that ties them to an
//! uploader and a send callback.

pub mod controller;
pub mod state;
pub mod validation;

pub use controller::InputController;
pub use state::{ChatInputState, OutgoingMessage, SendPlan};

use crate::upload::UploadError;
use thiserror::Error;

/// Errors shown to the user in the input's error line
///
/// The `Display` text is the exact message rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Cannot send an empty message.")]
    EmptySubmission,
    #[error("File too large. Maximum size is {limit_mb}MB.")]
    FileTooLarge { limit_mb: u64 },
    #[error("Unsupported file type. Please upload an image, PDF, or document.")]
    UnsupportedFileType(String),
    #[error("Could not read the selected file.")]
    FileUnreadable(String),
    #[error("Failed to upload file. Please try again.")]
    UploadFailed { reason: String },
    /// A send was attempted while an upload is still running. Never displayed.
    #[error("A file upload is already in progress.")]
    UploadInProgress,
}

impl From<UploadError> for InputError {
    fn from(err: UploadError) -> Self {
        InputError::UploadFailed {
            reason: err.to_string(),
        }
    }
}
