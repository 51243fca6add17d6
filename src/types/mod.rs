//! Shared data types
//!
//! Attachments, upload results and sent messages.

pub mod attachment;
pub mod message;

pub use attachment::{Attachment, FileHandle, LocalFile, SelectedFile, UploadResult};
pub use message::ChatMessage;
