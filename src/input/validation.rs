//! Client-side file checks
//!
//! Size is checked before type, so an oversize file of an unsupported type
//! reports the size error.

use crate::input::InputError;
use crate::types::attachment::FileHandle;

/// 5 MB upload ceiling
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// MIME types accepted as attachments
pub const ALLOWED_FILE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "application/pdf",
    "text/plain",
    // .docx
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    // .xlsx
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// Whether a MIME type may be attached
pub fn is_allowed_type(mime_type: &str) -> bool {
    ALLOWED_FILE_TYPES.contains(&mime_type)
}

/// Check a picked file against the size ceiling and the type allow-list
pub fn validate_file(file: &dyn FileHandle) -> Result<(), InputError> {
    if file.size_bytes() > MAX_FILE_SIZE {
        return Err(InputError::FileTooLarge {
            limit_mb: MAX_FILE_SIZE / 1024 / 1024,
        });
    }

    if !is_allowed_type(file.mime_type()) {
        return Err(InputError::UnsupportedFileType(file.mime_type().to_string()));
    }

    Ok(())
}
