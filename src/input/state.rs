//! Chat input state
//!
//! Every transition is synchronous. Callers perform the file read and the
//! upload between the `begin_*` and `finish_*`/`complete_*` steps, so a UI
//! can keep this struct in a reactive signal without borrowing it across an
//! await.

use crate::input::validation::{validate_file, MAX_FILE_SIZE};
use crate::input::InputError;
use crate::types::attachment::{Attachment, FileHandle, UploadResult};
use crate::upload::UploadError;
use std::io;

/// Draft text, staged attachment, error line and upload flag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatInputState {
    draft: String,
    attachment: Option<Attachment>,
    error: Option<InputError>,
    uploading: bool,
}

/// What a started send will deliver, captured when the send began
#[derive(Debug, Clone, PartialEq)]
pub struct SendPlan {
    pub text: String,
    pub attachment: Option<Attachment>,
}

/// The payload handed to the send callback
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub text: String,
    pub file: Option<UploadResult>,
}

impl ChatInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn error(&self) -> Option<&InputError> {
        self.error.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Whether a send would pass the non-empty check
    pub fn can_send(&self) -> bool {
        !self.draft.trim().is_empty() || self.attachment.is_some()
    }

    /// Clear the error line and check a picked file before reading it.
    ///
    /// On rejection the error is set and the current attachment is kept.
    pub fn begin_file_selection(&mut self, file: &dyn FileHandle) -> Result<(), InputError> {
        self.error = None;

        if let Err(err) = validate_file(file) {
            tracing::warn!(
                "Rejected file {} ({}, {} bytes): {}",
                file.name(),
                file.mime_type(),
                file.size_bytes(),
                err
            );
            self.error = Some(err.clone());
            return Err(err);
        }

        Ok(())
    }

    /// Stage a validated file, replacing any previous attachment.
    ///
    /// The size is taken from the bytes actually read, which must still fit
    /// under the ceiling; a file can grow between the check and the read.
    pub fn finish_file_selection(
        &mut self,
        file: &dyn FileHandle,
        bytes: &[u8],
    ) -> Result<(), InputError> {
        let size_bytes = bytes.len() as u64;
        if size_bytes > MAX_FILE_SIZE {
            tracing::warn!(
                "Rejected file {}: read {} bytes, over the limit",
                file.name(),
                size_bytes
            );
            let err = InputError::FileTooLarge {
                limit_mb: MAX_FILE_SIZE / 1024 / 1024,
            };
            self.error = Some(err.clone());
            return Err(err);
        }

        tracing::debug!("Attached {} ({} bytes)", file.name(), size_bytes);
        self.attachment = Some(Attachment::new(
            file.name(),
            file.mime_type(),
            size_bytes,
            bytes,
        ));
        self.error = None;
        Ok(())
    }

    /// Record that a validated file could not be read
    pub fn fail_file_read(&mut self, err: &io::Error) -> InputError {
        tracing::warn!("Failed to read selected file: {}", err);
        let err = InputError::FileUnreadable(err.to_string());
        self.error = Some(err.clone());
        err
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn remove_attachment(&mut self) {
        self.attachment = None;
    }

    /// Start a send.
    ///
    /// Rejects a second send while an upload is running without touching any
    /// state. Rejects an empty submission with a visible error. Otherwise
    /// marks the upload as running when an attachment is present.
    pub fn begin_send(&mut self) -> Result<SendPlan, InputError> {
        if self.uploading {
            tracing::debug!("Ignoring send while an upload is in progress");
            return Err(InputError::UploadInProgress);
        }

        if !self.can_send() {
            self.error = Some(InputError::EmptySubmission);
            return Err(InputError::EmptySubmission);
        }

        if self.attachment.is_some() {
            self.uploading = true;
        }

        Ok(SendPlan {
            text: self.draft.clone(),
            attachment: self.attachment.clone(),
        })
    }

    /// Finish a send with the upload outcome.
    ///
    /// A failed upload keeps the draft and attachment for a retry. A
    /// successful one resets the input and yields the message to deliver.
    pub fn complete_send(
        &mut self,
        plan: SendPlan,
        upload: Result<Option<UploadResult>, UploadError>,
    ) -> Result<OutgoingMessage, InputError> {
        self.uploading = false;

        let file = match upload {
            Ok(file) => file,
            Err(err) => {
                tracing::warn!("File upload failed: {}", err);
                let err = InputError::from(err);
                self.error = Some(err.clone());
                return Err(err);
            }
        };

        self.draft.clear();
        self.attachment = None;
        self.error = None;

        Ok(OutgoingMessage {
            text: plan.text,
            file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::attachment::SelectedFile;

    fn attach(state: &mut ChatInputState, file: &SelectedFile) {
        state.begin_file_selection(file).unwrap();
        state.finish_file_selection(file, &file.bytes).unwrap();
    }

    fn upload_result() -> UploadResult {
        UploadResult {
            remote_id: "abc123".to_string(),
            name: "notes.txt".to_string(),
            mime_type: "text/plain".to_string(),
            size_bytes: 5,
            download_url: "http://localhost:8001/file/download/abc123".to_string(),
        }
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = ChatInputState::new();
        assert_eq!(state.draft(), "");
        assert!(state.attachment().is_none());
        assert!(state.error().is_none());
        assert!(!state.is_uploading());
        assert!(!state.can_send());
    }

    #[test]
    fn test_valid_file_is_staged() {
        let mut state = ChatInputState::new();
        let file = SelectedFile::new("notes.txt", "text/plain", b"hello".to_vec());
        attach(&mut state, &file);

        let staged = state.attachment().unwrap();
        assert_eq!(staged.name, "notes.txt");
        assert_eq!(staged.mime_type, "text/plain");
        assert_eq!(staged.size_bytes, 5);
        assert_eq!(staged.base64_content, "aGVsbG8=");
        assert!(state.can_send());
    }

    #[test]
    fn test_oversize_file_keeps_previous_attachment() {
        let mut state = ChatInputState::new();
        let small = SelectedFile::new("a.png", "image/png", vec![1; 10]);
        attach(&mut state, &small);

        let big = SelectedFile::new("b.png", "image/png", vec![0; MAX_FILE_SIZE as usize + 1]);
        let err = state.begin_file_selection(&big).unwrap_err();

        assert_eq!(err, InputError::FileTooLarge { limit_mb: 5 });
        assert_eq!(state.error(), Some(&err));
        assert_eq!(state.attachment().unwrap().name, "a.png");
    }

    #[test]
    fn test_unsupported_file_keeps_previous_attachment() {
        let mut state = ChatInputState::new();
        let small = SelectedFile::new("a.png", "image/png", vec![1; 10]);
        attach(&mut state, &small);

        let zip = SelectedFile::new("b.zip", "application/zip", vec![0; 10]);
        assert!(matches!(
            state.begin_file_selection(&zip),
            Err(InputError::UnsupportedFileType(_))
        ));
        assert_eq!(state.attachment().unwrap().name, "a.png");
    }

    #[test]
    fn test_new_selection_clears_error_and_replaces_attachment() {
        let mut state = ChatInputState::new();
        let _ = state.begin_send();
        assert_eq!(state.error(), Some(&InputError::EmptySubmission));

        attach(&mut state, &SelectedFile::new("a.png", "image/png", vec![1]));
        attach(&mut state, &SelectedFile::new("b.gif", "image/gif", vec![2]));

        assert!(state.error().is_none());
        assert_eq!(state.attachment().unwrap().name, "b.gif");
    }

    #[test]
    fn test_size_comes_from_bytes_read() {
        let mut state = ChatInputState::new();
        // Handle reports 3 bytes, but the read returned 5
        let file = SelectedFile::new("notes.txt", "text/plain", b"abc".to_vec());
        state.begin_file_selection(&file).unwrap();
        state.finish_file_selection(&file, b"hello").unwrap();

        assert_eq!(state.attachment().unwrap().size_bytes, 5);
    }

    #[test]
    fn test_file_grown_past_limit_is_rejected_after_read() {
        let mut state = ChatInputState::new();
        attach(&mut state, &SelectedFile::new("a.png", "image/png", vec![1; 10]));

        let file = SelectedFile::new("b.txt", "text/plain", b"tiny".to_vec());
        state.begin_file_selection(&file).unwrap();
        let grown = vec![0; MAX_FILE_SIZE as usize + 100];
        let err = state.finish_file_selection(&file, &grown).unwrap_err();

        assert_eq!(err, InputError::FileTooLarge { limit_mb: 5 });
        assert_eq!(state.error(), Some(&err));
        assert_eq!(state.attachment().unwrap().name, "a.png");
    }

    #[test]
    fn test_clear_error() {
        let mut state = ChatInputState::new();
        let _ = state.begin_send();
        assert!(state.error().is_some());

        state.clear_error();
        assert!(state.error().is_none());
    }

    #[test]
    fn test_read_failure_sets_error() {
        let mut state = ChatInputState::new();
        let err = state.fail_file_read(&io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(err, InputError::FileUnreadable(_)));
        assert_eq!(state.error(), Some(&err));
        assert!(state.attachment().is_none());
    }

    #[test]
    fn test_remove_attachment() {
        let mut state = ChatInputState::new();
        attach(&mut state, &SelectedFile::new("a.png", "image/png", vec![1]));
        state.remove_attachment();
        assert!(state.attachment().is_none());

        // Removing again is a no-op
        state.remove_attachment();
        assert!(state.attachment().is_none());
    }

    #[test]
    fn test_whitespace_only_draft_is_empty() {
        let mut state = ChatInputState::new();
        state.set_draft("   \n\t");
        assert_eq!(state.begin_send(), Err(InputError::EmptySubmission));
        assert!(!state.is_uploading());
        assert_eq!(state.draft(), "   \n\t");
    }

    #[test]
    fn test_text_only_send() {
        let mut state = ChatInputState::new();
        state.set_draft("hello");

        let plan = state.begin_send().unwrap();
        assert!(!state.is_uploading());
        assert!(plan.attachment.is_none());

        let sent = state.complete_send(plan, Ok(None)).unwrap();
        assert_eq!(sent.text, "hello");
        assert!(sent.file.is_none());
        assert_eq!(state.draft(), "");
    }

    #[test]
    fn test_send_with_attachment_marks_uploading() {
        let mut state = ChatInputState::new();
        attach(&mut state, &SelectedFile::new("notes.txt", "text/plain", b"hello".to_vec()));

        let plan = state.begin_send().unwrap();
        assert!(state.is_uploading());
        assert_eq!(plan.attachment.as_ref().unwrap().name, "notes.txt");
        assert_eq!(plan.text, "");

        let sent = state.complete_send(plan, Ok(Some(upload_result()))).unwrap();
        assert_eq!(sent.file, Some(upload_result()));
        assert!(!state.is_uploading());
        assert!(state.attachment().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_second_send_while_uploading_is_rejected() {
        let mut state = ChatInputState::new();
        state.set_draft("hi");
        attach(&mut state, &SelectedFile::new("notes.txt", "text/plain", b"hello".to_vec()));

        let _plan = state.begin_send().unwrap();
        let before = state.clone();

        assert_eq!(state.begin_send(), Err(InputError::UploadInProgress));
        assert_eq!(state, before);
    }

    #[test]
    fn test_failed_upload_preserves_draft_and_attachment() {
        let mut state = ChatInputState::new();
        state.set_draft("see attached");
        attach(&mut state, &SelectedFile::new("notes.txt", "text/plain", b"hello".to_vec()));

        let plan = state.begin_send().unwrap();
        let err = state
            .complete_send(plan, Err(UploadError::InvalidResponse("no id".to_string())))
            .unwrap_err();

        assert!(matches!(err, InputError::UploadFailed { .. }));
        assert_eq!(state.error(), Some(&err));
        assert!(!state.is_uploading());
        assert_eq!(state.draft(), "see attached");
        assert_eq!(state.attachment().unwrap().name, "notes.txt");

        // Retry is possible
        assert!(state.begin_send().is_ok());
    }

    #[test]
    fn test_sent_text_is_captured_at_begin() {
        let mut state = ChatInputState::new();
        state.set_draft("first");
        attach(&mut state, &SelectedFile::new("a.png", "image/png", vec![1]));

        let plan = state.begin_send().unwrap();
        state.set_draft("typed during upload");

        let sent = state.complete_send(plan, Ok(Some(upload_result()))).unwrap();
        assert_eq!(sent.text, "first");
        assert_eq!(state.draft(), "");
    }
}
