//! Input controller
//!
//! Owns a [`ChatInputState`] together with an uploader and the send callback,
//! and runs the attach and send flows end to end.

use crate::input::state::ChatInputState;
use crate::input::InputError;
use crate::types::attachment::{FileHandle, UploadResult};
use crate::upload::FileUploader;

type SendCallback = Box<dyn FnMut(String, Option<UploadResult>) + Send>;

pub struct InputController<U> {
    state: ChatInputState,
    uploader: U,
    on_send: SendCallback,
}

impl<U: FileUploader> InputController<U> {
    /// `on_send` is called once per successful send with the text and the
    /// uploaded file, if any.
    pub fn new<F>(uploader: U, on_send: F) -> Self
    where
        F: FnMut(String, Option<UploadResult>) + Send + 'static,
    {
        Self {
            state: ChatInputState::new(),
            uploader,
            on_send: Box::new(on_send),
        }
    }

    pub fn state(&self) -> &ChatInputState {
        &self.state
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.state.set_draft(text);
    }

    /// Validate a picked file, read it and stage it as the attachment
    pub async fn select_file(&mut self, file: &dyn FileHandle) -> Result<(), InputError> {
        self.state.begin_file_selection(file)?;

        match file.read().await {
            Ok(bytes) => self.state.finish_file_selection(file, &bytes),
            Err(e) => Err(self.state.fail_file_read(&e)),
        }
    }

    pub fn remove_attachment(&mut self) {
        self.state.remove_attachment();
    }

    /// Upload the attachment if there is one, then deliver the message
    pub async fn send(&mut self) -> Result<(), InputError> {
        let plan = self.state.begin_send()?;

        let upload = match &plan.attachment {
            Some(attachment) => self.uploader.upload(attachment).await.map(Some),
            None => Ok(None),
        };

        let message = self.state.complete_send(plan, upload)?;
        tracing::info!(
            "Sending message ({} chars, attachment: {})",
            message.text.chars().count(),
            message.file.is_some()
        );
        (self.on_send)(message.text, message.file);

        Ok(())
    }
}
