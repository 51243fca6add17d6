//! Chatbox Library
//!
//! Chat message input with a single file attachment: client-side file checks,
//! multipart upload to a backend, and the Dioxus components around it.

pub mod app;
pub mod input;
pub mod storage;
pub mod types;
pub mod ui;
pub mod upload;

/// Shorten `s` to at most `max_chars` characters, ending in `…` when cut.
pub fn ellipsize(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}
