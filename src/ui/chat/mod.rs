//! Chat interface components
//!
//! Contains the chat view, message display, and input components.

pub mod input;
pub mod message;

use dioxus::prelude::*;
use input::ChatInput;
use message::MessageBubble;

use crate::types::attachment::UploadResult;
use crate::types::message::ChatMessage;

/// Sent messages above the input. Kept in memory only.
#[component]
pub fn ChatView() -> Element {
    let mut messages = use_signal(Vec::<ChatMessage>::new);

    let handle_send = move |(text, file): (String, Option<UploadResult>)| {
        messages.write().push(ChatMessage::new(text, file));
    };

    rsx! {
        div { class: "flex flex-col h-full bg-[var(--bg-main)] relative",

            div { class: "flex-1 overflow-y-auto p-4 space-y-2 custom-scrollbar scroll-smooth",
                if messages.read().is_empty() {
                    div { class: "flex-1 flex flex-col items-center justify-center p-8 text-center text-[var(--text-tertiary)] animate-fade-in",
                        "No messages yet. Type something or attach a file."
                    }
                }

                for msg in messages.read().iter() {
                    MessageBubble { key: "{msg.id}", message: msg.clone() }
                }

                div { class: "h-4" }
            }

            ChatInput { on_send_message: handle_send }
        }
    }
}
