use dioxus::prelude::*;

use crate::ellipsize;
use crate::types::attachment::format_size;
use crate::types::message::ChatMessage;

#[component]
pub fn MessageBubble(message: ChatMessage) -> Element {
    let sent_at = message.sent_at.format("%H:%M").to_string();

    rsx! {
        div { class: "flex flex-row-reverse items-start gap-4 mb-6 group",
            div {
                class: "flex flex-col items-end",

                div {
                    class: "bg-[var(--accent-primary)] text-[var(--accent-text)] rounded-2xl rounded-tr-sm px-5 py-3.5 shadow-md max-w-[85%] leading-relaxed",

                    if message.has_text() {
                        div {
                            class: "whitespace-pre-wrap break-words",
                            "{message.text}"
                        }
                    }

                    if let Some(file) = &message.attachment {
                        a {
                            class: "mt-2 flex items-center gap-2 px-3 py-2 rounded-xl bg-[var(--bg-subtle)] text-[var(--text-primary)] text-sm hover:underline",
                            href: "{file.download_url}",
                            title: "{file.name}",
                            span { "📎" }
                            span { class: "truncate", {ellipsize(&file.name, 40)} }
                            span { class: "text-[var(--text-tertiary)]", {format_size(file.size_bytes)} }
                        }
                    }
                }

                div {
                    class: "text-[10px] text-[var(--text-tertiary)] mt-1 opacity-0 group-hover:opacity-100 transition-opacity",
                    "{sent_at}"
                }
            }
        }
    }
}
