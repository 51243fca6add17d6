use dioxus::prelude::*;

use crate::app::AppState;
use crate::ellipsize;
use crate::input::ChatInputState;
use crate::types::attachment::{format_size, FileHandle, LocalFile, UploadResult};
use crate::upload::FileUploader;

/// Extensions offered by the file picker; the allow-list still decides.
const PICKER_ACCEPT: &str = ".jpg,.jpeg,.png,.gif,.pdf,.txt,.docx,.xlsx";

#[component]
pub fn ChatInput(on_send_message: EventHandler<(String, Option<UploadResult>)>) -> Element {
    let app_state = use_context::<AppState>();
    let mut state = use_signal(ChatInputState::new);

    let handle_file_change = move |evt: FormEvent| async move {
        state.write().clear_error();
        let Some(path) = evt.files().and_then(|engine| engine.files().into_iter().next()) else {
            return;
        };

        let file = match LocalFile::open(&path).await {
            Ok(file) => file,
            Err(e) => {
                state.write().fail_file_read(&e);
                return;
            }
        };

        if state.write().begin_file_selection(&file).is_err() {
            return;
        }

        match file.read().await {
            Ok(bytes) => {
                let _ = state.write().finish_file_selection(&file, &bytes);
            }
            Err(e) => {
                state.write().fail_file_read(&e);
            }
        }
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let uploader = app_state.uploader.clone();

        spawn(async move {
            let plan = state.write().begin_send();
            let Ok(plan) = plan else {
                return;
            };

            let upload = match &plan.attachment {
                Some(attachment) => uploader.upload(attachment).await.map(Some),
                None => Ok(None),
            };

            let sent = state.write().complete_send(plan, upload);
            if let Ok(message) = sent {
                on_send_message.call((message.text, message.file));
            }
        });
    };

    let (draft, error, attachment, uploading) = {
        let current = state.read();
        (
            current.draft().to_string(),
            current.error().map(|e| e.to_string()),
            current
                .attachment()
                .map(|a| (a.name.clone(), format_size(a.size_bytes))),
            current.is_uploading(),
        )
    };

    rsx! {
        div {
            class: "w-full p-4 bg-[var(--bg-main)]",

            div {
                class: "max-w-4xl mx-auto",

                if let Some(error) = error {
                    div {
                        class: "mb-2 px-3 py-2 rounded-lg text-sm bg-[var(--bg-error-subtle)] text-[var(--text-error)]",
                        "{error}"
                    }
                }

                if let Some((name, size)) = attachment {
                    div {
                        class: "mb-2 inline-flex items-center gap-2 px-3 py-1 rounded-lg text-sm bg-[var(--bg-subtle)] border border-[var(--border-subtle)]",
                        title: "{name}",
                        span { class: "truncate max-w-xs", {ellipsize(&name, 40)} }
                        span { class: "text-[var(--text-tertiary)]", "{size}" }
                        button {
                            r#type: "button",
                            class: "ml-1 text-[var(--text-tertiary)] hover:text-[var(--text-error)]",
                            title: "Remove attachment",
                            disabled: uploading,
                            onclick: move |_| state.write().remove_attachment(),
                            "×"
                        }
                    }
                }

                if uploading {
                    div {
                        class: "mb-2 flex items-center gap-2 text-sm text-[var(--text-tertiary)]",
                        div {
                            class: "w-3 h-3 rounded-full border-2 border-[var(--bg-active)] border-t-[var(--accent-primary)] animate-spin",
                        }
                        "Uploading file..."
                    }
                }

                form {
                    class: "relative flex items-center gap-3 p-2 bg-[var(--bg-surface)] border border-[var(--border-subtle)] rounded-2xl shadow-lg focus-within:border-[var(--border-focus)] transition-all duration-200",
                    onsubmit: handle_submit,

                    // Paperclip file picker
                    label {
                        class: "flex-shrink-0 p-2 cursor-pointer text-[var(--text-secondary)] hover:text-[var(--text-primary)]",
                        title: "Attach a file",
                        "📎"
                        input {
                            r#type: "file",
                            class: "hidden",
                            accept: PICKER_ACCEPT,
                            tabindex: "-1",
                            onchange: handle_file_change,
                        }
                    }

                    input {
                        class: "flex-1 py-3 px-1 bg-transparent border-none outline-none text-[var(--text-primary)] placeholder-[var(--text-tertiary)] text-base",
                        placeholder: "Write your message here",
                        value: "{draft}",
                        oninput: move |evt| state.write().set_draft(evt.value()),
                    }

                    button {
                        r#type: "submit",
                        disabled: uploading,
                        class: "flex-shrink-0 p-2.5 rounded-xl bg-[var(--accent-primary)] text-[var(--accent-text)] hover:bg-[var(--accent-hover)] disabled:opacity-30 disabled:cursor-not-allowed transition-all shadow-md active:scale-95",
                        title: "Send message",
                        svg { width: "18", height: "18", view_box: "0 0 24 24", fill: "none", stroke: "currentColor", stroke_width: "2.5", stroke_linecap: "round", stroke_linejoin: "round", line { x1: "22", y1: "2", x2: "11", y2: "13" }, polygon { points: "22 2 15 22 11 13 2 9 22 2" } }
                    }
                }
            }
        }
    }
}
