//! UI components for Chatbox
//!
//! This module contains all user interface components built with Dioxus.

pub mod chat;

use crate::app::AppState;
use crate::storage::settings::save_settings;
use crate::ui::chat::ChatView;
use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq)]
enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn from_setting(value: &str) -> Self {
        if value == "light" {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Main Application Layout
#[component]
pub fn Layout() -> Element {
    let app_state = use_context::<AppState>();
    let mut settings = app_state.settings;
    let theme = Theme::from_setting(&settings.read().theme);

    let toggle_theme = move |_| {
        let next = theme.toggle();
        settings.write().theme = next.as_str().to_string();
        if let Err(e) = save_settings(&settings.read()) {
            tracing::warn!("Failed to save theme: {}", e);
        }
    };

    rsx! {
        div {
            "data-theme": "{theme.as_str()}",
            class: "flex h-screen w-screen bg-[var(--bg-main)] text-[var(--text-primary)] transition-colors duration-300 overflow-hidden font-sans",

            link { rel: "stylesheet", href: "assets/styles.css" }

            main {
                class: "flex-1 flex flex-col h-full relative min-w-0 bg-[var(--bg-main)]",

                div {
                    class: "absolute top-4 right-4 z-50",
                    button {
                        onclick: toggle_theme,
                        class: "p-2 rounded-full hover:bg-[var(--bg-hover)] text-[var(--text-tertiary)] hover:text-[var(--text-primary)] transition-all active:scale-95",
                        title: "Toggle Theme",

                        if theme == Theme::Dark {
                            // Sun icon
                            svg { width: "20", height: "20", view_box: "0 0 24 24", fill: "none", stroke: "currentColor", stroke_width: "2", stroke_linecap: "round", stroke_linejoin: "round", circle { cx: "12", cy: "12", r: "5" }, path { d: "M12 1v2M12 21v2M4.22 4.22l1.42 1.42M18.36 18.36l1.42 1.42M1 12h2M21 12h2M4.22 19.78l1.42-1.42M18.36 5.64l1.42-1.42" } }
                        } else {
                            // Moon icon
                            svg { width: "20", height: "20", view_box: "0 0 24 24", fill: "none", stroke: "currentColor", stroke_width: "2", stroke_linecap: "round", stroke_linejoin: "round", path { d: "M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z" } }
                        }
                    }
                }

                ChatView {}
            }
        }
    }
}
