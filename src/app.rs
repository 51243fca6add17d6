//! Root Dioxus application component
//!
//! This module contains the main App component that serves as the root of the UI tree.

use crate::storage::settings::{load_settings, AppSettings};
use crate::ui::Layout;
use crate::upload::HttpUploader;
use dioxus::prelude::*;
use std::sync::Arc;

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub settings: Signal<AppSettings>,
    pub uploader: Arc<HttpUploader>,
}

impl AppState {
    pub fn new(settings: AppSettings) -> Self {
        let backend_url = settings.backend_url();
        tracing::info!("Using upload backend at {}", backend_url);
        Self {
            settings: Signal::new(settings),
            uploader: Arc::new(HttpUploader::new(backend_url)),
        }
    }
}

#[component]
pub fn App() -> Element {
    use_context_provider(|| AppState::new(load_settings()));

    rsx! {
        Layout {}
    }
}
