//! Chatbox - chat input with file attachments
//!
//! A desktop window hosting the chat input and the messages sent from it.

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chatbox::app::App;

fn main() {
    // RUST_LOG wins over the default filter
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chatbox=info")))
        .init();

    info!("Starting Chatbox v{}", env!("CARGO_PKG_VERSION"));

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::default().with_window(
                WindowBuilder::new()
                    .with_title("Chatbox")
                    .with_inner_size(LogicalSize::new(900.0, 700.0)),
            ),
        )
        .launch(App);
}
