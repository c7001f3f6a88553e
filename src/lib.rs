pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod input;
pub mod list;
pub mod logging;
pub mod message;
pub mod oneshot;
pub mod tui;
pub mod ui;
pub mod widget;

// Re-export main types for convenience
pub use client::{Answer, AskClient, Transport};
pub use config::Config;
pub use error::AskError;
pub use list::{Item, MessageList, PendingId};
pub use message::{Message, Origin, FALLBACK_ANSWER};
pub use oneshot::{ask_once, OneShot};
pub use widget::{ChatWidget, Focus, Reply};
