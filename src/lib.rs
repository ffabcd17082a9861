//! Browser client for chatting with an uploaded PDF.
//!
//! The UI uploads one document to a retrieval backend, previews it, and
//! highlights the pages the backend cites in its answers.

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod logging;
pub mod preview;
pub mod sources;
pub mod state;
pub mod timer;
pub mod types;
pub mod ui;
pub mod upload;
pub mod views;
pub mod visibility;
