//! # apidocs-tui
//!
//! A terminal explorer for self-describing HTTP APIs.
//!
//! ## Features
//! - Catalog of endpoints loaded from a settings document
//! - Case-insensitive search across categories and endpoints
//! - Parameter forms inferred from endpoint path templates
//! - Live request URL kept in sync with the form
//! - Response classification (JSON, text, image, audio, video)
//! - JSON syntax highlighting
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod request;
pub mod ui;

// Re-export commonly used types
pub use models::{Category, Endpoint, EndpointId, Parameter, Settings};
pub use catalog::{extract_parameters, filter_catalog, Catalog};
pub use request::{RequestForm, ResponseView};
pub use error::{ExplorerError, ExplorerResult};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::NetworkActor;
