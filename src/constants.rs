//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use std::time::Duration;

/// Query value marking a parameter the user still has to supply
pub const API_KEY_SENTINEL: &str = "YOUR_API_KEY";

/// Default document origin that endpoint paths are resolved against
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Path of the settings document relative to the origin
pub const SETTINGS_PATH: &str = "/settings";

/// Default log file name
pub const DEFAULT_LOG_FILE: &str = "apidocs.log";

/// Application name
pub const APP_NAME: &str = "apidocs-tui";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed identifying user agent sent with every request
pub const USER_AGENT: &str = concat!("apidocs-tui/", env!("CARGO_PKG_VERSION"));

/// Accept header sent with every request
pub const ACCEPT_ANY: &str = "*/*";

/// Connect timeout for the one-shot settings fetch
pub const SETTINGS_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// How long a toast stays on screen
pub const TOAST_TTL: Duration = Duration::from_secs(3);

// Fallback settings used when the settings source is absent or malformed
pub const DEFAULT_API_NAME: &str = "API Docs";
pub const DEFAULT_API_CREATOR: &str = "Unknown";
pub const DEFAULT_API_DESCRIPTION: &str = "Interactive API documentation with real-time testing";
