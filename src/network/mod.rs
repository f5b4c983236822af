//! Network layer - settings load and endpoint request execution
//!
//! The Network actor receives request commands and sends back terminal views.

pub mod actor;
pub mod client;
pub mod settings;

pub use actor::NetworkActor;
pub use settings::{load_settings, SettingsSource};
