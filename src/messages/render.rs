//! Render state - data structure sent from App layer to UI for rendering

use std::time::Instant;

use crate::catalog::ViewRow;
use crate::messages::ui_events::{InputMode, Panel};
use crate::models::{EndpointStatus, ParamType};
use crate::request::ResponseSnapshot;

/// Toast severity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

/// A transient notification, one at a time
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

impl Toast {
    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// One input of the endpoint form as shown on screen
#[derive(Clone, Debug, PartialEq)]
pub struct FieldView {
    pub name: String,
    pub param_type: ParamType,
    pub description: String,
    pub required: bool,
    pub value: String,
    pub missing: bool,
}

/// Detail pane of the active endpoint
#[derive(Clone, Debug, PartialEq)]
pub struct EndpointDetail {
    pub method: String,
    pub route: String,
    pub name: String,
    pub desc: String,
    pub status: String,
    pub status_kind: EndpointStatus,
    pub fields: Vec<FieldView>,
    pub url: String,
    pub is_loading: bool,
    pub response: Option<ResponseSnapshot>,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Header / footer
    pub title: String,
    pub subtitle: String,
    pub links: Vec<(String, String)>,
    pub footer: String,

    // Catalog
    pub rows: Vec<ViewRow>,
    pub selected_row: usize,
    pub catalog_empty: bool,
    pub no_results: bool,
    pub endpoint_count: usize,

    // Search
    pub search_query: String,

    // Active endpoint
    pub detail: Option<EndpointDetail>,
    pub selected_field: usize,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub response_scroll: u16,

    // Popups
    pub toast: Option<Toast>,
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        use crate::constants::{DEFAULT_API_DESCRIPTION, DEFAULT_API_NAME};
        RenderState {
            title: String::from(DEFAULT_API_NAME),
            subtitle: String::from(DEFAULT_API_DESCRIPTION),
            links: Vec::new(),
            footer: String::new(),
            rows: Vec::new(),
            selected_row: 0,
            catalog_empty: true,
            no_results: false,
            endpoint_count: 0,
            search_query: String::new(),
            detail: None,
            selected_field: 0,
            active_panel: Panel::Catalog,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            response_scroll: 0,
            toast: None,
            show_help: false,
        }
    }
}
