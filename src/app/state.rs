//! App state - pure data structure with no I/O logic

use std::collections::HashMap;
use std::time::Instant;

use crate::catalog::{Catalog, ViewRow};
use crate::clipboard::SystemClipboard;
use crate::constants::TOAST_TTL;
use crate::messages::render::{EndpointDetail, FieldView, Toast, ToastLevel};
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::RenderState;
use crate::models::{EndpointId, Settings};
use crate::request::{RequestForm, ResponseStore, ViewStatus};

/// Main application state - pure data, no I/O
pub struct AppState {
    // Loaded document
    pub settings: Settings,
    pub origin: String,
    pub catalog: Catalog,

    // Per-endpoint state, keyed by stable id
    pub forms: HashMap<EndpointId, RequestForm>,
    pub responses: ResponseStore,
    /// Generation of the request each endpoint is currently waiting for
    pub pending: HashMap<EndpointId, u64>,
    pub next_generation: u64,

    // Catalog navigation
    pub selected_row: usize,
    pub active_endpoint: Option<EndpointId>,
    pub search_query: String,

    // Form editing
    pub selected_field: usize,
    pub cursor_position: usize,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub response_scroll: u16,

    // Popups
    pub toast: Option<Toast>,
    pub show_help: bool,

    pub clipboard: SystemClipboard,
}

impl AppState {
    /// Builds the state from loaded settings; the categories move into the catalog
    pub fn new(mut settings: Settings, origin: impl Into<String>) -> Self {
        let categories = std::mem::take(&mut settings.categories);
        let mut state = AppState {
            settings,
            origin: origin.into(),
            catalog: Catalog::new(categories),
            forms: HashMap::new(),
            responses: ResponseStore::default(),
            pending: HashMap::new(),
            next_generation: 1,
            selected_row: 0,
            active_endpoint: None,
            search_query: String::new(),
            selected_field: 0,
            cursor_position: 0,
            active_panel: Panel::Catalog,
            input_mode: InputMode::Normal,
            response_scroll: 0,
            toast: None,
            show_help: false,
            clipboard: SystemClipboard::default(),
        };
        state.follow_selection();
        state
    }

    /// Generate a unique request generation
    pub fn next_generation(&mut self) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        generation
    }

    pub fn rows(&self) -> Vec<ViewRow> {
        self.catalog.rows()
    }

    pub fn selected(&self) -> Option<ViewRow> {
        self.rows().into_iter().nth(self.selected_row)
    }

    /// Makes the endpoint under the cursor the active one and renders its form
    pub fn follow_selection(&mut self) {
        if let Some(id) = self.selected().and_then(|row| row.endpoint_id()) {
            if self.active_endpoint != Some(id) {
                self.active_endpoint = Some(id);
                self.selected_field = 0;
                self.cursor_position = 0;
                self.response_scroll = 0;
            }
            self.ensure_form(id);
        }
    }

    /// Creates and synchronizes the form of an endpoint on first render
    pub fn ensure_form(&mut self, id: EndpointId) {
        if self.forms.contains_key(&id) {
            return;
        }
        if let Some(endpoint) = self.catalog.endpoint(id) {
            let mut form = RequestForm::new(&self.origin, endpoint);
            form.synchronize();
            self.forms.insert(id, form);
        }
    }

    pub fn active_form(&self) -> Option<&RequestForm> {
        self.active_endpoint.and_then(|id| self.forms.get(&id))
    }

    pub fn active_form_mut(&mut self) -> Option<&mut RequestForm> {
        match self.active_endpoint {
            Some(id) => self.forms.get_mut(&id),
            None => None,
        }
    }

    /// Value of the form field being edited
    pub fn current_input(&self) -> &str {
        self.active_form()
            .and_then(|form| form.fields().get(self.selected_field))
            .map_or("", |field| field.value.as_str())
    }

    /// Replaces any toast with a new one
    pub fn notify(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn endpoint_detail(&self, id: EndpointId) -> Option<EndpointDetail> {
        let endpoint = self.catalog.endpoint(id)?;
        let form = self.forms.get(&id);

        let fields = form
            .map(|form| {
                form.fields()
                    .iter()
                    .map(|field| FieldView {
                        name: field.param.name.clone(),
                        param_type: field.param.param_type,
                        description: field.param.description.clone(),
                        required: field.param.required,
                        value: field.value.clone(),
                        missing: field.is_missing(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(EndpointDetail {
            method: endpoint.display_method(),
            route: endpoint.route().to_string(),
            name: endpoint.display_name().to_string(),
            desc: endpoint.display_desc().to_string(),
            status: endpoint.display_status().to_string(),
            status_kind: endpoint.status_kind(),
            fields,
            url: form.map(|f| f.url().to_string()).unwrap_or_default(),
            is_loading: self.responses.status(id) == ViewStatus::Loading,
            response: self.responses.get(id).map(|view| view.snapshot()),
        })
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let year = chrono::Datelike::year(&chrono::Local::now());
        let rows = self.rows();
        RenderState {
            title: self.settings.title().to_string(),
            subtitle: self.settings.subtitle().to_string(),
            links: self
                .settings
                .links()
                .iter()
                .map(|(label, target)| (label.to_string(), target.to_string()))
                .collect(),
            footer: self.settings.footer(year),
            no_results: !self.catalog.is_empty() && self.catalog.displayed().is_empty(),
            catalog_empty: self.catalog.is_empty(),
            endpoint_count: self.catalog.endpoint_count(),
            rows,
            selected_row: self.selected_row,
            search_query: self.search_query.clone(),
            detail: self.active_endpoint.and_then(|id| self.endpoint_detail(id)),
            selected_field: self.selected_field,
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            response_scroll: self.response_scroll,
            toast: self.toast.clone(),
            show_help: self.show_help,
        }
    }
}
