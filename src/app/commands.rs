//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::catalog::ViewRow;
use crate::error::ExplorerError;
use crate::messages::render::ToastLevel;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::request::{ResponseView, ViewStatus};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    pub fn move_up(&mut self) {
        match self.active_panel {
            Panel::Catalog => {
                self.selected_row = self.selected_row.saturating_sub(1);
                self.follow_selection();
            }
            Panel::Form => self.prev_field(),
            Panel::Response => self.scroll_up(),
        }
    }

    pub fn move_down(&mut self) {
        match self.active_panel {
            Panel::Catalog => {
                let len = self.rows().len();
                if self.selected_row + 1 < len {
                    self.selected_row += 1;
                }
                self.follow_selection();
            }
            Panel::Form => self.next_field(),
            Panel::Response => self.scroll_down(),
        }
    }

    pub fn scroll_up(&mut self) {
        self.response_scroll = self.response_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.response_scroll = self.response_scroll.saturating_add(1);
    }

    // ========================
    // Catalog tree
    // ========================

    pub fn toggle_selected(&mut self) {
        match self.selected() {
            Some(ViewRow::Category { id, .. }) => {
                self.catalog.expansion_mut().toggle_category(id);
                self.clamp_selection();
            }
            Some(ViewRow::Endpoint { id, .. }) => {
                self.catalog.expansion_mut().toggle_endpoint(id);
                self.follow_selection();
            }
            None => {}
        }
    }

    pub fn expand_all(&mut self) {
        self.catalog.expand_all();
        self.clamp_selection();
    }

    pub fn collapse_all(&mut self) {
        self.catalog.collapse_all();
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if self.selected_row >= len {
            self.selected_row = len.saturating_sub(1);
        }
        self.follow_selection();
    }

    // ========================
    // Search
    // ========================

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Searching;
        self.active_panel = Panel::Catalog;
    }

    pub fn search_char(&mut self, c: char) -> Vec<NetworkCommand> {
        self.search_query.push(c);
        self.apply_search()
    }

    pub fn search_backspace(&mut self) -> Vec<NetworkCommand> {
        self.search_query.pop();
        self.apply_search()
    }

    pub fn end_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn clear_search(&mut self) -> Vec<NetworkCommand> {
        self.input_mode = InputMode::Normal;
        if self.search_query.is_empty() {
            return Vec::new();
        }
        self.search_query.clear();
        self.apply_search()
    }

    /// Re-renders the displayed catalog from the current query.
    ///
    /// A re-render starts every node from default expansion and drops all
    /// forms and responses; in-flight requests are cancelled.
    fn apply_search(&mut self) -> Vec<NetworkCommand> {
        let cancels = self
            .pending
            .drain()
            .map(|(id, _)| NetworkCommand::Cancel { id })
            .collect();

        self.catalog.search(&self.search_query);
        self.forms.clear();
        self.responses.clear_all();
        self.active_endpoint = None;
        self.selected_row = 0;
        self.selected_field = 0;
        self.cursor_position = 0;
        self.response_scroll = 0;
        self.follow_selection();
        cancels
    }

    // ========================
    // Form editing
    // ========================

    pub fn start_editing(&mut self) {
        let has_fields = self
            .active_form()
            .map_or(false, |form| !form.fields().is_empty());
        if has_fields {
            self.active_panel = Panel::Form;
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.current_input().len();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn next_field(&mut self) {
        let len = self.active_form().map_or(0, |form| form.fields().len());
        if len > 0 {
            self.selected_field = (self.selected_field + 1) % len;
            self.cursor_position = self.current_input().len();
        }
    }

    pub fn prev_field(&mut self) {
        let len = self.active_form().map_or(0, |form| form.fields().len());
        if len > 0 {
            self.selected_field = self.selected_field.checked_sub(1).unwrap_or(len - 1);
            self.cursor_position = self.current_input().len();
        }
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    /// Inserts a character into the edited field and resynchronizes the URL
    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        let index = self.selected_field;
        let Some(form) = self.active_endpoint.and_then(|id| self.forms.get_mut(&id)) else {
            return;
        };
        if let Some(field) = form.field_mut(index) {
            if cursor_pos <= field.value.len() {
                field.value.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
        form.synchronize();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.cursor_position;
        let index = self.selected_field;
        let Some(form) = self.active_endpoint.and_then(|id| self.forms.get_mut(&id)) else {
            return;
        };
        if let Some(field) = form.field_mut(index).filter(|f| cursor_pos <= f.value.len()) {
            let prev_pos = field.value[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            field.value.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
        form.synchronize();
    }

    // ========================
    // Request actions
    // ========================

    /// Validates the active form and prepares its request.
    ///
    /// Missing required parameters block the request and raise an error toast.
    pub fn execute(&mut self) -> Option<NetworkCommand> {
        let id = self.active_endpoint?;
        let method = self.catalog.endpoint(id)?.display_method();
        let sync = self.forms.get_mut(&id)?.synchronize();

        if sync.has_errors {
            let err = ExplorerError::Validation {
                missing: sync.missing,
            };
            tracing::info!(?id, error = %err, "Blocked request");
            self.notify(ToastLevel::Error, err.to_string());
            return None;
        }

        if self.input_mode == InputMode::Editing {
            self.stop_editing();
        }

        let generation = self.next_generation();
        self.pending.insert(id, generation);
        self.responses.install(id, ResponseView::loading());
        self.response_scroll = 0;

        Some(NetworkCommand::Execute {
            id,
            generation,
            method,
            url: sync.url,
        })
    }

    /// Cancel the request of the active endpoint
    pub fn cancel_request(&mut self) -> Option<NetworkCommand> {
        let id = self.active_endpoint?;
        self.pending.remove(&id)?;
        self.responses.clear(id);
        self.notify(ToastLevel::Info, "Request cancelled");
        Some(NetworkCommand::Cancel { id })
    }

    /// Hides the response of the active endpoint and resynchronizes its URL
    pub fn clear_response(&mut self) -> Option<NetworkCommand> {
        let id = self.active_endpoint?;
        self.responses.clear(id);
        if let Some(form) = self.forms.get_mut(&id) {
            form.synchronize();
        }
        self.response_scroll = 0;
        self.notify(ToastLevel::Info, "Form cleared");
        self.pending
            .remove(&id)
            .map(|_| NetworkCommand::Cancel { id })
    }

    pub fn copy_url(&mut self) {
        let Some(url) = self.active_form().map(|form| form.url().to_string()) else {
            return;
        };
        match self.clipboard.copy_text(&url) {
            Ok(()) => self.notify(ToastLevel::Success, "URL copied!"),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to copy URL");
                self.notify(ToastLevel::Error, "Failed to copy URL");
            }
        }
    }

    pub fn copy_response(&mut self) {
        let text = self
            .active_endpoint
            .and_then(|id| self.responses.get(id))
            .map(|view| view.body_text());
        let Some(text) = text else {
            return;
        };
        match self.clipboard.copy_text(&text) {
            Ok(()) => self.notify(ToastLevel::Success, "Response copied!"),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to copy response");
                self.notify(ToastLevel::Error, "Failed to copy response");
            }
        }
    }

    // ========================
    // Response handling
    // ========================

    /// Installs a finished response if it belongs to the request the endpoint
    /// is waiting for; superseded or cancelled results are dropped.
    pub fn handle_response(&mut self, response: NetworkResponse) {
        let id = response.id();
        let generation = response.generation();

        if self.pending.get(&id) != Some(&generation) {
            tracing::debug!(?id, generation, "Discarding superseded response");
            return;
        }
        self.pending.remove(&id);

        let NetworkResponse::Completed { view, .. } = response;
        match view.status {
            ViewStatus::Success => self.notify(ToastLevel::Success, "Request successful!"),
            _ => {
                let message = format!("Request failed: {}", view.body_text());
                self.notify(ToastLevel::Error, message);
            }
        }
        self.responses.install(id, view);
        self.response_scroll = 0;
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
