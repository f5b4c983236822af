//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send_all(&self, commands: Vec<NetworkCommand>) {
        for cmd in commands {
            let _ = self.network_tx.send(cmd);
        }
    }

    fn send(&self, cmd: Option<NetworkCommand>) {
        if let Some(cmd) = cmd {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Panel navigation
            UiEvent::NextPanel => self.state.next_panel(),
            UiEvent::PrevPanel => self.state.prev_panel(),
            UiEvent::MoveUp => self.state.move_up(),
            UiEvent::MoveDown => self.state.move_down(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Catalog tree
            UiEvent::ToggleSelected => self.state.toggle_selected(),
            UiEvent::ExpandAll => self.state.expand_all(),
            UiEvent::CollapseAll => self.state.collapse_all(),

            // Search
            UiEvent::StartSearch => self.state.start_search(),
            UiEvent::SearchChar(c) => {
                let cancels = self.state.search_char(c);
                self.send_all(cancels);
            }
            UiEvent::SearchBackspace => {
                let cancels = self.state.search_backspace();
                self.send_all(cancels);
            }
            UiEvent::EndSearch => self.state.end_search(),
            UiEvent::ClearSearch => {
                let cancels = self.state.clear_search();
                self.send_all(cancels);
            }

            // Form editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::NextField => self.state.next_field(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Request actions
            UiEvent::Execute => {
                let cmd = self.state.execute();
                self.send(cmd);
            }
            UiEvent::CancelRequest => {
                let cmd = self.state.cancel_request();
                self.send(cmd);
            }
            UiEvent::ClearResponse => {
                let cmd = self.state.clear_response();
                self.send(cmd);
            }
            UiEvent::CopyUrl => self.state.copy_url(),
            UiEvent::CopyResponse => self.state.copy_response(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
