//! apidocs - Actor-based terminal API documentation explorer
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use apidocs_tui::app::{AppActor, AppState};
use apidocs_tui::catalog::ViewRow;
use apidocs_tui::config::Config;
use apidocs_tui::constants::{APP_NAME, APP_VERSION};
use apidocs_tui::messages::render::EndpointDetail;
use apidocs_tui::messages::ui_events::{key_to_ui_event, InputMode, Panel};
use apidocs_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use apidocs_tui::network::{load_settings, NetworkActor};
use apidocs_tui::request::{ContentKind, ViewStatus};
use apidocs_tui::ui::{
    centered_rect, endpoint_status_color, highlight_json, method_color, panel_block, status_color,
    toast_style, view_status_color,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize logging to file
    let (log_dir, log_name) = config.log_location();
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(app = APP_NAME, version = APP_VERSION, origin = %config.origin(), "Starting");

    // Settings are loaded once, before the terminal is taken over
    let settings = load_settings(&config.settings_source()).await;
    let state = AppState::new(settings, config.origin());

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(net_resp_tx)?;
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(state, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Footer
            Constraint::Length(1), // Status bar / toast
        ])
        .split(area);

    draw_header(f, state, main_chunks[0]);
    draw_search_bar(f, state, main_chunks[1]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[2]);

    draw_catalog(f, state, content[0]);
    draw_detail(f, state, content[1]);

    let footer = Paragraph::new(state.footer.as_str())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);

    draw_status_bar(f, state, main_chunks[4]);

    // Popups
    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut links = Vec::new();
    for (label, target) in &state.links {
        if !links.is_empty() {
            links.push(Span::raw("  "));
        }
        links.push(Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)));
        links.push(Span::styled(target.clone(), Style::default().fg(Color::Blue)));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled(state.title.clone(), Style::default().fg(Color::Cyan).bold()),
            Span::raw("  "),
            Span::styled(state.subtitle.clone(), Style::default().fg(Color::Gray)),
        ]),
        Line::from(links),
    ];

    let header = Paragraph::new(lines).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn draw_search_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_searching = state.input_mode == InputMode::Searching;
    let title = format!(" Search ({} endpoints) ", state.endpoint_count);
    let block = panel_block(title, is_searching, is_searching);

    let content = if state.search_query.is_empty() && !is_searching {
        Span::styled("Press / to search", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(state.search_query.clone())
    };
    f.render_widget(Paragraph::new(Line::from(content)).block(block), area);

    if is_searching {
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + state.search_query.chars().count() as u16 + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_catalog(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Catalog;
    let block = panel_block(" Endpoints ", is_focused, false);

    if state.catalog_empty || state.no_results {
        let message = if state.catalog_empty {
            "No API data available"
        } else {
            "No results"
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = state
        .rows
        .iter()
        .map(|row| match row {
            ViewRow::Category { name, count, expanded, .. } => {
                let marker = if *expanded { "▾" } else { "▸" };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} {}", marker, name), Style::default().bold()),
                    Span::styled(format!(" ({})", count), Style::default().fg(Color::DarkGray)),
                ]))
            }
            ViewRow::Endpoint {
                method,
                route,
                name,
                status,
                status_kind,
                expanded,
                ..
            } => {
                let marker = if *expanded { "-" } else { "+" };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("  {} ", marker)),
                    Span::styled(
                        format!("{:6}", method),
                        Style::default().fg(method_color(method)).bold(),
                    ),
                    Span::raw(format!(" {} ", route)),
                    Span::styled(name.clone(), Style::default().fg(Color::Gray)),
                    Span::styled(
                        format!(" [{}]", status),
                        Style::default().fg(endpoint_status_color(*status_kind)),
                    ),
                ]))
            }
        })
        .collect();

    let highlight_style = if is_focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };

    let list = List::new(items).block(block).highlight_style(highlight_style);

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_row));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_detail(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(detail) = &state.detail else {
        let paragraph = Paragraph::new("Select an endpoint to try it out")
            .style(Style::default().fg(Color::DarkGray))
            .block(panel_block(" Details ", false, false));
        f.render_widget(paragraph, area);
        return;
    };

    let form_height = (detail.fields.len() as u16).max(1) + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),           // Summary
            Constraint::Length(form_height), // Parameters
            Constraint::Length(3),           // Live URL
            Constraint::Min(3),              // Response
        ])
        .split(area);

    draw_summary(f, detail, chunks[0]);
    draw_form(f, state, detail, chunks[1]);

    let url = Paragraph::new(detail.url.as_str())
        .style(Style::default().fg(Color::Cyan))
        .block(panel_block(" Request URL (u:copy) ", false, false));
    f.render_widget(url, chunks[2]);

    draw_response(f, state, detail, chunks[3]);
}

fn draw_summary(f: &mut Frame, detail: &EndpointDetail, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", detail.method),
                Style::default().fg(method_color(&detail.method)).bold(),
            ),
            Span::raw(detail.route.clone()),
            Span::styled(
                format!("  [{}]", detail.status),
                Style::default().fg(endpoint_status_color(detail.status_kind)),
            ),
        ]),
        Line::from(Span::styled(detail.name.clone(), Style::default().bold())),
        Line::from(Span::styled(detail.desc.clone(), Style::default().fg(Color::Gray))),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn draw_form(f: &mut Frame, state: &RenderState, detail: &EndpointDetail, area: Rect) {
    let is_focused = state.active_panel == Panel::Form;
    let is_editing = is_focused && state.input_mode == InputMode::Editing;
    let block = panel_block(" Parameters (e:edit Tab:next s:execute) ", is_focused, is_editing);

    if detail.fields.is_empty() {
        let paragraph = Paragraph::new("This endpoint takes no parameters")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let lines: Vec<Line> = detail
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = is_focused && i == state.selected_field;
            let name_style = if field.missing {
                Style::default().fg(Color::Red).bold()
            } else if selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().bold()
            };
            let required = if field.required { "*" } else { " " };
            let value = if field.value.is_empty() {
                Span::styled(field.description.clone(), Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(field.value.clone())
            };
            Line::from(vec![
                Span::styled(format!("{}{} ", field.name, required), name_style),
                Span::styled(
                    format!("({}) ", field.param_type.as_str()),
                    Style::default().fg(Color::DarkGray),
                ),
                value,
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);

    if is_editing {
        if let Some(field) = detail.fields.get(state.selected_field) {
            let prefix = field.name.chars().count() + field.param_type.as_str().len() + 5;
            let typed = field.value[..state.cursor_position.min(field.value.len())]
                .chars()
                .count();
            let max_x = area.x + area.width.saturating_sub(2);
            let cursor_x = (area.x + 1 + (prefix + typed) as u16).min(max_x);
            let cursor_y = area.y + 1 + state.selected_field as u16;
            f.set_cursor_position(Position::new(cursor_x, cursor_y));
        }
    }
}

fn draw_response(f: &mut Frame, state: &RenderState, detail: &EndpointDetail, area: Rect) {
    let is_focused = state.active_panel == Panel::Response;

    let Some(response) = &detail.response else {
        let paragraph = Paragraph::new("Press s to execute the request")
            .style(Style::default().fg(Color::DarkGray))
            .block(panel_block(" Response ", is_focused, false));
        f.render_widget(paragraph, area);
        return;
    };

    let status_text = match response.http_status {
        Some(code) if response.status == ViewStatus::Error => Span::styled(
            format!(" {} {} ", code, response.status_line),
            Style::default().fg(status_color(code)).bold(),
        ),
        Some(code) => Span::styled(
            format!(" {} ", response.status_line),
            Style::default().fg(status_color(code)).bold(),
        ),
        None => Span::styled(
            format!(" {} ", response.status_line),
            Style::default().fg(view_status_color(response.status)).bold(),
        ),
    };

    let kind_text = response
        .kind
        .map(|kind| format!(" {} ", kind.as_str()))
        .unwrap_or_default();
    let time_text = if response.status != ViewStatus::Loading {
        format!(" {}ms ", response.elapsed_ms)
    } else {
        String::new()
    };

    let block = panel_block(Line::from(status_text), is_focused, false)
        .title_bottom(Line::from(format!("{}{}", kind_text, time_text)).right_aligned());

    // Use syntax highlighting for JSON
    let lines = match (response.status, response.kind) {
        (ViewStatus::Loading, _) => vec![Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        ))],
        (ViewStatus::Error, _) => vec![Line::from(Span::styled(
            response.body.clone(),
            Style::default().fg(Color::Red),
        ))],
        (_, Some(ContentKind::Json)) => highlight_json(&response.body),
        (_, Some(kind)) if kind.is_media() => response
            .body
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Cyan))))
            .chain(std::iter::once(Line::from(Span::styled(
                "Open the saved file with an external viewer",
                Style::default().fg(Color::DarkGray),
            ))))
            .collect(),
        _ => response.body.lines().map(|l| Line::from(l.to_string())).collect(),
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.response_scroll, 0));
    f.render_widget(paragraph, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    if let Some(toast) = state.toast.as_ref().filter(|t| t.is_visible(Instant::now())) {
        let bar = Paragraph::new(format!(" {} ", toast.message)).style(toast_style(toast.level));
        f.render_widget(bar, area);
        return;
    }

    let loading = state.detail.as_ref().is_some_and(|d| d.is_loading);
    let status = if loading {
        " Loading... (Ctrl+X cancel) "
    } else {
        match state.input_mode {
            InputMode::Editing => " ESC:stop editing | arrows:move | Tab:next field ",
            InputMode::Searching => " Enter:done | ESC:clear search ",
            InputMode::Normal => {
                " Tab:panel | /:search | Enter:toggle | e:edit | s:execute | d:clear | ?:help | q:quit "
            }
        }
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 API DOCS - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓  (k / j)     Move selection / scroll response
   Enter / Space      Expand or collapse the selected node
   E / C              Expand all / collapse all

 SEARCH
   /                  Start searching
   Enter              Keep results
   Esc                Clear search

 REQUEST
   e                  Edit parameters (Parameters panel)
   Tab                Next parameter while editing
   s                  Execute request
   Ctrl+X             Cancel running request
   d                  Clear response
   u                  Copy request URL
   y                  Copy response

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
