use ratatui::{prelude::*, widgets::*};

use crate::messages::render::ToastLevel;
use crate::models::EndpointStatus;
use crate::request::ViewStatus;

/// Bordered panel whose border reflects focus and edit state
pub fn panel_block<'a>(title: impl Into<Line<'a>>, is_focused: bool, is_editing: bool) -> Block<'a> {
    let border_style = if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

/// Simple JSON syntax highlighting for pretty-printed documents
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_json_line).collect()
}

fn highlight_json_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut chars = line.char_indices().peekable();

    let flush = |plain: &mut String, spans: &mut Vec<Span<'static>>| {
        if plain.is_empty() {
            return;
        }
        let token = std::mem::take(plain);
        let trimmed = token.trim();
        let style = if matches!(trimmed, "true" | "false" | "null") {
            Style::default().fg(Color::Magenta)
        } else if !trimmed.is_empty() && trimmed.parse::<f64>().is_ok() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        spans.push(Span::styled(token, style));
    };

    while let Some((start, c)) = chars.next() {
        match c {
            '"' => {
                flush(&mut plain, &mut spans);
                let mut end = line.len();
                let mut escaped = false;
                for (i, ch) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if ch == '\\' {
                        escaped = true;
                    } else if ch == '"' {
                        end = i + 1;
                        break;
                    }
                }
                // A string followed by ':' is an object key
                let is_key = line[end..].trim_start().starts_with(':');
                let color = if is_key { Color::Cyan } else { Color::Green };
                spans.push(Span::styled(
                    line[start..end].to_string(),
                    Style::default().fg(color),
                ));
            }
            '{' | '}' | '[' | ']' => {
                flush(&mut plain, &mut spans);
                spans.push(Span::styled(c.to_string(), Style::default().fg(Color::Yellow)));
            }
            ':' | ',' => {
                flush(&mut plain, &mut spans);
                spans.push(Span::styled(c.to_string(), Style::default().fg(Color::White)));
            }
            _ => plain.push(c),
        }
    }
    flush(&mut plain, &mut spans);

    Line::from(spans)
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Yellow,
        "PUT" => Color::Blue,
        "PATCH" => Color::Cyan,
        "DELETE" => Color::Red,
        _ => Color::White,
    }
}

/// Endpoint readiness badge color
pub fn endpoint_status_color(status: EndpointStatus) -> Color {
    match status {
        EndpointStatus::Ready => Color::Green,
        EndpointStatus::Update => Color::Yellow,
        EndpointStatus::Error => Color::Red,
    }
}

/// Response panel accent
pub fn view_status_color(status: ViewStatus) -> Color {
    match status {
        ViewStatus::Idle => Color::DarkGray,
        ViewStatus::Loading => Color::Yellow,
        ViewStatus::Success => Color::Green,
        ViewStatus::Error => Color::Red,
    }
}

pub fn toast_style(level: ToastLevel) -> Style {
    let bg = match level {
        ToastLevel::Success => Color::Green,
        ToastLevel::Error => Color::Red,
        ToastLevel::Info => Color::Blue,
    };
    Style::default().fg(Color::Black).bg(bg).bold()
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(line: &Line<'_>) -> Vec<(String, Option<Color>)> {
        line.spans
            .iter()
            .map(|span| (span.content.to_string(), span.style.fg))
            .collect()
    }

    #[test]
    fn test_keys_and_values_get_distinct_colors() {
        let lines = highlight_json("  \"name\": \"a:b\",");
        let spans = styled(&lines[0]);
        assert!(spans.contains(&("\"name\"".to_string(), Some(Color::Cyan))));
        assert!(spans.contains(&("\"a:b\"".to_string(), Some(Color::Green))));
    }

    #[test]
    fn test_literals_and_numbers() {
        let lines = highlight_json("  \"ok\": true, \"n\": -1.5");
        let spans = styled(&lines[0]);
        assert!(spans.contains(&(" true".to_string(), Some(Color::Magenta))));
        assert!(spans.contains(&(" -1.5".to_string(), Some(Color::Yellow))));
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        let lines = highlight_json(r#""say \"hi\"""#);
        let spans = styled(&lines[0]);
        assert_eq!(spans, vec![(r#""say \"hi\"""#.to_string(), Some(Color::Green))]);
    }
}
