//! Response classification and per-endpoint response views

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{ExplorerError, ExplorerResult};
use crate::models::EndpointId;
use crate::request::media::MediaHandle;

/// How a response body is rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Text,
    Image,
    Audio,
    Video,
}

impl ContentKind {
    /// Classifies a `content-type` header value.
    ///
    /// Checked in order image, audio, video, json, text; the first match
    /// wins and anything else, including a missing header, is text.
    pub fn classify(content_type: Option<&str>) -> Self {
        let lower = content_type.unwrap_or_default().to_lowercase();
        if lower.contains("image/") {
            ContentKind::Image
        } else if lower.contains("audio/") {
            ContentKind::Audio
        } else if lower.contains("video/") {
            ContentKind::Video
        } else if lower.contains("application/json") {
            ContentKind::Json
        } else {
            ContentKind::Text
        }
    }

    pub fn is_media(&self) -> bool {
        matches!(self, ContentKind::Image | ContentKind::Audio | ContentKind::Video)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContentKind::Json => "json",
            ContentKind::Text => "text",
            ContentKind::Image => "image",
            ContentKind::Audio => "audio",
            ContentKind::Video => "video",
        }
    }
}

/// Lifecycle of an endpoint's response panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Renderable body of a response
#[derive(Debug)]
pub enum ResponseBody {
    Empty,
    Json(String),
    Text(String),
    Media(MediaHandle),
    Error(String),
}

/// What the response panel of one endpoint shows
#[derive(Debug)]
pub struct ResponseView {
    pub status: ViewStatus,
    pub http_status: Option<u16>,
    pub status_line: String,
    pub elapsed_ms: u64,
    pub kind: Option<ContentKind>,
    pub body: ResponseBody,
}

impl ResponseView {
    pub fn loading() -> Self {
        ResponseView {
            status: ViewStatus::Loading,
            http_status: None,
            status_line: String::from("Loading..."),
            elapsed_ms: 0,
            kind: None,
            body: ResponseBody::Empty,
        }
    }

    pub fn failed(error: &ExplorerError, elapsed_ms: u64) -> Self {
        ResponseView {
            status: ViewStatus::Error,
            http_status: error.http_status(),
            status_line: String::from("Error"),
            elapsed_ms,
            kind: None,
            body: ResponseBody::Error(sanitize_text(&error.to_string())),
        }
    }

    /// Text suitable for the clipboard or a scrolling panel
    pub fn body_text(&self) -> String {
        match &self.body {
            ResponseBody::Empty => String::new(),
            ResponseBody::Json(text) | ResponseBody::Text(text) | ResponseBody::Error(text) => {
                text.clone()
            }
            ResponseBody::Media(media) => format!(
                "{} response ({} bytes)\nSaved to {}",
                media.mime(),
                media.size(),
                media.path().display()
            ),
        }
    }

    /// Cheap clone-able copy for the render layer
    pub fn snapshot(&self) -> ResponseSnapshot {
        ResponseSnapshot {
            status: self.status,
            http_status: self.http_status,
            status_line: self.status_line.clone(),
            elapsed_ms: self.elapsed_ms,
            kind: self.kind,
            body: self.body_text(),
        }
    }
}

/// Render-side copy of a `ResponseView`
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseSnapshot {
    pub status: ViewStatus,
    pub http_status: Option<u16>,
    pub status_line: String,
    pub elapsed_ms: u64,
    pub kind: Option<ContentKind>,
    pub body: String,
}

/// Replaces control characters so a body cannot drive the terminal.
///
/// Newlines and tabs survive, carriage returns are dropped and every other
/// control character becomes U+FFFD.
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\r')
        .map(|c| {
            if c.is_control() && c != '\n' && c != '\t' {
                '\u{FFFD}'
            } else {
                c
            }
        })
        .collect()
}

/// JSON truthiness of an `error` field: null, false, 0 and "" do not count
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Turns a successful (2xx) response into a view.
///
/// JSON objects carrying a truthy `error` field become an application error
/// even though the transport succeeded.
pub fn classify_response(
    status: u16,
    reason: &str,
    content_type: Option<&str>,
    bytes: &[u8],
    elapsed_ms: u64,
) -> ExplorerResult<ResponseView> {
    let kind = ContentKind::classify(content_type);

    let body = match kind {
        kind if kind.is_media() => {
            let mime = content_type.unwrap_or_default();
            let media = MediaHandle::store(mime, bytes).map_err(|e| ExplorerError::Transport {
                status: None,
                message: format!("failed to store media response: {}", e),
            })?;
            ResponseBody::Media(media)
        }
        ContentKind::Json => {
            let value: Value = serde_json::from_slice(bytes)
                .map_err(|e| ExplorerError::Application(format!("invalid JSON body: {}", e)))?;

            if let Some(error) = value.as_object().and_then(|obj| obj.get("error")) {
                if is_truthy(error) {
                    let message = match error {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    return Err(ExplorerError::Application(sanitize_text(&message)));
                }
            }

            let pretty = serde_json::to_string_pretty(&value)
                .map_err(|e| ExplorerError::Application(format!("invalid JSON body: {}", e)))?;
            ResponseBody::Json(sanitize_text(&pretty))
        }
        _ => ResponseBody::Text(sanitize_text(&String::from_utf8_lossy(bytes))),
    };

    Ok(ResponseView {
        status: ViewStatus::Success,
        http_status: Some(status),
        status_line: format!("{} {}", status, reason),
        elapsed_ms,
        kind: Some(kind),
        body,
    })
}

/// Response views keyed by endpoint.
///
/// Installing or clearing a view drops the previous one first, which
/// releases any media it held.
#[derive(Debug, Default)]
pub struct ResponseStore {
    views: HashMap<EndpointId, ResponseView>,
}

impl ResponseStore {
    pub fn install(&mut self, id: EndpointId, view: ResponseView) {
        drop(self.views.remove(&id));
        self.views.insert(id, view);
    }

    pub fn clear(&mut self, id: EndpointId) {
        drop(self.views.remove(&id));
    }

    pub fn clear_all(&mut self) {
        self.views.clear();
    }

    pub fn get(&self, id: EndpointId) -> Option<&ResponseView> {
        self.views.get(&id)
    }

    pub fn status(&self, id: EndpointId) -> ViewStatus {
        self.views.get(&id).map_or(ViewStatus::Idle, |view| view.status)
    }
}
