//! HTTP client wrapper - executes endpoint requests and classifies responses

use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;

use crate::constants::{ACCEPT_ANY, USER_AGENT};
use crate::error::{ExplorerError, ExplorerResult};
use crate::request::response::{classify_response, ResponseView};

/// Create an HTTP client with the fixed explorer headers.
///
/// No overall timeout is set; the client's own limits apply.
pub fn create_client() -> reqwest::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_ANY));

    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
}

fn parse_method(method: &str) -> ExplorerResult<Method> {
    let normalized = if method.trim().is_empty() {
        "GET".to_string()
    } else {
        method.trim().to_uppercase()
    };
    Method::from_bytes(normalized.as_bytes()).map_err(|_| ExplorerError::Transport {
        status: None,
        message: format!("Unsupported method: {}", method),
    })
}

fn describe_send_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timed out".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// Issue one bodyless request and classify the response.
///
/// Returns the view together with the elapsed wall-clock time, which runs
/// from just before sending until the body is fully read.
pub async fn fetch(client: &reqwest::Client, method: &str, url: &str) -> (ExplorerResult<ResponseView>, u64) {
    let start = Instant::now();
    let elapsed = |start: Instant| start.elapsed().as_millis() as u64;

    let method = match parse_method(method) {
        Ok(method) => method,
        Err(e) => return (Err(e), 0),
    };

    let response = match client.request(method, url).send().await {
        Ok(response) => response,
        Err(e) => {
            let err = ExplorerError::Transport {
                status: None,
                message: describe_send_error(&e),
            };
            return (Err(err), elapsed(start));
        }
    };

    let status = response.status();
    if !status.is_success() {
        let err = ExplorerError::Transport {
            status: Some(status.as_u16()),
            message: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
        };
        return (Err(err), elapsed(start));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            let err = ExplorerError::Transport {
                status: Some(status.as_u16()),
                message: format!("Error reading body: {}", e),
            };
            return (Err(err), elapsed(start));
        }
    };
    let elapsed_ms = elapsed(start);

    let reason = status.canonical_reason().unwrap_or("OK");
    (
        classify_response(status.as_u16(), reason, content_type.as_deref(), &bytes, elapsed_ms),
        elapsed_ms,
    )
}

/// Execute a request; every path ends in a terminal success or error view
pub async fn execute_request(client: &reqwest::Client, method: &str, url: &str) -> ResponseView {
    let (result, elapsed_ms) = fetch(client, method, url).await;
    match result {
        Ok(view) => view,
        Err(e) => {
            tracing::warn!(url, error = %e, "Request failed");
            ResponseView::failed(&e, elapsed_ms)
        }
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves exactly one canned HTTP/1.1 response on an ephemeral port.
    ///
    /// Returns the origin and a receiver yielding the raw request head.
    pub async fn serve_once(status_line: &str, content_type: &str, body: Vec<u8>) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());
        let (head_tx, head_rx) = oneshot::channel();
        let status_line = status_line.to_string();
        let content_type = content_type.to_string();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let mut head = Vec::new();
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let _ = head_tx.send(String::from_utf8_lossy(&head).to_string());

            let mut response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                status_line,
                body.len()
            );
            if !content_type.is_empty() {
                response.push_str(&format!("Content-Type: {}\r\n", content_type));
            }
            response.push_str("\r\n");
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        (origin, head_rx)
    }
}

#[cfg(test)]
mod tests {
    use super::test_server::serve_once;
    use super::*;
    use crate::request::response::{ContentKind, ViewStatus};

    #[tokio::test]
    async fn test_json_success_sends_fixed_headers() {
        let (origin, head_rx) =
            serve_once("200 OK", "application/json", br#"{"result":"ok"}"#.to_vec()).await;
        let client = create_client().unwrap();

        let url = format!("{}/downloader/tiktok?url=v1&apikey=v2", origin);
        let view = execute_request(&client, "GET", &url).await;
        assert_eq!(view.status, ViewStatus::Success);
        assert_eq!(view.kind, Some(ContentKind::Json));
        assert_eq!(view.body_text(), "{\n  \"result\": \"ok\"\n}");

        let head = head_rx.await.unwrap().to_lowercase();
        assert!(head.starts_with("get /downloader/tiktok?url=v1&apikey=v2 http/1.1"));
        assert!(head.contains("accept: */*"));
        assert!(head.contains(&format!("user-agent: {}", USER_AGENT.to_lowercase())));
    }

    #[tokio::test]
    async fn test_non_2xx_is_transport_error() {
        let (origin, _head) = serve_once("404 Not Found", "text/plain", b"nope".to_vec()).await;
        let client = create_client().unwrap();

        let (result, _) = fetch(&client, "GET", &format!("{}/missing", origin)).await;
        match result {
            Err(ExplorerError::Transport { status, message }) => {
                assert_eq!(status, Some(404));
                assert_eq!(message, "Not Found");
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_application_error_view() {
        let (origin, _head) =
            serve_once("200 OK", "application/json", br#"{"error":"bad key"}"#.to_vec()).await;
        let client = create_client().unwrap();

        let view = execute_request(&client, "post", &format!("{}/ai", origin)).await;
        assert_eq!(view.status, ViewStatus::Error);
        assert_eq!(view.body_text(), "API Error: bad key");
    }

    #[tokio::test]
    async fn test_connection_failure_is_terminal() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = create_client().unwrap();
        let view = execute_request(&client, "GET", &format!("http://{}/x", addr)).await;
        assert_eq!(view.status, ViewStatus::Error);
        assert_eq!(view.http_status, None);
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("post").unwrap(), Method::POST);
        assert_eq!(parse_method("").unwrap(), Method::GET);
        assert!(parse_method("BAD METHOD").is_err());
    }
}
