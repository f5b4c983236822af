//! One-shot settings load at startup

use std::path::PathBuf;

use crate::constants::{SETTINGS_CONNECT_TIMEOUT, SETTINGS_PATH, USER_AGENT};
use crate::error::{ExplorerError, ExplorerResult};
use crate::models::Settings;

/// Where the settings document comes from
#[derive(Clone, Debug, PartialEq)]
pub enum SettingsSource {
    /// `GET {origin}/settings`
    Remote { origin: String },
    /// A local JSON file
    File(PathBuf),
}

impl SettingsSource {
    pub fn describe(&self) -> String {
        match self {
            SettingsSource::Remote { origin } => {
                format!("{}{}", origin.trim_end_matches('/'), SETTINGS_PATH)
            }
            SettingsSource::File(path) => path.display().to_string(),
        }
    }
}

async fn fetch_remote(url: &str) -> ExplorerResult<String> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(SETTINGS_CONNECT_TIMEOUT)
        .build()
        .map_err(|e| ExplorerError::SettingsLoad(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ExplorerError::SettingsLoad(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ExplorerError::SettingsLoad(format!(
            "settings not found (HTTP {})",
            response.status().as_u16()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| ExplorerError::SettingsLoad(e.to_string()))
}

/// Load and parse the settings document, reporting any failure
pub async fn try_load_settings(source: &SettingsSource) -> ExplorerResult<Settings> {
    let content = match source {
        SettingsSource::Remote { .. } => fetch_remote(&source.describe()).await?,
        SettingsSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ExplorerError::SettingsLoad(format!("{}: {}", path.display(), e)))?,
    };

    serde_json::from_str(&content).map_err(|e| ExplorerError::SettingsLoad(e.to_string()))
}

/// Load the settings document, falling back to the built-in defaults.
///
/// Never fails: any fetch or parse problem is logged and the default
/// settings with an empty catalog are returned.
pub async fn load_settings(source: &SettingsSource) -> Settings {
    match try_load_settings(source).await {
        Ok(settings) => {
            tracing::info!(
                source = %source.describe(),
                categories = settings.categories.len(),
                "Loaded settings"
            );
            settings
        }
        Err(e) => {
            tracing::warn!(source = %source.describe(), error = %e, "Falling back to default settings");
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::client::test_server::serve_once;

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"name":"Demo","creator":"Ada","categories":[{"name":"Tools","items":[{"name":"Ping","method":"GET","path":"/ping"}]}]}"#,
        )
        .unwrap();

        let settings = load_settings(&SettingsSource::File(path)).await;
        assert_eq!(settings.name, "Demo");
        assert_eq!(settings.categories[0].items[0].name, "Ping");
    }

    #[tokio::test]
    async fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let source = SettingsSource::File(path);
        assert!(matches!(
            try_load_settings(&source).await,
            Err(ExplorerError::SettingsLoad(_))
        ));
        assert_eq!(load_settings(&source).await, Settings::default());
    }

    #[tokio::test]
    async fn test_bad_entry_keeps_rest_of_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"name":"Demo","categories":[null,{"name":"Tools","items":[{"name":"Bad","status":1},{"name":"Ping","path":"/ping"}]}]}"#,
        )
        .unwrap();

        let settings = try_load_settings(&SettingsSource::File(path)).await.unwrap();
        assert_eq!(settings.title(), "Demo");
        assert_eq!(settings.categories.len(), 1);
        assert_eq!(settings.categories[0].items.len(), 1);
        assert_eq!(settings.categories[0].items[0].name, "Ping");
    }

    #[tokio::test]
    async fn test_missing_file_falls_back() {
        let source = SettingsSource::File(PathBuf::from("/nonexistent/settings.json"));
        let settings = load_settings(&source).await;
        assert!(settings.categories.is_empty());
    }

    #[tokio::test]
    async fn test_remote_load_and_404_fallback() {
        let (origin, head_rx) = serve_once(
            "200 OK",
            "application/json",
            br#"{"name":"Remote","categories":[]}"#.to_vec(),
        )
        .await;
        let settings = load_settings(&SettingsSource::Remote { origin }).await;
        assert_eq!(settings.name, "Remote");
        assert!(head_rx.await.unwrap().starts_with("GET /settings "));

        let (origin, _head) = serve_once("404 Not Found", "text/plain", b"no".to_vec()).await;
        let settings = load_settings(&SettingsSource::Remote { origin }).await;
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_describe() {
        let source = SettingsSource::Remote {
            origin: "http://h:1/".into(),
        };
        assert_eq!(source.describe(), "http://h:1/settings");
    }
}
