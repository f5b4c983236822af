//! Transient storage for binary media responses

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

/// A binary response body parked in a temporary file.
///
/// The file lives exactly as long as the handle; dropping the handle deletes it.
#[derive(Debug)]
pub struct MediaHandle {
    file: NamedTempFile,
    mime: String,
    size: usize,
}

impl MediaHandle {
    pub fn store(mime: &str, bytes: &[u8]) -> std::io::Result<Self> {
        let suffix = format!(".{}", extension_for(mime));
        let mut file = tempfile::Builder::new()
            .prefix("apidocs-")
            .suffix(&suffix)
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;

        tracing::debug!(path = %file.path().display(), mime, size = bytes.len(), "Stored media response");
        Ok(MediaHandle {
            file,
            mime: mime.to_string(),
            size: bytes.len(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Drop for MediaHandle {
    fn drop(&mut self) {
        tracing::debug!(path = %self.file.path().display(), "Releasing media response");
    }
}

/// File extension derived from the mime subtype, parameters stripped
fn extension_for(mime: &str) -> String {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    let subtype = essence.split_once('/').map(|(_, sub)| sub).unwrap_or("bin");
    let subtype = subtype.rsplit('+').last().unwrap_or(subtype);
    match subtype.to_lowercase().as_str() {
        "" => "bin".to_string(),
        "jpeg" => "jpg".to_string(),
        "mpeg" if essence.starts_with("audio") => "mp3".to_string(),
        other => other.chars().filter(|c| c.is_ascii_alphanumeric()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_release() {
        let handle = MediaHandle::store("image/png", b"\x89PNG fake").unwrap();
        let path = handle.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(handle.size(), 9);
        assert!(path.to_string_lossy().ends_with(".png"));

        drop(handle);
        assert!(!path.exists());
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("audio/mpeg"), "mp3");
        assert_eq!(extension_for("video/mp4; codecs=avc1"), "mp4");
        assert_eq!(extension_for("image/svg+xml"), "svg");
        assert_eq!(extension_for("weird"), "bin");
    }
}
