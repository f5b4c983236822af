//! System clipboard access for copying URLs and response bodies

/// Lazily opened system clipboard.
///
/// The handle stays open for the life of the app so copied text remains
/// available on platforms where the owner must keep running.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    fn ensure(&mut self) -> Result<&mut arboard::Clipboard, arboard::Error> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new()?);
        }
        self.inner
            .as_mut()
            .ok_or(arboard::Error::ClipboardNotSupported)
    }

    pub fn copy_text(&mut self, text: &str) -> Result<(), arboard::Error> {
        self.ensure()?.set_text(text.to_string())
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .finish()
    }
}
