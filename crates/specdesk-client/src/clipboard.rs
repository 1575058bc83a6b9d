//! Clipboard seam for copying product descriptions.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    System(#[from] arboard::Error),
}

/// Write-only text clipboard.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
    hold: Option<Duration>,
}

impl SystemClipboard {
    /// For long-lived processes that keep the clipboard open.
    pub fn new() -> Result<Self, ClipboardError> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
            hold: None,
        })
    }

    /// For processes that exit right after copying.
    ///
    /// On Linux the selection belongs to the process that set it, so
    /// `set_text` blocks until another program (usually a clipboard manager)
    /// takes ownership or `hold` elapses. Elsewhere this is the same as
    /// [`SystemClipboard::new`].
    pub fn holding(hold: Duration) -> Result<Self, ClipboardError> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
            hold: Some(hold),
        })
    }

    pub fn hold(&self) -> Option<Duration> {
        self.hold
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        match self.hold {
            #[cfg(target_os = "linux")]
            Some(hold) => {
                use arboard::SetExtLinux;
                self.inner
                    .set()
                    .wait_until(std::time::Instant::now() + hold)
                    .text(text.to_owned())?;
            }
            _ => self.inner.set_text(text.to_owned())?,
        }
        Ok(())
    }
}
