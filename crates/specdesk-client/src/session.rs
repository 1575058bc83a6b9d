//! Batch session: the input text, the current product list, and the
//! idle/busy mode toggled around each relay call.
//!
//! The session owns all client state. A submission moves it to busy and
//! hands out a [`Submission`] token carrying the trimmed input; finishing or
//! abandoning the token returns it to idle. Only a successful finish touches
//! the product list, and then replaces it wholesale.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;
use specdesk_core::{CsvStyle, ProductRecord, ProductSummary, parse_completion, summarize, write_csv};
use tracing::{info, warn};

use crate::ClientError;
use crate::clipboard::Clipboard;
use crate::relay::Relay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Busy,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Busy => "busy",
        }
    }
}

/// An in-flight request. Obtained from [`BatchSession::submit`] only.
#[derive(Debug)]
pub struct Submission {
    spec_input: String,
}

impl Submission {
    /// The trimmed input to send.
    pub fn spec_input(&self) -> &str {
        &self.spec_input
    }
}

#[derive(Debug)]
pub struct BatchSession {
    input: String,
    products: Vec<ProductRecord>,
    mode: Mode,
}

impl Default for BatchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchSession {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            products: Vec::new(),
            mode: Mode::Idle,
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Product count and distinct collection/finish counts.
    pub fn summary(&self) -> ProductSummary {
        summarize(&self.products)
    }

    /// Start a request: fails while busy or when the trimmed input is empty.
    pub fn submit(&mut self) -> Result<Submission, ClientError> {
        if self.mode == Mode::Busy {
            return Err(ClientError::Busy);
        }
        let spec_input = self.input.trim();
        if spec_input.is_empty() {
            warn!("submit with empty spec input");
            return Err(ClientError::EmptyInput);
        }

        self.mode = Mode::Busy;
        info!(mode = self.mode.as_str(), input_bytes = spec_input.len(), "submitted");
        Ok(Submission {
            spec_input: spec_input.to_string(),
        })
    }

    /// Apply the relay's reply and return to idle.
    ///
    /// On success the product list is replaced and its new length returned.
    /// On any failure the previous list is left as it was.
    pub fn finish(
        &mut self,
        submission: Submission,
        reply: Result<Value, ClientError>,
    ) -> Result<usize, ClientError> {
        drop(submission);
        self.mode = Mode::Idle;

        let products = parse_completion(&reply?)?;
        info!(count = products.len(), mode = self.mode.as_str(), "replaced product list");
        self.products = products;
        Ok(self.products.len())
    }

    /// Give up on a request without touching the product list.
    pub fn abandon(&mut self, submission: Submission) {
        drop(submission);
        self.mode = Mode::Idle;
        info!(mode = self.mode.as_str(), "request abandoned");
    }

    /// Submit, call the relay once, and apply the reply.
    ///
    /// Dropping the returned future mid-call leaves the session idle with
    /// its product list unchanged.
    pub async fn process<R: Relay + ?Sized>(&mut self, relay: &R) -> Result<usize, ClientError> {
        let submission = self.submit()?;
        let reply = {
            let _busy = BusyGuard(&mut self.mode);
            relay.generate(submission.spec_input()).await
        };
        self.finish(submission, reply)
    }

    /// Empty the input and the product list. Nothing in flight is cancelled.
    pub fn clear(&mut self) {
        self.input.clear();
        self.products.clear();
    }

    /// Write `products_<today>.csv` into `dir`; `Ok(None)` when empty.
    pub fn export_csv(&self, dir: &Path, style: CsvStyle) -> Result<Option<PathBuf>, ClientError> {
        self.export_csv_dated(dir, chrono::Local::now().date_naive(), style)
    }

    pub fn export_csv_dated(
        &self,
        dir: &Path,
        date: NaiveDate,
        style: CsvStyle,
    ) -> Result<Option<PathBuf>, ClientError> {
        Ok(write_csv(dir, &self.products, date, style)?)
    }

    /// Copy one row's description (0-based) to the clipboard.
    pub fn copy_description(
        &self,
        row: usize,
        clipboard: &mut dyn Clipboard,
    ) -> Result<&str, ClientError> {
        let product = self
            .products
            .get(row)
            .ok_or(ClientError::NoSuchProduct(row))?;
        clipboard.set_text(&product.description)?;
        info!(row, "description copied");
        Ok(&product.description)
    }
}

/// Resets the mode to idle when dropped, including when the owning future is.
struct BusyGuard<'a>(&'a mut Mode);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.0 = Mode::Idle;
    }
}
