use specdesk_core::{ExportError, FormatError};
use thiserror::Error;

use crate::clipboard::ClipboardError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Please paste spec sheet text!")]
    EmptyInput,

    #[error("a batch is already being processed")]
    Busy,

    #[error("Error processing specs: relay request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error processing specs: relay returned {status} with a non-JSON body")]
    NotJson {
        status: u16,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("no product at row {0}")]
    NoSuchProduct(usize),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}
