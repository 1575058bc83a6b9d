//! Batch client: sends spec-sheet text to the relay, normalises the model's
//! reply into products, and exports or copies them.

pub mod clipboard;
mod error;
pub mod relay;
pub mod session;

pub use clipboard::{Clipboard, ClipboardError, SystemClipboard};
pub use error::ClientError;
pub use relay::{ClientConfig, Relay, RelayClient};
pub use session::{BatchSession, Mode, Submission};
