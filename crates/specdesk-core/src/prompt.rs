//! The instruction template sent to the model with every spec-sheet batch.
//!
//! The template encodes the product-description composition rules, a few
//! worked examples, and the required output schema. It is data, not logic:
//! the built-in copy lives in `prompts/product_descriptions_v1.txt` and an
//! operator can point the relay at a replacement file.

use std::path::Path;

use thiserror::Error;
use tracing::info;

/// Marker replaced by the user's spec-sheet text.
pub const PLACEHOLDER: &str = "{{spec_input}}";

const BUILTIN_VERSION: &str = "product-descriptions/v1";
const BUILTIN_TEXT: &str = include_str!("../prompts/product_descriptions_v1.txt");

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt template {0} has no {{{{spec_input}}}} marker")]
    MissingPlaceholder(String),
    #[error("reading prompt template: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    version: String,
    text: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PromptTemplate {
    /// The template shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            version: BUILTIN_VERSION.to_string(),
            text: BUILTIN_TEXT.to_string(),
        }
    }

    /// Build a template from text; `version` is a free-form label for logs.
    pub fn new(version: impl Into<String>, text: impl Into<String>) -> Result<Self, PromptError> {
        let version = version.into();
        let text = text.into();
        if !text.contains(PLACEHOLDER) {
            return Err(PromptError::MissingPlaceholder(version));
        }
        Ok(Self { version, text })
    }

    /// Load a replacement template. The file name becomes the version label.
    pub fn from_file(path: &Path) -> Result<Self, PromptError> {
        let text = std::fs::read_to_string(path)?;
        let template = Self::new(path.display().to_string(), text)?;
        info!(version = %template.version, "loaded prompt template");
        Ok(template)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Substitute the spec-sheet text, verbatim, at the placeholder.
    pub fn render(&self, spec_input: &str) -> String {
        self.text.replace(PLACEHOLDER, spec_input)
    }
}
