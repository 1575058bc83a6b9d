//! Core types for specdesk: product records, the prompt template, upstream
//! completion parsing, and CSV export.

mod error;
pub use error::{ExportError, FormatError};

pub mod completion;
pub mod export;
pub mod fence;
pub mod product;
pub mod prompt;

pub use completion::{CompletionOutcome, parse_completion, parse_products};
pub use export::{CsvStyle, export_file_name, to_csv, write_csv};
pub use fence::strip_code_fences;
pub use product::{ProductRecord, ProductSummary, summarize};
pub use prompt::{PromptError, PromptTemplate};
