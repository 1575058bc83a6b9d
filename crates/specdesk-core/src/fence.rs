//! Markdown code-fence stripping for model replies.
//!
//! Models asked for "ONLY valid JSON" still tend to wrap the answer in a
//! fenced block:
//!
//! ````text
//! ```json
//! [{"productCode": "APO-LF-1234", ...}]
//! ```
//! ````
//!
//! Both the language-tagged opener (```` ```json ````) and the bare one
//! (```` ``` ````) are removed, as is the closing marker.

const FENCE: &str = "```";

/// Remove a leading and a trailing code-fence marker, trimming whitespace.
///
/// The opener may carry a language tag (`json`, `JSON`, `json5`, ...) which
/// is dropped with it. Text without fences comes back trimmed and otherwise
/// untouched, so applying this twice gives the same result as applying it
/// once.
pub fn strip_code_fences(text: &str) -> &str {
    let mut s = text.trim();

    if let Some(rest) = s.strip_prefix(FENCE) {
        let tag_end = rest
            .find(|c: char| !is_tag_char(c))
            .unwrap_or(rest.len());
        s = rest[tag_end..].trim_start();
    }

    let s = s.trim_end();
    s.strip_suffix(FENCE).unwrap_or(s).trim()
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')
}
