//! Classification of upstream completion bodies and extraction of products.
//!
//! The relay passes the model service's JSON through untouched, so the body
//! reaching the client is one of: a completion whose first content block
//! carries the text, an error object, or something else entirely.

use serde_json::Value;

use crate::fence::strip_code_fences;
use crate::{FormatError, ProductRecord};

/// What an upstream body turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Text of the first content block.
    Success(String),
    /// The body carried an `error` field.
    Error(String),
    /// Neither an error nor a first content block with `text`.
    Malformed,
}

impl CompletionOutcome {
    /// Classify a body. An `error` field wins over any content present.
    pub fn classify(body: &Value) -> Self {
        if let Some(err) = body.get("error")
            && is_truthy(err)
        {
            return Self::Error(error_message(err));
        }

        match body
            .get("content")
            .and_then(|content| content.get(0))
            .and_then(|block| block.get("text"))
            .and_then(Value::as_str)
        {
            Some(text) => Self::Success(text.to_string()),
            None => Self::Malformed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Error(_) => "error",
            Self::Malformed => "malformed",
        }
    }
}

/// Turn an upstream body into products, or say why it can't be.
pub fn parse_completion(body: &Value) -> Result<Vec<ProductRecord>, FormatError> {
    match CompletionOutcome::classify(body) {
        CompletionOutcome::Success(text) => parse_products(&text),
        CompletionOutcome::Error(message) => Err(FormatError::Reported(message)),
        CompletionOutcome::Malformed => Err(FormatError::UnexpectedShape),
    }
}

/// Parse completion text as a JSON array of products, fences allowed.
pub fn parse_products(text: &str) -> Result<Vec<ProductRecord>, FormatError> {
    let products = serde_json::from_str(strip_code_fences(text))?;
    Ok(products)
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings are shown as-is; the service's own error objects carry `message`.
fn error_message(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => v.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const APOLLO: &str = "[{\"productCode\":\"APO-LF-1234\",\"collection\":\"APOLLO\",\"productType\":\"LAV FAUCET\",\"description\":\"APOLLO LEVER HANDLE 8\\\" LAV FAUCET CHROME\",\"finish\":\"CHROME\"}]";

    fn completion(text: &str) -> Value {
        json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": text}],
            "stop_reason": "end_turn"
        })
    }

    fn apollo() -> ProductRecord {
        ProductRecord {
            product_code: "APO-LF-1234".into(),
            collection: "APOLLO".into(),
            product_type: "LAV FAUCET".into(),
            description: "APOLLO LEVER HANDLE 8\" LAV FAUCET CHROME".into(),
            finish: "CHROME".into(),
        }
    }

    #[test]
    fn classify_success() {
        assert_eq!(
            CompletionOutcome::classify(&completion("[]")),
            CompletionOutcome::Success("[]".into())
        );
    }

    #[test]
    fn classify_string_error() {
        let body = json!({"error": "rate limited"});
        assert_eq!(
            CompletionOutcome::classify(&body),
            CompletionOutcome::Error("rate limited".into())
        );
    }

    #[test]
    fn classify_service_error_object() {
        let body = json!({
            "type": "error",
            "error": {"type": "overloaded_error", "message": "Overloaded"}
        });
        assert_eq!(
            CompletionOutcome::classify(&body),
            CompletionOutcome::Error("Overloaded".into())
        );
    }

    #[test]
    fn classify_error_object_without_message() {
        let body = json!({"error": {"code": 7}});
        assert_eq!(
            CompletionOutcome::classify(&body),
            CompletionOutcome::Error(r#"{"code":7}"#.into())
        );
    }

    #[test]
    fn null_error_is_ignored() {
        let mut body = completion("[]");
        body["error"] = Value::Null;
        assert!(matches!(
            CompletionOutcome::classify(&body),
            CompletionOutcome::Success(_)
        ));
    }

    #[test]
    fn classify_malformed() {
        for body in [
            json!({}),
            json!({"content": []}),
            json!({"content": [{"type": "tool_use"}]}),
            json!({"content": [{"text": 42}]}),
            json!([1, 2]),
        ] {
            assert_eq!(CompletionOutcome::classify(&body), CompletionOutcome::Malformed);
        }
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(CompletionOutcome::classify(&completion("[]")).as_str(), "success");
        assert_eq!(CompletionOutcome::classify(&json!({"error": "x"})).as_str(), "error");
        assert_eq!(CompletionOutcome::classify(&json!({})).as_str(), "malformed");
    }

    #[test]
    fn parses_single_product() {
        let products = parse_completion(&completion(APOLLO)).unwrap();
        assert_eq!(products, vec![apollo()]);
    }

    #[test]
    fn fenced_reply_parses_identically() {
        let fenced = format!("```json\n{APOLLO}\n```");
        let plain = parse_completion(&completion(APOLLO)).unwrap();
        let stripped = parse_completion(&completion(&fenced)).unwrap();
        assert_eq!(plain, stripped);
    }

    #[test]
    fn preserves_order() {
        let text = r#"[{"productCode":"B"},{"productCode":"A"},{"productCode":"C"}]"#;
        let codes: Vec<String> = parse_completion(&completion(text))
            .unwrap()
            .into_iter()
            .map(|p| p.product_code)
            .collect();
        assert_eq!(codes, ["B", "A", "C"]);
    }

    #[test]
    fn reported_error_message() {
        let err = parse_completion(&json!({"error": "rate limited"})).unwrap_err();
        assert!(matches!(&err, FormatError::Reported(m) if m == "rate limited"));
        assert_eq!(err.to_string(), "Error: rate limited");
    }

    #[test]
    fn unexpected_shape_message() {
        let err = parse_completion(&json!({"content": []})).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected response format from API");
    }

    #[test]
    fn prose_reply_is_invalid_json() {
        let err = parse_completion(&completion("Here are your products: none")).unwrap_err();
        assert!(matches!(err, FormatError::InvalidJson(_)));
    }

    #[test]
    fn object_instead_of_array_is_invalid_json() {
        let err = parse_products(r#"{"productCode":"APO-LF-1234"}"#).unwrap_err();
        assert!(matches!(err, FormatError::InvalidJson(_)));
    }
}
