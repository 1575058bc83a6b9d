//! Product records extracted by the model from spec-sheet text.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One model-extracted product row.
///
/// Every field is free text. Nothing is checked for emptiness, format, or
/// uniqueness: `product_code` is `ABC-DE-NNNN` and `collection` is upper case
/// only by the prompt's convention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default, deserialize_with = "loose_text")]
    pub product_code: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub collection: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub product_type: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub description: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub finish: String,
}

impl ProductRecord {
    /// Cells in export column order.
    pub fn cells(&self) -> [&str; 5] {
        [
            self.product_code.as_str(),
            self.collection.as_str(),
            self.product_type.as_str(),
            self.description.as_str(),
            self.finish.as_str(),
        ]
    }
}

/// Accept any JSON scalar as text; null reads as empty.
fn loose_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected text, found {other}"
        ))),
    }
}

/// Summary statistics over a batch of products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSummary {
    pub products: usize,
    pub collections: usize,
    pub finishes: usize,
}

/// Count products and distinct collection/finish values.
pub fn summarize(products: &[ProductRecord]) -> ProductSummary {
    let collections: HashSet<&str> = products.iter().map(|p| p.collection.as_str()).collect();
    let finishes: HashSet<&str> = products.iter().map(|p| p.finish.as_str()).collect();

    ProductSummary {
        products: products.len(),
        collections: collections.len(),
        finishes: finishes.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(collection: &str, finish: &str) -> ProductRecord {
        ProductRecord {
            product_code: "APO-LF-1234".into(),
            collection: collection.into(),
            product_type: "LAV FAUCET".into(),
            description: format!("{collection} LAV FAUCET {finish}"),
            finish: finish.into(),
        }
    }

    #[test]
    fn parses_camel_case_fields() {
        let json = r#"{
            "productCode": "APO-LF-1234",
            "collection": "APOLLO",
            "productType": "LAV FAUCET",
            "description": "APOLLO LEVER HANDLE 8\" LAV FAUCET CHROME",
            "finish": "CHROME"
        }"#;
        let parsed: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.product_code, "APO-LF-1234");
        assert_eq!(parsed.product_type, "LAV FAUCET");
        assert_eq!(parsed.description, "APOLLO LEVER HANDLE 8\" LAV FAUCET CHROME");
    }

    #[test]
    fn missing_and_null_fields_read_as_empty() {
        let json = r#"{"productCode": "ARC-LF-0001", "finish": null}"#;
        let parsed: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.product_code, "ARC-LF-0001");
        assert_eq!(parsed.collection, "");
        assert_eq!(parsed.finish, "");
    }

    #[test]
    fn scalar_fields_kept_as_text() {
        let json = r#"{"productCode": 1234, "collection": true}"#;
        let parsed: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.product_code, "1234");
        assert_eq!(parsed.collection, "true");
    }

    #[test]
    fn nested_field_rejected() {
        let json = r#"{"productCode": {"nested": 1}}"#;
        assert!(serde_json::from_str::<ProductRecord>(json).is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(record("APOLLO", "CHROME")).unwrap();
        assert_eq!(json["productCode"], "APO-LF-1234");
        assert_eq!(json["productType"], "LAV FAUCET");
    }

    #[test]
    fn summary_counts_distinct_values() {
        let products = vec![record("APOLLO", "CHROME"), record("APOLLO", "BRUSHED NICKEL")];
        let summary = summarize(&products);
        assert_eq!(summary.products, 2);
        assert_eq!(summary.collections, 1);
        assert_eq!(summary.finishes, 2);
    }

    #[test]
    fn summary_of_empty_batch() {
        let summary = summarize(&[]);
        assert_eq!(
            summary,
            ProductSummary {
                products: 0,
                collections: 0,
                finishes: 0
            }
        );
    }
}
