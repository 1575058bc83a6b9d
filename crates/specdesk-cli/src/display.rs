//! Terminal rendering of a product batch.
//!
//! One line per product with code, collection, type and finish in aligned
//! columns, the description indented on the line below, then the summary
//! counts.

use specdesk_core::{ProductRecord, ProductSummary};

const MAX_COLUMN: usize = 28;
const MAX_DESCRIPTION: usize = 110;

// ── Public API ──

/// Print the product table, or a note when the batch is empty.
pub fn print_products(products: &[ProductRecord]) {
    if products.is_empty() {
        println!("No products extracted.");
        return;
    }

    let code_w = column_width("Product Code", products.iter().map(|p| p.product_code.as_str()));
    let coll_w = column_width("Collection", products.iter().map(|p| p.collection.as_str()));
    let type_w = column_width("Type", products.iter().map(|p| p.product_type.as_str()));

    println!("Generated Products ({})", products.len());
    println!();
    println!(
        "  {:>3}  {:<code_w$}  {:<coll_w$}  {:<type_w$}  Finish",
        "#", "Product Code", "Collection", "Type"
    );
    for (i, p) in products.iter().enumerate() {
        println!(
            "  {:>3}  {:<code_w$}  {:<coll_w$}  {:<type_w$}  {}",
            i + 1,
            clip(&p.product_code, code_w),
            clip(&p.collection, coll_w),
            clip(&p.product_type, type_w),
            p.finish
        );
        if !p.description.is_empty() {
            println!("       {}", clip(&p.description, MAX_DESCRIPTION));
        }
    }
    println!();
}

pub fn print_summary(summary: &ProductSummary) {
    println!("  {:<22} {}", "Products Generated", summary.products);
    println!("  {:<22} {}", "Collections", summary.collections);
    println!("  {:<22} {}", "Finishes", summary.finishes);
}

// ── Helpers ──

/// Widest value (in chars), at least the header, at most `MAX_COLUMN`.
fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .fold(header.chars().count(), usize::max)
        .min(MAX_COLUMN)
}

/// Shorten to `max` chars, marking the cut with "...".
fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
