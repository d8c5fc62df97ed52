use std::fmt::Write as _;

use owo_colors::{OwoColorize, Stream};

use crate::products::catalog::{MAX_RATING, Product};

const RULE_WIDTH: usize = 60;
const ITEM_RULE_WIDTH: usize = 40;

/// Console listing of a result set.
pub fn render_results(products: &[Product]) -> String {
    if products.is_empty() {
        return format!(
            "{}\n",
            "No products found matching your criteria."
                .if_supports_color(Stream::Stdout, |text| text.red())
        );
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!("Found {} matching product(s):", products.len())
            .if_supports_color(Stream::Stdout, |text| text.green())
    );
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

    for (index, product) in products.iter().enumerate() {
        let stock = if product.in_stock {
            format!(
                "{}",
                "In Stock".if_supports_color(Stream::Stdout, |text| text.green())
            )
        } else {
            format!(
                "{}",
                "Out of Stock".if_supports_color(Stream::Stdout, |text| text.red())
            )
        };

        let _ = writeln!(
            out,
            "{}. {}",
            index + 1,
            product.name.if_supports_color(Stream::Stdout, |text| text.bold())
        );
        let _ = writeln!(out, "   Category: {}", product.category);
        let _ = writeln!(out, "   Price: ${:.2}", product.price);
        let _ = writeln!(
            out,
            "   Rating: {}/{MAX_RATING:.1}",
            format_rating(product.rating)
        );
        let _ = writeln!(out, "   Stock: {stock}");
        let _ = writeln!(out, "{}", "-".repeat(ITEM_RULE_WIDTH));
    }
    out
}

/// Whole ratings keep one decimal place (`4.0`); others print as stored (`4.25`).
fn format_rating(rating: f64) -> String {
    if rating.fract() == 0.0 {
        format!("{rating:.1}")
    } else {
        rating.to_string()
    }
}
