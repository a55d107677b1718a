use serde_json::Value;

use super::{cell, result_of};

/// Headline fields, most important first.
const HEADLINE_KEYS: [&str; 4] = ["emi", "total_interest", "total_payment", "tenure_months"];

/// Print just the headline value.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result = result_of(value);

    if let Value::Object(map) = result {
        for key in HEADLINE_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                return cell(val);
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{key}: {}", cell(val));
        }
    }

    cell(result)
}
