use serde::{Deserialize, Serialize};

/// An embedded service or product line on an order.
///
/// A missing cost reads as zero; a missing quantity reads as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,

    #[serde(default)]
    pub cost: f64,

    #[serde(default = "default_quantity")]
    pub quantity: f64,
}

const fn default_quantity() -> f64 {
    1.0
}

impl LineItem {
    /// Monetary value of this line (unit cost times quantity).
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.cost * self.quantity
    }
}

/// Sum of all line amounts; the one cost formula every revenue
/// aggregate uses.
#[must_use]
pub fn total_amount(services: &[LineItem], products: &[LineItem]) -> f64 {
    services.iter().map(LineItem::amount).sum::<f64>()
        + products.iter().map(LineItem::amount).sum::<f64>()
}

/// Decode an embedded line-item list. `null` or malformed JSON reads as
/// an empty list so that a single bad row cannot poison an aggregate.
#[must_use]
pub fn parse_line_items(json: &str) -> Vec<LineItem> {
    serde_json::from_str(json).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_multiplies_cost_by_quantity() {
        let services = vec![LineItem {
            name: "haircut".to_string(),
            cost: 100.0,
            quantity: 2.0,
        }];
        let products = vec![LineItem {
            name: "shampoo".to_string(),
            cost: 50.0,
            quantity: 1.0,
        }];

        assert!((total_amount(&services, &products) - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_cost_reads_as_zero() {
        let items = parse_line_items(r#"[{"name":"trim","quantity":3}]"#);
        assert_eq!(items.len(), 1);
        assert!(items[0].amount().abs() < f64::EPSILON);
    }

    #[test]
    fn missing_quantity_reads_as_one_unit() {
        let items = parse_line_items(r#"[{"name":"trim","cost":40}]"#);
        assert!((items[0].amount() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn null_or_garbage_reads_as_empty() {
        assert!(parse_line_items("null").is_empty());
        assert!(parse_line_items("not json").is_empty());
    }
}
