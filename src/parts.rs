//! Parts catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartId(pub u32);

impl std::fmt::Display for PartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog part. The `taxable` flag travels onto invoices: part usage
/// lines inherit it at aggregation time, unlike labor which is always
/// taxable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    #[serde(default)]
    pub part_number: Option<String>,
    pub name: String,
    #[serde(default)]
    pub stock_quantity: i64,
    pub price: Decimal,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub cost_from_supplier: Option<Decimal>,
    #[serde(default)]
    pub retail_price: Option<Decimal>,
    #[serde(default = "default_taxable")]
    pub taxable: bool,
}

/// Caller-supplied fields for creating a part. Parts are taxable unless
/// explicitly flagged otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartDraft {
    #[serde(default)]
    pub part_number: Option<String>,
    pub name: String,
    #[serde(default)]
    pub stock_quantity: i64,
    pub price: Decimal,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub cost_from_supplier: Option<Decimal>,
    #[serde(default)]
    pub retail_price: Option<Decimal>,
    #[serde(default = "default_taxable")]
    pub taxable: bool,
}

fn default_taxable() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn draft_defaults_to_taxable() {
        let json = r#"{"name": "Impeller Kit", "price": "42.50"}"#;
        let draft: PartDraft = serde_json::from_str(json).unwrap();
        assert!(draft.taxable);
        assert_eq!(draft.price, dec!(42.50));
        assert_eq!(draft.stock_quantity, 0);
    }
}
