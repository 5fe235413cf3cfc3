//! Estimates and their manually entered line items.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::boat::BoatId;
use crate::customer::CustomerId;
use crate::engine::EngineId;
use crate::error::{Result, ShopError};
use crate::tax::Totals;
use crate::validate::{require_non_negative, require_positive};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimateId(pub u32);

impl std::fmt::Display for EstimateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Estimate line items are typed; anything but a part or labor line is
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItemKind {
    Part,
    Labor,
}

impl LineItemKind {
    pub fn parse(label: &str) -> Result<LineItemKind> {
        match label {
            "part" => Ok(LineItemKind::Part),
            "labor" => Ok(LineItemKind::Labor),
            other => Err(ShopError::invalid(format!(
                "item type must be 'part' or 'labor', got '{other}'"
            ))),
        }
    }
}

/// A manually entered estimate line. Estimate lines are always taxable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateLineItem {
    pub kind: LineItemKind,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// `quantity * unit_price`, rounded to 2 places when the line is
    /// entered.
    pub line_total: Decimal,
}

impl EstimateLineItem {
    pub fn new(
        kind: LineItemKind,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<Self> {
        require_positive(quantity, "quantity")?;
        require_non_negative(unit_price, "unit price")?;
        Ok(EstimateLineItem {
            kind,
            description: description.into(),
            quantity,
            unit_price,
            line_total: (quantity * unit_price).round_dp(2),
        })
    }
}

/// A repair estimate. Estimates never reference an equipment sale, so the
/// out-of-state exclusion path never applies to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub id: EstimateId,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub boat_id: Option<BoatId>,
    #[serde(default)]
    pub engine_id: Option<EngineId>,
    pub date_created: NaiveDate,
    #[serde(default)]
    pub insurance_company: Option<String>,
    #[serde(default)]
    pub claim_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub totals: Totals,
    #[serde(default)]
    pub line_items: Vec<EstimateLineItem>,
}

/// Caller-supplied fields for creating an estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateDraft {
    pub customer_id: CustomerId,
    #[serde(default)]
    pub boat_id: Option<BoatId>,
    #[serde(default)]
    pub engine_id: Option<EngineId>,
    #[serde(default)]
    pub insurance_company: Option<String>,
    #[serde(default)]
    pub claim_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
