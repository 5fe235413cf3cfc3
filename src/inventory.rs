//! New-engine stock and equipment sales.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::boat::BoatId;
use crate::customer::CustomerId;

/// Days after installation before a sold engine must be registered with
/// the manufacturer.
pub const REGISTRATION_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewEngineId(pub u32);

impl std::fmt::Display for NewEngineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stock status of a new engine. Only `InStock` units can be sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    InStock,
    Sold,
}

impl StockStatus {
    pub fn display(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::Sold => "Sold",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A new engine in inventory. Once sold, its sale price becomes the
/// equipment-sale amount the billing engine folds into ticket totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEngine {
    pub id: NewEngineId,
    pub hp: i32,
    pub model: String,
    pub serial_number: String,
    pub status: StockStatus,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub boat_id: Option<BoatId>,
    #[serde(default)]
    pub purchase_price: Option<Decimal>,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    #[serde(default)]
    pub date_sold: Option<NaiveDate>,
    #[serde(default)]
    pub date_installed: Option<NaiveDate>,
    #[serde(default)]
    pub paid_in_full: bool,
    #[serde(default)]
    pub registered: bool,
    #[serde(default)]
    pub registration_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewEngine {
    /// A sold unit needs manufacturer registration once it is paid in full
    /// and has been installed for at least [`REGISTRATION_WINDOW_DAYS`].
    pub fn needs_registration(&self, as_of: NaiveDate) -> bool {
        self.status == StockStatus::Sold
            && self.paid_in_full
            && !self.registered
            && self
                .date_installed
                .is_some_and(|installed| installed <= as_of - Duration::days(REGISTRATION_WINDOW_DAYS))
    }
}

/// Terms of an equipment sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleTerms {
    pub customer_id: CustomerId,
    #[serde(default)]
    pub boat_id: Option<BoatId>,
    pub sale_price: Decimal,
    pub date_sold: NaiveDate,
    #[serde(default)]
    pub date_installed: Option<NaiveDate>,
    #[serde(default)]
    pub paid_in_full: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sold_engine(installed: Option<NaiveDate>, paid: bool, registered: bool) -> NewEngine {
        NewEngine {
            id: NewEngineId(1),
            hp: 115,
            model: "MFS115".to_string(),
            serial_number: "T115-001".to_string(),
            status: StockStatus::Sold,
            customer_id: Some(CustomerId(1)),
            boat_id: None,
            purchase_price: Some(dec!(9000.00)),
            sale_price: Some(dec!(12500.00)),
            date_sold: NaiveDate::from_ymd_opt(2026, 5, 1),
            date_installed: installed,
            paid_in_full: paid,
            registered,
            registration_date: None,
            notes: None,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn registration_due_after_thirty_days() {
        let engine = sold_engine(Some(d(2026, 5, 10)), true, false);
        assert!(!engine.needs_registration(d(2026, 6, 8)));
        // Exactly 30 days after installation.
        assert!(engine.needs_registration(d(2026, 6, 9)));
        assert!(engine.needs_registration(d(2026, 7, 1)));
    }

    #[test]
    fn unpaid_or_registered_units_not_due() {
        let as_of = d(2026, 8, 1);
        assert!(!sold_engine(Some(d(2026, 5, 10)), false, false).needs_registration(as_of));
        assert!(!sold_engine(Some(d(2026, 5, 10)), true, true).needs_registration(as_of));
        assert!(!sold_engine(None, true, false).needs_registration(as_of));
    }

    #[test]
    fn in_stock_units_never_due() {
        let mut engine = sold_engine(Some(d(2026, 5, 10)), true, false);
        engine.status = StockStatus::InStock;
        assert!(!engine.needs_registration(d(2026, 8, 1)));
    }
}
