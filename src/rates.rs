//! Labor rate table and rate resolution.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::engine::EngineClass;

/// Hourly labor rates per engine class. A single configuration record,
/// installed with shop defaults when the store is created and editable
/// afterwards. Changing it never retroactively alters existing labor
/// entries: each entry's rate is stamped at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub outboard: Decimal,
    pub inboard: Decimal,
    pub sterndrive: Decimal,
    pub pwc: Decimal,
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable {
            outboard: dec!(100.00),
            inboard: dec!(120.00),
            sterndrive: dec!(120.00),
            pwc: dec!(120.00),
        }
    }
}

impl RateTable {
    pub fn rate_for(&self, class: EngineClass) -> Decimal {
        match class {
            EngineClass::Outboard => self.outboard,
            EngineClass::Inboard => self.inboard,
            EngineClass::Sterndrive => self.sterndrive,
            EngineClass::Pwc => self.pwc,
        }
    }
}

/// Resolve the hourly rate for a new labor entry.
///
/// An explicit override wins outright. Otherwise the engine's type label is
/// classified and the class rate used. An unclassifiable (or absent) engine
/// falls back to the mechanic's stored rate, and failing that to the
/// outboard rate. The result is stamped on the labor entry at creation and
/// never re-derived.
pub fn resolve_labor_rate(
    override_rate: Option<Decimal>,
    engine_type: Option<&str>,
    mechanic_rate: Option<Decimal>,
    rates: &RateTable,
) -> Decimal {
    if let Some(rate) = override_rate {
        return rate;
    }
    if let Some(class) = engine_type.and_then(EngineClass::classify) {
        return rates.rate_for(class);
    }
    match mechanic_rate {
        Some(rate) => {
            log::debug!("engine unclassified, falling back to mechanic rate {rate}");
            rate
        }
        None => {
            log::debug!("engine unclassified and no mechanic rate, using outboard rate");
            rates.outboard
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_shop_rates() {
        let rates = RateTable::default();
        assert_eq!(rates.outboard, dec!(100.00));
        assert_eq!(rates.inboard, dec!(120.00));
        assert_eq!(rates.sterndrive, dec!(120.00));
        assert_eq!(rates.pwc, dec!(120.00));
    }

    #[test]
    fn override_wins_over_classification() {
        let rates = RateTable::default();
        let rate = resolve_labor_rate(
            Some(dec!(85.00)),
            Some("Outboard 115HP"),
            Some(dec!(65.00)),
            &rates,
        );
        assert_eq!(rate, dec!(85.00));
    }

    #[test]
    fn classified_engine_uses_class_rate() {
        let rates = RateTable::default();
        let rate = resolve_labor_rate(None, Some("Outboard 115HP"), Some(dec!(65.00)), &rates);
        assert_eq!(rate, dec!(100.00));

        let rate = resolve_labor_rate(None, Some("Sterndrive V8"), None, &rates);
        assert_eq!(rate, dec!(120.00));
    }

    #[test]
    fn unclassifiable_engine_falls_back_to_mechanic_rate() {
        let rates = RateTable::default();
        let rate = resolve_labor_rate(None, Some("Unknown Drive"), Some(dec!(65.00)), &rates);
        assert_eq!(rate, dec!(65.00));
    }

    #[test]
    fn no_engine_and_no_mechanic_rate_uses_outboard_rate() {
        let rates = RateTable::default();
        assert_eq!(resolve_labor_rate(None, None, None, &rates), dec!(100.00));
        assert_eq!(
            resolve_labor_rate(None, Some("mystery"), None, &rates),
            dec!(100.00)
        );
    }
}
