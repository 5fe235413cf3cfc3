//! Sales tax computation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::customer::Customer;

/// Louisiana sales tax rate, 9.75%. Fixed; not configurable.
pub const TAX_RATE: Decimal = dec!(0.0975);

/// One priced item on a ticket or estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeLine {
    pub amount: Decimal,
    pub taxable: bool,
}

/// Computed invoice amounts. Always replaced wholesale on recompute, never
/// patched incrementally. Holds `total == round(subtotal + tax_amount, 2)`
/// after every recompute.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

/// Compute `(subtotal, tax, total)` for a transaction.
///
/// Rules, in order:
/// 1. A tax-exempt customer with a certificate on file pays no tax at all.
///    Checked first; short-circuits everything below.
/// 2. An out-of-state customer buying a new engine pays no tax on the
///    engine itself (it stays in the subtotal) while other taxable items
///    are taxed normally.
/// 3. Otherwise every taxable item, the engine sale included, is taxed at
///    [`TAX_RATE`].
///
/// `payment_method` is carried through to the persisted ticket but has no
/// effect on the computation. It is kept in the signature for a
/// cash-specific rule that was planned and never implemented; do not drop
/// it silently.
///
/// Both rounding steps (tax, then total) use round-half-even at 2 places.
pub fn calculate_tax(
    customer: &Customer,
    charges: &[ChargeLine],
    payment_method: Option<&str>,
    equipment_sale_price: Decimal,
) -> Totals {
    let mut subtotal: Decimal = charges.iter().map(|line| line.amount).sum();
    subtotal += equipment_sale_price;

    if customer.has_exemption() {
        log::debug!("customer {} tax exempt, no tax applied", customer.id);
        return Totals {
            subtotal,
            tax_amount: Decimal::ZERO,
            total: subtotal,
        };
    }

    let taxable_lines: Decimal = charges
        .iter()
        .filter(|line| line.taxable)
        .map(|line| line.amount)
        .sum();

    let taxable_amount = if customer.out_of_state && equipment_sale_price > Decimal::ZERO {
        // Engine sale excluded from taxation for out-of-state buyers; it
        // remains part of the subtotal.
        taxable_lines
    } else {
        equipment_sale_price + taxable_lines
    };

    let tax_amount = (taxable_amount * TAX_RATE).round_dp(2);
    let total = (subtotal + tax_amount).round_dp(2);

    log::debug!(
        "tax: subtotal={subtotal} taxable={taxable_amount} tax={tax_amount} method={payment_method:?}"
    );

    Totals {
        subtotal,
        tax_amount,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::CustomerId;

    fn customer() -> Customer {
        Customer {
            id: CustomerId(1),
            name: "Arceneaux Marine".to_string(),
            phone: None,
            email: None,
            address: None,
            tax_exempt: false,
            tax_exempt_certificate: None,
            out_of_state: false,
        }
    }

    fn line(amount: Decimal, taxable: bool) -> ChargeLine {
        ChargeLine { amount, taxable }
    }

    #[test]
    fn exempt_customer_with_certificate_pays_no_tax() {
        let mut c = customer();
        c.tax_exempt = true;
        c.tax_exempt_certificate = Some("TX1".to_string());

        let totals = calculate_tax(
            &c,
            &[line(dec!(100.00), true), line(dec!(50.00), true)],
            None,
            Decimal::ZERO,
        );
        assert_eq!(totals.subtotal, dec!(150.00));
        assert_eq!(totals.tax_amount, dec!(0.00));
        assert_eq!(totals.total, dec!(150.00));
    }

    #[test]
    fn exempt_flag_without_certificate_is_still_taxed() {
        let mut c = customer();
        c.tax_exempt = true;

        let totals = calculate_tax(&c, &[line(dec!(100.00), true)], None, Decimal::ZERO);
        assert_eq!(totals.tax_amount, dec!(9.75));
    }

    #[test]
    fn out_of_state_engine_sale_excluded_from_tax() {
        let mut c = customer();
        c.out_of_state = true;

        let totals = calculate_tax(&c, &[line(dec!(50.00), true)], None, dec!(5000.00));
        assert_eq!(totals.subtotal, dec!(5050.00));
        // round(50.00 * 0.0975, 2) = 4.88
        assert_eq!(totals.tax_amount, dec!(4.88));
        assert_eq!(totals.total, dec!(5054.88));
    }

    #[test]
    fn in_state_engine_sale_is_taxed() {
        let totals = calculate_tax(&customer(), &[line(dec!(50.00), true)], None, dec!(1000.00));
        assert_eq!(totals.subtotal, dec!(1050.00));
        assert_eq!(totals.tax_amount, (dec!(1050.00) * TAX_RATE).round_dp(2));
    }

    #[test]
    fn out_of_state_without_engine_sale_is_taxed_normally() {
        let mut c = customer();
        c.out_of_state = true;

        let totals = calculate_tax(&c, &[line(dec!(100.00), true)], None, Decimal::ZERO);
        assert_eq!(totals.tax_amount, dec!(9.75));
    }

    #[test]
    fn non_taxable_lines_stay_in_subtotal_only() {
        let totals = calculate_tax(
            &customer(),
            &[
                line(dec!(100.00), true),
                line(dec!(50.00), false),
                line(dec!(75.00), true),
            ],
            None,
            Decimal::ZERO,
        );
        assert_eq!(totals.subtotal, dec!(225.00));
        // taxable_amount 175.00 -> tax 17.06
        assert_eq!(totals.tax_amount, dec!(17.06));
        assert_eq!(totals.total, dec!(242.06));
    }

    #[test]
    fn payment_method_has_no_effect() {
        let charges = [line(dec!(100.00), true)];
        let cash = calculate_tax(&customer(), &charges, Some("Cash"), Decimal::ZERO);
        let card = calculate_tax(&customer(), &charges, Some("Credit Card"), Decimal::ZERO);
        let none = calculate_tax(&customer(), &charges, None, Decimal::ZERO);
        assert_eq!(cash, card);
        assert_eq!(cash, none);
    }

    #[test]
    fn empty_charges_total_zero() {
        let totals = calculate_tax(&customer(), &[], None, Decimal::ZERO);
        assert_eq!(totals, Totals::default());
    }
}
