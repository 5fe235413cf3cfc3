//! Payments against tickets and balance computation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ticket::TicketId;

/// A payment recorded against a ticket. Payments are append-only: created
/// once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub ticket_id: TicketId,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Balance still owed: the persisted total (zero if totals were never
/// computed) minus everything paid so far, rounded to 2 places. Goes
/// negative on overpayment; overpayment is not rejected.
pub fn balance_due<'a, I>(total: Decimal, payments: I) -> Decimal
where
    I: IntoIterator<Item = &'a Payment>,
{
    let paid: Decimal = payments.into_iter().map(|payment| payment.amount).sum();
    (total - paid).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payment(amount: Decimal) -> Payment {
        Payment {
            ticket_id: TicketId(1),
            amount,
            date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            method: Some("Cash".to_string()),
            notes: None,
        }
    }

    #[test]
    fn balance_decreases_by_each_payment() {
        let payments = vec![payment(dec!(100.00)), payment(dec!(50.00))];
        assert_eq!(balance_due(dec!(242.06), &payments), dec!(92.06));
    }

    #[test]
    fn balance_may_go_negative() {
        let payments = vec![payment(dec!(300.00))];
        assert_eq!(balance_due(dec!(242.06), &payments), dec!(-57.94));
    }

    #[test]
    fn no_payments_means_full_total_due() {
        let none: Vec<Payment> = Vec::new();
        assert_eq!(balance_due(dec!(242.06), &none), dec!(242.06));
        assert_eq!(balance_due(Decimal::ZERO, &none), Decimal::ZERO);
    }
}
