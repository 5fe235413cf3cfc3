//! Totals aggregation over ticket and estimate child records.
//!
//! Nothing here subscribes to change notifications: a mutation to parts,
//! labor, or line items does not trigger recomputation. The caller gathers
//! a snapshot, runs the aggregation, and writes the result back. Two
//! overlapping gather/compute/write cycles race, and the later write wins;
//! that is part of the store's contract and is covered by tests rather
//! than fixed.

use rust_decimal::Decimal;

use crate::customer::Customer;
use crate::estimate::EstimateLineItem;
use crate::tax::{calculate_tax, ChargeLine, Totals};

/// Snapshot of a ticket's billable child records, gathered by the caller
/// and handed to the aggregator. The aggregator never re-queries the store.
#[derive(Debug, Clone, Default)]
pub struct TicketCharges {
    pub parts: Vec<PartCharge>,
    pub labor: Vec<LaborCharge>,
    /// Sale price of a new engine sold on this ticket, if any.
    pub equipment_sale_price: Option<Decimal>,
}

/// One part usage, priced and carrying the catalog taxable flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartCharge {
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub taxable: bool,
}

/// One labor entry at its resolved rate. Labor is always taxable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaborCharge {
    pub hours: Decimal,
    pub rate: Decimal,
}

impl TicketCharges {
    /// Flatten to the ordered charge-line sequence the tax computation
    /// consumes: parts first, then labor.
    pub fn charge_lines(&self) -> Vec<ChargeLine> {
        let mut lines = Vec::with_capacity(self.parts.len() + self.labor.len());
        for part in &self.parts {
            lines.push(ChargeLine {
                amount: part.quantity * part.unit_price,
                taxable: part.taxable,
            });
        }
        for labor in &self.labor {
            lines.push(ChargeLine {
                amount: labor.hours * labor.rate,
                taxable: true,
            });
        }
        lines
    }
}

/// Ticket variant of the aggregation. Pure and idempotent: the same
/// snapshot always yields the same totals.
pub fn ticket_totals(
    customer: &Customer,
    charges: &TicketCharges,
    payment_method: Option<&str>,
) -> Totals {
    let lines = charges.charge_lines();
    calculate_tax(
        customer,
        &lines,
        payment_method,
        charges.equipment_sale_price.unwrap_or(Decimal::ZERO),
    )
}

/// Estimate variant: manually entered line items, always taxable, never an
/// equipment sale.
pub fn estimate_totals(customer: &Customer, line_items: &[EstimateLineItem]) -> Totals {
    let lines: Vec<ChargeLine> = line_items
        .iter()
        .map(|item| ChargeLine {
            amount: item.line_total,
            taxable: true,
        })
        .collect();
    calculate_tax(customer, &lines, None, Decimal::ZERO)
}
