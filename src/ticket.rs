//! Repair tickets and their child records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::boat::BoatId;
use crate::customer::CustomerId;
use crate::engine::EngineId;
use crate::error::{Result, ShopError};
use crate::mechanic::MechanicId;
use crate::parts::PartId;
use crate::tax::Totals;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub u32);

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticket lifecycle states.
///
/// Any state may move to any other state; no legality check is performed.
/// Moving to `Closed` stamps the closed date. An earlier evolution of the
/// app used only {Open, In Progress, Closed}; those labels still parse for
/// migration, with "In Progress" mapping to `Working`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    Working,
    AwaitingParts,
    AwaitingCustomer,
    AwaitingPayment,
    AwaitingPickup,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 7] = [
        TicketStatus::Open,
        TicketStatus::Working,
        TicketStatus::AwaitingParts,
        TicketStatus::AwaitingCustomer,
        TicketStatus::AwaitingPayment,
        TicketStatus::AwaitingPickup,
        TicketStatus::Closed,
    ];

    pub fn display(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::Working => "Working",
            TicketStatus::AwaitingParts => "Awaiting Parts",
            TicketStatus::AwaitingCustomer => "Awaiting Customer",
            TicketStatus::AwaitingPayment => "Awaiting Payment",
            TicketStatus::AwaitingPickup => "Awaiting Pickup",
            TicketStatus::Closed => "Closed",
        }
    }

    /// Parse a status label. Canonical labels and the legacy three-state
    /// set are both accepted; anything else is an invalid argument.
    pub fn parse(label: &str) -> Result<TicketStatus> {
        match label.trim() {
            "Open" => Ok(TicketStatus::Open),
            "Working" | "In Progress" => Ok(TicketStatus::Working),
            "Awaiting Parts" => Ok(TicketStatus::AwaitingParts),
            "Awaiting Customer" => Ok(TicketStatus::AwaitingCustomer),
            "Awaiting Payment" => Ok(TicketStatus::AwaitingPayment),
            "Awaiting Pickup" => Ok(TicketStatus::AwaitingPickup),
            "Closed" => Ok(TicketStatus::Closed),
            other => Err(ShopError::invalid(format!("invalid ticket status: {other}"))),
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A part attached to a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartUsage {
    pub part_id: PartId,
    pub quantity: Decimal,
    /// Unit price captured when the part was attached: an explicit override
    /// if one was given, the catalog price otherwise.
    pub unit_price: Decimal,
}

/// A labor entry on a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborEntry {
    pub mechanic_id: MechanicId,
    pub hours: Decimal,
    #[serde(default)]
    pub work_description: Option<String>,
    /// Resolved through the rate chain when the entry is created; never
    /// re-derived afterwards, even if the rate table changes.
    pub rate: Decimal,
}

impl LaborEntry {
    pub fn line_total(&self) -> Decimal {
        self.hours * self.rate
    }
}

/// A repair ticket. Totals start at zero and are replaced wholesale by each
/// aggregator run; nothing recomputes them automatically when child records
/// change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub customer_id: CustomerId,
    pub boat_id: BoatId,
    #[serde(default)]
    pub engine_id: Option<EngineId>,
    #[serde(default)]
    pub description: Option<String>,
    pub date_opened: NaiveDate,
    pub status: TicketStatus,
    #[serde(default)]
    pub date_closed: Option<NaiveDate>,
    #[serde(default)]
    pub totals: Totals,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub parts: Vec<PartUsage>,
    #[serde(default)]
    pub labor: Vec<LaborEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn canonical_labels_round_trip() {
        for status in TicketStatus::ALL {
            assert_eq!(TicketStatus::parse(status.display()).unwrap(), status);
        }
    }

    #[test]
    fn legacy_in_progress_maps_to_working() {
        assert_eq!(
            TicketStatus::parse("In Progress").unwrap(),
            TicketStatus::Working
        );
    }

    #[test]
    fn unknown_label_is_invalid() {
        assert!(TicketStatus::parse("Waiting On Paint").is_err());
    }

    #[test]
    fn labor_line_total() {
        let entry = LaborEntry {
            mechanic_id: MechanicId(1),
            hours: dec!(2.5),
            work_description: None,
            rate: dec!(100.00),
        };
        assert_eq!(entry.line_total(), dec!(250.00));
    }
}
