//! Boat records.

use serde::{Deserialize, Serialize};

use crate::customer::CustomerId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoatId(pub u32);

impl std::fmt::Display for BoatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer's boat. Tickets and estimates reference boats for display;
/// the billing rules themselves only care about the engine mounted on one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boat {
    pub id: BoatId,
    pub customer_id: CustomerId,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub year: Option<i32>,
}

impl Boat {
    /// "Make Model" label used on invoices.
    pub fn label(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}
