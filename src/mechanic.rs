//! Mechanic records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MechanicId(pub u32);

impl std::fmt::Display for MechanicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mechanic on staff. The stored hourly rate is a fallback in labor-rate
/// resolution, used only when the engine on the ticket cannot be classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mechanic {
    pub id: MechanicId,
    pub name: String,
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}

/// Caller-supplied fields for creating a mechanic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MechanicDraft {
    pub name: String,
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}
