//! Customer engines and engine classification.

use serde::{Deserialize, Serialize};

use crate::boat::BoatId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineId(pub u32);

impl std::fmt::Display for EngineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of engine classes used to select a labor rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineClass {
    Outboard,
    Inboard,
    Sterndrive,
    Pwc,
}

impl EngineClass {
    /// Classify a free-text engine type label by case-insensitive substring
    /// match, in priority order. Returns `None` when nothing matches; the
    /// caller resolves through the rate fallback chain rather than failing.
    pub fn classify(type_label: &str) -> Option<EngineClass> {
        let label = type_label.to_lowercase();
        if label.contains("outboard") {
            Some(EngineClass::Outboard)
        } else if label.contains("inboard") {
            Some(EngineClass::Inboard)
        } else if label.contains("stern") {
            Some(EngineClass::Sterndrive)
        } else if label.contains("pwc") || label.contains("jetski") {
            Some(EngineClass::Pwc)
        } else {
            None
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            EngineClass::Outboard => "Outboard",
            EngineClass::Inboard => "Inboard",
            EngineClass::Sterndrive => "Sterndrive",
            EngineClass::Pwc => "PWC",
        }
    }
}

impl std::fmt::Display for EngineClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// An engine mounted on a customer's boat. `engine_type` is free text as
/// entered at the counter; classification happens at rate-resolution time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    pub id: EngineId,
    pub boat_id: BoatId,
    pub engine_type: String,
    #[serde(default)]
    pub hp: Option<i32>,
    #[serde(default)]
    pub serial_number: Option<String>,
    /// Only meaningful for sterndrives.
    #[serde(default)]
    pub outdrive: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_substring() {
        assert_eq!(
            EngineClass::classify("Outboard 115HP"),
            Some(EngineClass::Outboard)
        );
        assert_eq!(
            EngineClass::classify("inboard diesel"),
            Some(EngineClass::Inboard)
        );
        assert_eq!(
            EngineClass::classify("Sterndrive V8"),
            Some(EngineClass::Sterndrive)
        );
        assert_eq!(EngineClass::classify("stern drive"), Some(EngineClass::Sterndrive));
        assert_eq!(EngineClass::classify("PWC"), Some(EngineClass::Pwc));
        assert_eq!(EngineClass::classify("Jetski 900"), Some(EngineClass::Pwc));
    }

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(
            EngineClass::classify("OUTBOARD"),
            Some(EngineClass::Outboard)
        );
    }

    #[test]
    fn unknown_labels_are_unclassified() {
        assert_eq!(EngineClass::classify("Unknown Drive"), None);
        assert_eq!(EngineClass::classify(""), None);
    }
}
