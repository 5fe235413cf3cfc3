//! Customer records and tax standing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub u32);

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A shop customer.
///
/// The two tax attributes drive the billing rules: `tax_exempt` together
/// with a certificate on file zeroes all tax, and `out_of_state` exempts an
/// equipment sale from taxation while leaving other taxable items taxed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub tax_exempt: bool,
    #[serde(default)]
    pub tax_exempt_certificate: Option<String>,
    #[serde(default)]
    pub out_of_state: bool,
}

impl Customer {
    /// True when the exemption is effective: the flag is set AND a
    /// non-empty certificate is on file. A flag without a certificate does
    /// not exempt.
    pub fn has_exemption(&self) -> bool {
        self.tax_exempt
            && self
                .tax_exempt_certificate
                .as_deref()
                .is_some_and(|cert| !cert.trim().is_empty())
    }
}

/// Caller-supplied fields for creating or updating a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub tax_exempt: bool,
    #[serde(default)]
    pub tax_exempt_certificate: Option<String>,
    #[serde(default)]
    pub out_of_state: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(tax_exempt: bool, certificate: Option<&str>) -> Customer {
        Customer {
            id: CustomerId(1),
            name: "Thibodaux Charters".to_string(),
            phone: None,
            email: None,
            address: None,
            tax_exempt,
            tax_exempt_certificate: certificate.map(String::from),
            out_of_state: false,
        }
    }

    #[test]
    fn exemption_requires_flag_and_certificate() {
        assert!(customer(true, Some("TX1")).has_exemption());
        assert!(!customer(true, None).has_exemption());
        assert!(!customer(true, Some("")).has_exemption());
        assert!(!customer(true, Some("   ")).has_exemption());
        assert!(!customer(false, Some("TX1")).has_exemption());
    }
}
