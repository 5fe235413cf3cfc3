//! Input validation for record creation.

use rust_decimal::Decimal;

use crate::error::{Result, ShopError};

/// Normalize a phone number to `(555)123-4567` form.
///
/// Empty input is accepted and returned unchanged; otherwise the input must
/// contain exactly ten digits once punctuation is stripped.
pub fn normalize_phone(phone: &str) -> Result<String> {
    if phone.trim().is_empty() {
        return Ok(String::new());
    }
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 10 {
        return Err(ShopError::invalid(
            "phone number must be 10 digits (e.g. 555-123-4567)",
        ));
    }
    Ok(format!(
        "({}){}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..10]
    ))
}

/// Shape-check an email address. Empty input is accepted.
pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Ok(());
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ShopError::invalid(format!("invalid email format: {email}")))
    }
}

/// Serial numbers are required and restricted to letters, digits, dash and
/// underscore.
pub fn validate_serial(serial: &str) -> Result<()> {
    let serial = serial.trim();
    if serial.is_empty() {
        return Err(ShopError::invalid("serial number is required"));
    }
    if serial
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(())
    } else {
        Err(ShopError::invalid(format!(
            "serial number may only contain letters, numbers, dashes and underscores: {serial}"
        )))
    }
}

pub fn require_positive(value: Decimal, field: &str) -> Result<()> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(ShopError::invalid(format!("{field} must be greater than zero")))
    }
}

pub fn require_non_negative(value: Decimal, field: &str) -> Result<()> {
    if value < Decimal::ZERO {
        Err(ShopError::invalid(format!("{field} cannot be negative")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn phone_normalized_to_standard_form() {
        assert_eq!(normalize_phone("555-123-4567").unwrap(), "(555)123-4567");
        assert_eq!(normalize_phone("(555) 123 4567").unwrap(), "(555)123-4567");
        assert_eq!(normalize_phone("5551234567").unwrap(), "(555)123-4567");
    }

    #[test]
    fn empty_phone_is_accepted() {
        assert_eq!(normalize_phone("").unwrap(), "");
        assert_eq!(normalize_phone("   ").unwrap(), "");
    }

    #[test]
    fn short_phone_rejected() {
        assert!(normalize_phone("12345").is_err());
        assert!(normalize_phone("555-123-45678").is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("").is_ok());
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("user@nodot").is_err());
    }

    #[test]
    fn serial_charset() {
        assert!(validate_serial("TOH-2024_001").is_ok());
        assert!(validate_serial("").is_err());
        assert!(validate_serial("bad serial!").is_err());
    }

    #[test]
    fn positive_and_non_negative() {
        assert!(require_positive(dec!(0.5), "hours").is_ok());
        assert!(require_positive(Decimal::ZERO, "hours").is_err());
        assert!(require_positive(dec!(-1), "hours").is_err());
        assert!(require_non_negative(Decimal::ZERO, "price").is_ok());
        assert!(require_non_negative(dec!(-0.01), "price").is_err());
    }
}
