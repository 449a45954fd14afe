//! # Address Validation
//!
//! PIN code checks and full Indian address normalization.
//!
//! Address validation collects every field error in one pass instead of
//! failing fast: the checkout caller shows the user a single complete
//! correction list.

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::error::{AddressError, ValidationError};
use crate::states::{code_for_name, StateCode};

/// The only country this engine prices for.
pub const COUNTRY_CODE: &str = "IN";

// =============================================================================
// PIN Code
// =============================================================================

/// Validates an Indian PIN code and returns the normalized 6-digit string.
///
/// Interior spaces and hyphens are stripped first ("110 001" and "110-001"
/// both normalize to "110001"). Non-numeric content, wrong length, and a
/// leading zero each fail with a distinct error.
///
/// ## Example
/// ```rust
/// use vyapar_core::address::validate_pincode;
///
/// assert_eq!(validate_pincode("110 001").unwrap(), "110001");
/// assert!(validate_pincode("012345").is_err()); // leading zero
/// ```
pub fn validate_pincode(pincode: &str) -> Result<String, ValidationError> {
    let normalized: String = pincode
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();

    if normalized.is_empty() {
        return Err(ValidationError::Required {
            field: "PIN code".to_string(),
        });
    }
    if !normalized.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::Charset {
            field: "PIN code".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }
    if normalized.len() != 6 {
        return Err(ValidationError::Length {
            field: "PIN code".to_string(),
            expected: 6,
            actual: normalized.len(),
        });
    }
    if normalized.starts_with('0') {
        return Err(ValidationError::LeadingZero);
    }

    Ok(normalized)
}

// =============================================================================
// Address
// =============================================================================

/// Raw address fields as received from the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddressInput {
    pub street_address_1: String,
    pub street_address_2: Option<String>,
    pub city: String,
    /// State name or two-digit code.
    pub state: String,
    pub pincode: String,
    /// ISO country code; must be "IN".
    pub country: String,
}

/// A normalized, validated Indian address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Address {
    pub street_address_1: String,
    pub street_address_2: Option<String>,
    pub city: String,
    pub state_code: StateCode,
    pub state_name: String,
    pub pincode: String,
    pub country: String,
}

/// Validates all address fields, aggregating every error found.
///
/// Requires street line 1, city, a resolvable state (name or code), a valid
/// PIN code, and country `"IN"`. The state field accepts anything
/// [`code_for_name`](crate::states::code_for_name) accepts, including
/// unambiguous name prefixes.
pub fn validate_address(input: &AddressInput) -> Result<Address, AddressError> {
    let mut errors = Vec::new();

    let street_address_1 = input.street_address_1.trim();
    if street_address_1.is_empty() {
        errors.push(ValidationError::Required {
            field: "street address".to_string(),
        });
    }

    let city = input.city.trim();
    if city.is_empty() {
        errors.push(ValidationError::Required {
            field: "city".to_string(),
        });
    }

    let state_code = match code_for_name(&input.state) {
        Ok(code) => Some(code),
        Err(source) => {
            errors.push(ValidationError::Lookup {
                field: "state".to_string(),
                source,
            });
            None
        }
    };

    let pincode = match validate_pincode(&input.pincode) {
        Ok(pin) => Some(pin),
        Err(err) => {
            errors.push(err);
            None
        }
    };

    if !input.country.trim().eq_ignore_ascii_case(COUNTRY_CODE) {
        errors.push(ValidationError::UnsupportedCountry {
            country: input.country.trim().to_string(),
        });
    }

    if !errors.is_empty() {
        warn!(count = errors.len(), "address validation failed");
        return Err(AddressError { errors });
    }

    let state_code = state_code.expect("present when no errors were collected");
    Ok(Address {
        street_address_1: street_address_1.to_string(),
        street_address_2: input
            .street_address_2
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
        city: city.to_string(),
        state_code,
        state_name: state_code.name().to_string(),
        pincode: pincode.expect("present when no errors were collected"),
        country: COUNTRY_CODE.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
