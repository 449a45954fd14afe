//! # Jurisdiction Registry
//!
//! The published GST state-code table (codes 01-38) and its lookup
//! operations. The table is a process-wide constant: built into the binary,
//! never mutated, safe to query from any number of threads.
//!
//! Code ↔ name is a total bijection over the registered set. The pre-2014
//! Andhra Pradesh entry (code 28) is named distinctly from the post-division
//! entry (code 37) to keep the name → code direction total.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::LookupError;

/// The published state/union-territory code table. Codes are assigned by the
/// GST authority; this set is fixed, not re-derived at runtime.
const STATES: &[(u8, &str)] = &[
    (1, "Jammu and Kashmir"),
    (2, "Himachal Pradesh"),
    (3, "Punjab"),
    (4, "Chandigarh"),
    (5, "Uttarakhand"),
    (6, "Haryana"),
    (7, "Delhi"),
    (8, "Rajasthan"),
    (9, "Uttar Pradesh"),
    (10, "Bihar"),
    (11, "Sikkim"),
    (12, "Arunachal Pradesh"),
    (13, "Nagaland"),
    (14, "Manipur"),
    (15, "Mizoram"),
    (16, "Tripura"),
    (17, "Meghalaya"),
    (18, "Assam"),
    (19, "West Bengal"),
    (20, "Jharkhand"),
    (21, "Odisha"),
    (22, "Chhattisgarh"),
    (23, "Madhya Pradesh"),
    (24, "Gujarat"),
    (25, "Daman and Diu"),
    (26, "Dadra and Nagar Haveli"),
    (27, "Maharashtra"),
    (28, "Andhra Pradesh (Before Division)"),
    (29, "Karnataka"),
    (30, "Goa"),
    (31, "Lakshadweep"),
    (32, "Kerala"),
    (33, "Tamil Nadu"),
    (34, "Puducherry"),
    (35, "Andaman and Nicobar Islands"),
    (36, "Telangana"),
    (37, "Andhra Pradesh"),
    (38, "Ladakh"),
];

// =============================================================================
// State Code
// =============================================================================

/// A two-digit GST jurisdiction code.
///
/// Only constructible through the registry, so holding a `StateCode` is proof
/// of membership in the published set. Equality of codes (not names) is the
/// single branch point deciding CGST/SGST versus IGST.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct StateCode(u8);

impl StateCode {
    /// Parses a two-digit code string and checks registry membership.
    ///
    /// ## Example
    /// ```rust
    /// use vyapar_core::states::StateCode;
    ///
    /// let maharashtra = StateCode::parse("27").unwrap();
    /// assert_eq!(maharashtra.to_string(), "27");
    /// assert!(StateCode::parse("99").is_err());
    /// ```
    pub fn parse(code: &str) -> Result<StateCode, LookupError> {
        let code = code.trim();
        let unknown = || LookupError::UnknownCode {
            code: code.to_string(),
        };
        if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unknown());
        }
        let value: u8 = code.parse().map_err(|_| unknown())?;
        StateCode::from_value(value).ok_or_else(unknown)
    }

    /// Looks up a registered code by numeric value.
    pub fn from_value(value: u8) -> Option<StateCode> {
        STATES
            .iter()
            .any(|(code, _)| *code == value)
            .then_some(StateCode(value))
    }

    /// The numeric code value.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Canonical state/union-territory name for this code.
    pub fn name(&self) -> &'static str {
        // Registry membership is guaranteed at construction.
        STATES
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, name)| *name)
            .unwrap_or("")
    }
}

/// Renders zero-padded, the wire form used in GSTINs ("07", "27").
impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Canonical name for a registered code.
pub fn name_for_code(code: &str) -> Result<&'static str, LookupError> {
    Ok(StateCode::parse(code)?.name())
}

/// Resolves a state name (or two-digit code) to its registered code.
///
/// Matching order: a two-digit numeric input is treated as a code;
/// otherwise a case-insensitive exact name match is tried first, then an
/// unambiguous case-insensitive prefix match.
///
/// ## Example
/// ```rust
/// use vyapar_core::states::code_for_name;
///
/// assert_eq!(code_for_name("Maharashtra").unwrap().to_string(), "27");
/// assert_eq!(code_for_name("maha").unwrap().to_string(), "27");
/// assert!(code_for_name("Andhra").is_err()); // two candidates
/// ```
pub fn code_for_name(name: &str) -> Result<StateCode, LookupError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LookupError::UnknownName {
            name: name.to_string(),
        });
    }

    if name.len() == 2 && name.bytes().all(|b| b.is_ascii_digit()) {
        return StateCode::parse(name);
    }

    let needle = name.to_lowercase();
    for (code, state_name) in STATES {
        if state_name.to_lowercase() == needle {
            return Ok(StateCode(*code));
        }
    }

    let matches: Vec<&(u8, &str)> = STATES
        .iter()
        .filter(|(_, state_name)| state_name.to_lowercase().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [] => Err(LookupError::UnknownName {
            name: name.to_string(),
        }),
        [(code, _)] => Ok(StateCode(*code)),
        many => Err(LookupError::AmbiguousName {
            name: name.to_string(),
            candidates: many.iter().map(|(_, n)| n.to_string()).collect(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
