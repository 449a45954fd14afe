//! # GSTIN Validation
//!
//! Structural and checksum validation for the 15-character GST taxpayer
//! identification number.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  2 7 A A P F U 0 9 3 9 F 1 Z V                                          │
//! │  └┬┘ └────────┬────────┘ │ │ │                                          │
//! │   │           │          │ │ └── checksum (mod-36 over chars 1-14)      │
//! │   │           │          │ └──── fixed literal 'Z'                      │
//! │   │           │          └────── entity code [1-9A-Z]                   │
//! │   │           └───────────────── PAN: 5 letters, 4 digits, 1 letter     │
//! │   └───────────────────────────── state code (registry membership)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::states::StateCode;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// =============================================================================
// Gstin Type
// =============================================================================

/// A validated GSTIN, stored normalized (trimmed, uppercase).
///
/// Only constructible through [`Gstin::parse`], so a held value is
/// structurally valid, checksum-correct and carries a registered state code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct Gstin(String);

impl Gstin {
    /// Validates and normalizes a GSTIN.
    ///
    /// Checks, in order: presence, length, per-position character classes
    /// (state digits, PAN shape, entity code, the 'Z' literal), state-code
    /// registry membership, and finally the checksum character. Input case
    /// is ignored.
    ///
    /// ## Example
    /// ```rust
    /// use vyapar_core::gstin::Gstin;
    ///
    /// let gstin = Gstin::parse("27aapfu0939f1zv").unwrap();
    /// assert_eq!(gstin.as_str(), "27AAPFU0939F1ZV");
    /// assert_eq!(gstin.state_code().name(), "Maharashtra");
    /// ```
    pub fn parse(input: &str) -> Result<Gstin, ValidationError> {
        let gstin = input.trim().to_uppercase();

        if gstin.is_empty() {
            return Err(fail(ValidationError::Required {
                field: "GSTIN".to_string(),
            }));
        }
        let charset = |reason: &str| {
            fail(ValidationError::Charset {
                field: "GSTIN".to_string(),
                reason: reason.to_string(),
            })
        };
        if !gstin.is_ascii() {
            return Err(charset("must contain only ASCII letters and digits"));
        }
        if gstin.len() != 15 {
            return Err(fail(ValidationError::Length {
                field: "GSTIN".to_string(),
                expected: 15,
                actual: gstin.chars().count(),
            }));
        }

        let bytes = gstin.as_bytes();

        if !bytes[..2].iter().all(u8::is_ascii_digit) {
            return Err(charset("first 2 characters must be the numeric state code"));
        }
        if !bytes[2..7].iter().all(u8::is_ascii_uppercase) {
            return Err(charset("characters 3-7 must be letters (PAN holder name)"));
        }
        if !bytes[7..11].iter().all(u8::is_ascii_digit) {
            return Err(charset("characters 8-11 must be digits (PAN serial)"));
        }
        if !bytes[11].is_ascii_uppercase() {
            return Err(charset("character 12 must be a letter (PAN check)"));
        }
        if !(bytes[12].is_ascii_uppercase() || (b'1'..=b'9').contains(&bytes[12])) {
            return Err(charset("character 13 must be an entity code (1-9 or A-Z)"));
        }
        if bytes[13] != b'Z' {
            return Err(charset("character 14 must be the literal 'Z'"));
        }
        if !(bytes[14].is_ascii_uppercase() || bytes[14].is_ascii_digit()) {
            return Err(charset("character 15 must be an alphanumeric checksum"));
        }

        let state_code = StateCode::parse(&gstin[..2]).map_err(|source| {
            fail(ValidationError::Lookup {
                field: "GSTIN state code".to_string(),
                source,
            })
        })?;
        debug_assert_eq!(state_code.to_string(), &gstin[..2]);

        let expected = Self::checksum_char(&gstin[..14]);
        let found = bytes[14] as char;
        if expected != found {
            return Err(fail(ValidationError::Checksum { expected, found }));
        }

        Ok(Gstin(gstin))
    }

    /// Computes the checksum character for a 14-character GSTIN prefix.
    ///
    /// The official algorithm: map each character through the 36-symbol
    /// alphabet, double the value of every second character (the 2nd, 4th,
    /// ... in reading order), fold each product as quotient-plus-remainder
    /// mod 36, sum, and take `(36 - sum % 36) % 36` back through the
    /// alphabet.
    ///
    /// Callers must pass 14 characters drawn from `0-9A-Z`; [`Gstin::parse`]
    /// guarantees this on its own path, and anything else trips a debug
    /// assertion rather than producing a plausible-looking wrong character.
    pub fn checksum_char(prefix: &str) -> char {
        debug_assert_eq!(prefix.len(), 14);
        debug_assert!(
            prefix.bytes().all(|b| ALPHABET.contains(&b)),
            "checksum input must be drawn from 0-9A-Z"
        );
        let mut sum: u32 = 0;
        for (i, byte) in prefix.bytes().enumerate() {
            let value = ALPHABET
                .iter()
                .position(|&a| a == byte)
                .unwrap_or_default() as u32;
            let weighted = if i % 2 == 1 { value * 2 } else { value };
            sum += weighted / 36 + weighted % 36;
        }
        ALPHABET[((36 - sum % 36) % 36) as usize] as char
    }

    /// The normalized 15-character identifier.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extracts the jurisdiction code (first two characters). Infallible:
    /// registry membership was checked at parse time.
    pub fn state_code(&self) -> StateCode {
        StateCode::parse(&self.0[..2]).expect("validated at construction")
    }
}

impl fmt::Display for Gstin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn fail(err: ValidationError) -> ValidationError {
    warn!(error = %err, "GSTIN validation failed");
    err
}

// =============================================================================
// Unit Tests
// =============================================================================
