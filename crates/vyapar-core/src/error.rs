//! # Error Types
//!
//! Domain-specific error types for vyapar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError (aggregate, for callers that want a single type)            │
//! │  ├── MoneyError       - parse / precision / range failures             │
//! │  ├── ValidationError  - GSTIN, PIN code, address field failures        │
//! │  ├── LookupError      - jurisdiction name/code resolution              │
//! │  ├── GstError         - rate set and calculation preconditions         │
//! │  ├── DiscountError    - discount-engine preconditions                  │
//! │  └── AddressError     - aggregated ValidationErrors for one address    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the offending value, the expectation)
//! 3. Errors are enum variants, never bare Strings
//! 4. Every failure is a recoverable, caller-facing value; nothing panics

use thiserror::Error;

// =============================================================================
// Money Error
// =============================================================================

/// Failures of monetary parsing, precision and range checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Input could not be parsed as a decimal amount.
    #[error("cannot parse amount '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Input carries more than 2 fractional digits; the paisa scale cannot
    /// represent it without silent loss, so the caller must round explicitly.
    #[error("amount '{input}' has more than 2 decimal places")]
    Precision { input: String },

    /// Amount is outside the configured bounds.
    #[error("amount {amount} is outside the allowed range {min} to {max}")]
    OutOfRange {
        amount: String,
        min: String,
        max: String,
    },

    /// Multiplication left the representable paise range.
    #[error("amount {amount} times {quantity} overflows")]
    Overflow { amount: String, quantity: i64 },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Structural validation failures for identifiers and address fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value has the wrong length.
    #[error("{field} must be {expected} characters long, got {actual}")]
    Length {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// Value contains characters outside the allowed set for its position.
    #[error("{field} has invalid format: {reason}")]
    Charset { field: String, reason: String },

    /// GSTIN checksum character does not match the recomputed value.
    #[error("GSTIN checksum mismatch: expected '{expected}', found '{found}'")]
    Checksum { expected: char, found: char },

    /// PIN codes cannot start with 0 (region digit is 1-9).
    #[error("PIN code cannot start with 0")]
    LeadingZero,

    /// Country other than India in an Indian address.
    #[error("country must be IN for an Indian address, got '{country}'")]
    UnsupportedCountry { country: String },

    /// Jurisdiction lookup failed while validating a field.
    #[error("{field}: {source}")]
    Lookup {
        field: String,
        source: LookupError,
    },
}

// =============================================================================
// Lookup Error
// =============================================================================

/// Jurisdiction registry resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Two-digit code not in the published state-code set.
    #[error("unknown state code '{code}'")]
    UnknownCode { code: String },

    /// Name matched no registered state, exactly or by prefix.
    #[error("unknown state name '{name}'")]
    UnknownName { name: String },

    /// Prefix matched more than one registered state.
    #[error("state name '{name}' is ambiguous, matches: {}", candidates.join(", "))]
    AmbiguousName {
        name: String,
        candidates: Vec<String>,
    },
}

// =============================================================================
// GST Error
// =============================================================================

/// GST calculation precondition failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GstError {
    /// Rate is not in the standard set and the caller did not opt into a
    /// custom rate.
    #[error("unsupported GST rate {percent}%, standard rates are 0, 5, 12, 18 and 28")]
    UnsupportedRate { percent: u32 },

    /// Custom rate outside 0%..=100%.
    #[error("GST rate must be between 0 and 100 percent, got {basis_points} bps")]
    RateOutOfRange { basis_points: u32 },

    /// Transaction amounts are never negative.
    #[error("amount cannot be negative: {amount}")]
    NegativeAmount { amount: String },
}

// =============================================================================
// Discount Error
// =============================================================================

/// Discount-engine precondition failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscountError {
    /// Percentage discount outside [0, 100].
    #[error("discount percentage must be between 0 and 100, got {basis_points} bps")]
    InvalidPercentage { basis_points: u32 },

    /// Flat discount larger than the recovered pre-tax base.
    #[error("flat discount {discount} exceeds the pre-tax base {base}")]
    ExceedsBase { discount: String, base: String },

    /// Tier table is not strictly increasing in minimum quantity.
    #[error("invalid discount tiers: {reason}")]
    InvalidTiers { reason: String },

    /// Quantity must be positive.
    #[error("quantity must be positive, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// Order total below the minimum required for the discount.
    #[error("order amount {amount} is below the minimum {minimum} for this discount")]
    BelowMinimum { amount: String, minimum: String },

    /// Amount validation failed before the discount could be applied.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// GST recalculation failed.
    #[error(transparent)]
    Gst(#[from] GstError),
}

// =============================================================================
// Address Error
// =============================================================================

/// Every field error found while validating one address.
///
/// Address validation collects ALL problems in one pass so the caller can show
/// a complete correction list, instead of failing on the first field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid address: {}", errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct AddressError {
    pub errors: Vec<ValidationError>,
}

// =============================================================================
// Core Error
// =============================================================================

/// Aggregate error for callers that route everything through one type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Gst(#[from] GstError),

    #[error(transparent)]
    Discount(#[from] DiscountError),

    #[error(transparent)]
    Address(#[from] AddressError),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
