//! # Money Module
//!
//! Provides the `Money` type for INR amounts, stored in paise.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  On an invoice that error is not cosmetic - GST is a legally exact      │
//! │  arithmetic specification and the tax authority checks the paisa.       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹10.00 = 1000 paise, every rounding step is explicit half-up         │
//! │    integer arithmetic on i128 intermediates.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vyapar_core::money::Money;
//!
//! let price = Money::from_paise(123_456_789);
//! assert_eq!(price.format(true), "₹12,34,567.89");
//!
//! let parsed = Money::parse("₹12,34,567.89").unwrap();
//! assert_eq!(parsed, price);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::error::MoneyError;

/// Default lower bound for transaction amounts: ₹1.00.
pub const MIN_TRANSACTION: Money = Money::from_paise(100);

/// Default upper bound for transaction amounts: ₹10,00,00,000.00 (ten crore).
pub const MAX_TRANSACTION: Money = Money::from_paise(10_000_000_000);

// =============================================================================
// Money Type
// =============================================================================

/// An INR amount in paise (the smallest currency unit, 1/100 rupee).
///
/// The scale is fixed at 2 fractional digits by construction, so the
/// minor-unit round-trip `Money::from_paise(m.paise()) == m` holds for every
/// value. Signed to allow refund deltas in arithmetic, but every transaction
/// entry point rejects negatives.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use vyapar_core::money::Money;
    ///
    /// let price = Money::from_paise(1099); // ₹10.99
    /// assert_eq!(price.paise(), 1099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees. Saturates at the ends of the
    /// paise range; a saturated value always fails [`Money::validate_range`],
    /// so it can never reach a transaction path looking plausible.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees.saturating_mul(100))
    }

    /// Returns the value in paise. Exact inverse of [`Money::from_paise`].
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paisa portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Formats the amount with Indian digit grouping: the rightmost three
    /// digits form one group, every group above that has two digits
    /// (lakhs and crores). Always renders exactly 2 fractional digits.
    ///
    /// ## Example
    /// ```rust
    /// use vyapar_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(100_000).format(true), "₹1,00,000.00");
    /// assert_eq!(Money::from_paise(123_456_789).format(false), "12,34,567.89");
    /// assert_eq!(Money::from_rupees(999).format(true), "₹999.00");
    /// ```
    pub fn format(&self, include_symbol: bool) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let symbol = if include_symbol { "₹" } else { "" };
        let grouped = group_indian(self.rupees().abs());
        format!("{sign}{symbol}{grouped}.{:02}", self.paise_part())
    }

    /// Parses a decimal INR string, tolerating the common prefixes and the
    /// Indian comma grouping.
    ///
    /// Accepted inputs include `₹1,23,456.78`, `Rs. 1,23,456.78`, `INR 500`
    /// and plain `123456.78`. Fails with [`MoneyError::Parse`] on non-numeric
    /// content and [`MoneyError::Precision`] on more than 2 fractional digits.
    ///
    /// ## Example
    /// ```rust
    /// use vyapar_core::money::Money;
    ///
    /// assert_eq!(Money::parse("Rs. 500").unwrap(), Money::from_rupees(500));
    /// assert!(Money::parse("1.999").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Money, MoneyError> {
        let cleaned = input
            .replace('₹', "")
            .replace("Rs.", "")
            .replace("INR", "")
            .replace("Rs", "")
            .replace(',', "")
            .split_whitespace()
            .collect::<String>();

        let parse_err = |reason: &str| MoneyError::Parse {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        if cleaned.is_empty() {
            return Err(parse_err("empty amount"));
        }
        if cleaned.starts_with('-') {
            return Err(parse_err("negative amounts are not supported"));
        }

        let (int_part, frac_part) = match cleaned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (cleaned.as_str(), ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(parse_err("no digits"));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(parse_err("not a decimal number"));
        }
        if frac_part.len() > 2 {
            return Err(MoneyError::Precision {
                input: input.to_string(),
            });
        }

        let rupees: i64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| parse_err("integer part out of range"))?
        };
        let mut paise: i64 = 0;
        if !frac_part.is_empty() {
            paise = frac_part
                .parse::<i64>()
                .map_err(|_| parse_err("fractional part out of range"))?;
            if frac_part.len() == 1 {
                paise *= 10;
            }
        }

        rupees
            .checked_mul(100)
            .and_then(|r| r.checked_add(paise))
            .map(Money)
            .ok_or_else(|| parse_err("amount out of range"))
    }

    /// Checks the amount against the given bounds, falling back to
    /// [`MIN_TRANSACTION`] / [`MAX_TRANSACTION`] when a bound is not supplied.
    ///
    /// ## Example
    /// ```rust
    /// use vyapar_core::money::Money;
    ///
    /// assert!(Money::from_rupees(50).validate_range(None, None).is_ok());
    /// assert!(Money::from_paise(50).validate_range(None, None).is_err()); // below ₹1.00
    /// ```
    pub fn validate_range(
        &self,
        min: Option<Money>,
        max: Option<Money>,
    ) -> Result<(), MoneyError> {
        let min = min.unwrap_or(MIN_TRANSACTION);
        let max = max.unwrap_or(MAX_TRANSACTION);
        if *self < min || *self > max {
            return Err(MoneyError::OutOfRange {
                amount: self.format(true),
                min: min.format(true),
                max: max.format(true),
            });
        }
        Ok(())
    }

    /// Multiplies by a quantity (line totals). Fails with
    /// [`MoneyError::Overflow`] when the product leaves the representable
    /// paise range; quantities are caller input, so this path must stay a
    /// typed error, never a wrap or a panic.
    pub fn multiply_quantity(&self, qty: i64) -> Result<Money, MoneyError> {
        self.0
            .checked_mul(qty)
            .map(Money)
            .ok_or_else(|| MoneyError::Overflow {
                amount: self.format(true),
                quantity: qty,
            })
    }
}

/// Divides `numerator` by `denominator` rounding half-up, on i128 to avoid
/// intermediate overflow. Only defined for non-negative numerators and
/// positive denominators, which is every rounding site in this crate.
pub(crate) fn div_half_up(numerator: i128, denominator: i128) -> i64 {
    debug_assert!(numerator >= 0 && denominator > 0);
    ((2 * numerator + denominator) / (2 * denominator)) as i64
}

fn group_indian(rupees: i64) -> String {
    let digits = rupees.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), last_three)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the symbol form used on receipts and invoices.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(true))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
