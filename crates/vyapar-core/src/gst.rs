//! # GST Calculator
//!
//! Splits a transaction amount into CGST/SGST or IGST components.
//!
//! ## The Single Branch Point
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  origin == destination (or destination absent)                          │
//! │       │                                                                 │
//! │       ├── yes → intra-state:  CGST = SGST = tax / 2                     │
//! │       │         (an odd paisa goes to CGST - fixed tie-break)           │
//! │       │                                                                 │
//! │       └── no  → inter-state:  IGST = full tax                           │
//! │                                                                         │
//! │  Equality of CODES decides, never names. Exactly one of the two         │
//! │  component sets is non-zero whenever the rate is non-zero.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All rounding is half-up on integer paise; `total == base + tax` holds to
//! the paisa in both tax modes.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::GstError;
use crate::money::{div_half_up, Money};
use crate::states::StateCode;

// =============================================================================
// GST Rate
// =============================================================================

/// A GST rate in basis points (1800 = 18%).
///
/// ## Why Basis Points?
/// Integer basis points keep rate arithmetic exact; notified non-standard
/// rates such as 0.25% (gems) stay representable through the custom
/// constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GstRate(u32);

impl GstRate {
    pub const ZERO: GstRate = GstRate(0);
    pub const FIVE: GstRate = GstRate(500);
    pub const TWELVE: GstRate = GstRate(1200);
    pub const EIGHTEEN: GstRate = GstRate(1800);
    pub const TWENTY_EIGHT: GstRate = GstRate(2800);

    /// Creates a rate from a whole percentage in the standard GST set
    /// {0, 5, 12, 18, 28}. Anything else is [`GstError::UnsupportedRate`];
    /// callers that genuinely need a notified non-standard rate must opt in
    /// through [`GstRate::custom_bps`].
    ///
    /// ## Example
    /// ```rust
    /// use vyapar_core::gst::GstRate;
    ///
    /// assert_eq!(GstRate::standard(18).unwrap(), GstRate::EIGHTEEN);
    /// assert!(GstRate::standard(15).is_err());
    /// ```
    pub fn standard(percent: u32) -> Result<GstRate, GstError> {
        match percent {
            0 => Ok(Self::ZERO),
            5 => Ok(Self::FIVE),
            12 => Ok(Self::TWELVE),
            18 => Ok(Self::EIGHTEEN),
            28 => Ok(Self::TWENTY_EIGHT),
            _ => Err(GstError::UnsupportedRate { percent }),
        }
    }

    /// Explicit opt-in for rates outside the standard set, in basis points
    /// (25 = 0.25%). Rejects anything above 100%.
    pub fn custom_bps(basis_points: u32) -> Result<GstRate, GstError> {
        if basis_points > 10_000 {
            return Err(GstError::RateOutOfRange { basis_points });
        }
        Ok(GstRate(basis_points))
    }

    /// Maps a product category to its usual GST slab by keyword. A fallback
    /// for catalogs without proper tax classes; real deployments should
    /// carry the rate on the product.
    pub fn for_category(category: &str) -> GstRate {
        let category = category.to_lowercase();
        let has = |keywords: &[&str]| keywords.iter().any(|k| category.contains(k));

        if has(&["food", "grocery", "essential", "medicine", "health"]) {
            Self::FIVE
        } else if has(&["clothing", "fabric", "footwear", "books"]) {
            Self::TWELVE
        } else if has(&["luxury", "automobile", "electronics", "appliance"]) {
            Self::TWENTY_EIGHT
        } else {
            Self::EIGHTEEN
        }
    }

    /// The rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The rate as a percentage, for display only.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for GstRate {
    fn default() -> Self {
        GstRate::ZERO
    }
}

// =============================================================================
// Tax Mode
// =============================================================================

/// Whether the supplied amount already contains GST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    /// Amount is the pre-tax base; tax is added on top.
    Exclusive,
    /// Amount is the gross total; the base is extracted from it.
    Inclusive,
}

// =============================================================================
// Tax Split
// =============================================================================

/// Result of a GST calculation.
///
/// Exactly one of {cgst, sgst} / {igst} is non-zero when `rate > 0`, and
/// `total_amount == base_amount + total_tax` to the paisa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxSplit {
    pub base_amount: Money,
    pub rate: GstRate,
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
    pub total_tax: Money,
    pub total_amount: Money,
    pub inter_state: bool,
}

impl TaxSplit {
    /// An all-zero split (zero amount or zero rate).
    fn zeroed(base: Money, rate: GstRate, inter_state: bool) -> TaxSplit {
        TaxSplit {
            base_amount: base,
            rate,
            cgst: Money::zero(),
            sgst: Money::zero(),
            igst: Money::zero(),
            total_tax: Money::zero(),
            total_amount: base,
            inter_state,
        }
    }
}

// =============================================================================
// Calculation
// =============================================================================

/// Computes the GST split for `amount`.
///
/// An absent `destination`, or one equal to `origin`, makes the transaction
/// intra-state (CGST + SGST); a different code makes it inter-state (IGST).
///
/// In [`TaxMode::Exclusive`] the amount is the base:
/// `tax = half_up(amount × rate)`, `total = amount + tax`.
/// In [`TaxMode::Inclusive`] the amount is the gross total:
/// `base = half_up(amount / (1 + rate))`, `tax = amount − base`,
/// `total = amount` unchanged.
///
/// Zero rate and zero amount are valid and produce an all-zero split.
///
/// ## Example
/// ```rust
/// use vyapar_core::gst::{calculate, GstRate, TaxMode};
/// use vyapar_core::money::Money;
/// use vyapar_core::states::StateCode;
///
/// let split = calculate(
///     Money::from_rupees(1000),
///     GstRate::EIGHTEEN,
///     StateCode::parse("27").unwrap(),
///     Some(StateCode::parse("27").unwrap()),
///     TaxMode::Exclusive,
/// )
/// .unwrap();
/// assert_eq!(split.cgst, Money::from_rupees(90));
/// assert_eq!(split.sgst, Money::from_rupees(90));
/// assert_eq!(split.total_amount, Money::from_rupees(1180));
/// ```
pub fn calculate(
    amount: Money,
    rate: GstRate,
    origin: StateCode,
    destination: Option<StateCode>,
    mode: TaxMode,
) -> Result<TaxSplit, GstError> {
    if amount.is_negative() {
        return Err(GstError::NegativeAmount {
            amount: amount.format(true),
        });
    }

    let inter_state = destination.is_some_and(|d| d != origin);
    let bps = rate.bps() as i128;

    let (base, tax, total) = match mode {
        TaxMode::Exclusive => {
            let tax = div_half_up(amount.paise() as i128 * bps, 10_000);
            (amount, Money::from_paise(tax), amount + Money::from_paise(tax))
        }
        TaxMode::Inclusive => {
            let base = div_half_up(amount.paise() as i128 * 10_000, 10_000 + bps);
            (Money::from_paise(base), amount - Money::from_paise(base), amount)
        }
    };

    if tax.is_zero() {
        return Ok(TaxSplit::zeroed(base, rate, inter_state));
    }

    let (cgst, sgst, igst) = if inter_state {
        (Money::zero(), Money::zero(), tax)
    } else {
        // Floor half to SGST; the odd paisa, if any, goes to CGST.
        let sgst = Money::from_paise(tax.paise() / 2);
        (tax - sgst, sgst, Money::zero())
    };

    debug!(
        base = base.paise(),
        tax = tax.paise(),
        rate_bps = rate.bps(),
        inter_state,
        "computed GST split"
    );

    Ok(TaxSplit {
        base_amount: base,
        rate,
        cgst,
        sgst,
        igst,
        total_tax: tax,
        total_amount: total,
        inter_state,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state(code: &str) -> StateCode {
        StateCode::parse(code).unwrap()
    }

    #[test]
    fn test_intra_state_exclusive() {
        let split = calculate(
            Money::from_rupees(1000),
            GstRate::EIGHTEEN,
            state("27"),
            Some(state("27")),
            TaxMode::Exclusive,
        )
        .unwrap();

        assert_eq!(split.base_amount, Money::from_rupees(1000));
        assert_eq!(split.cgst, Money::from_rupees(90));
        assert_eq!(split.sgst, Money::from_rupees(90));
        assert_eq!(split.igst, Money::zero());
        assert_eq!(split.total_tax, Money::from_rupees(180));
        assert_eq!(split.total_amount, Money::from_rupees(1180));
        assert!(!split.inter_state);
    }

    #[test]
    fn test_inter_state_exclusive() {
        let split = calculate(
            Money::from_rupees(1000),
            GstRate::EIGHTEEN,
            state("27"),
            Some(state("07")),
            TaxMode::Exclusive,
        )
        .unwrap();

        assert_eq!(split.cgst, Money::zero());
        assert_eq!(split.sgst, Money::zero());
        assert_eq!(split.igst, Money::from_rupees(180));
        assert_eq!(split.total_amount, Money::from_rupees(1180));
        assert!(split.inter_state);
    }

    #[test]
    fn test_absent_destination_is_intra_state() {
        let split = calculate(
            Money::from_rupees(100),
            GstRate::FIVE,
            state("29"),
            None,
            TaxMode::Exclusive,
        )
        .unwrap();
        assert!(!split.inter_state);
        assert_eq!(split.cgst, Money::from_paise(250));
        assert_eq!(split.sgst, Money::from_paise(250));
    }

    #[test]
    fn test_inclusive_mode_recovers_base() {
        let split = calculate(
            Money::from_rupees(1180),
            GstRate::EIGHTEEN,
            state("27"),
            Some(state("27")),
            TaxMode::Inclusive,
        )
        .unwrap();

        assert_eq!(split.base_amount, Money::from_rupees(1000));
        assert_eq!(split.total_tax, Money::from_rupees(180));
        // inclusive mode never changes the gross total
        assert_eq!(split.total_amount, Money::from_rupees(1180));
    }

    #[test]
    fn test_odd_paisa_goes_to_cgst() {
        // ₹100.00 inclusive of 18%: base 84.75, tax 15.25 -> 1525 paise, odd
        let split = calculate(
            Money::from_rupees(100),
            GstRate::EIGHTEEN,
            state("27"),
            None,
            TaxMode::Inclusive,
        )
        .unwrap();

        assert_eq!(split.base_amount, Money::from_paise(8475));
        assert_eq!(split.total_tax, Money::from_paise(1525));
        assert_eq!(split.cgst, Money::from_paise(763));
        assert_eq!(split.sgst, Money::from_paise(762));
        assert_eq!(split.cgst + split.sgst, split.total_tax);
    }

    #[test]
    fn test_half_up_rounding() {
        // 333.33 × 18% = 59.9994 -> 60.00
        let split = calculate(
            Money::from_paise(33_333),
            GstRate::EIGHTEEN,
            state("27"),
            None,
            TaxMode::Exclusive,
        )
        .unwrap();
        assert_eq!(split.total_tax, Money::from_rupees(60));
        assert_eq!(split.cgst, Money::from_rupees(30));
        assert_eq!(split.sgst, Money::from_rupees(30));
    }

    #[test]
    fn test_zero_amount_and_zero_rate() {
        let zero_amount = calculate(
            Money::zero(),
            GstRate::EIGHTEEN,
            state("27"),
            None,
            TaxMode::Exclusive,
        )
        .unwrap();
        assert_eq!(zero_amount.total_amount, Money::zero());
        assert_eq!(zero_amount.total_tax, Money::zero());

        let zero_rate = calculate(
            Money::from_rupees(1000),
            GstRate::ZERO,
            state("27"),
            Some(state("07")),
            TaxMode::Inclusive,
        )
        .unwrap();
        assert_eq!(zero_rate.base_amount, Money::from_rupees(1000));
        assert_eq!(zero_rate.total_amount, Money::from_rupees(1000));
        assert_eq!(zero_rate.total_tax, Money::zero());
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let err = calculate(
            Money::from_paise(-100),
            GstRate::FIVE,
            state("27"),
            None,
            TaxMode::Exclusive,
        )
        .unwrap_err();
        assert!(matches!(err, GstError::NegativeAmount { .. }));
    }

    #[test]
    fn test_standard_rate_set() {
        for pct in [0, 5, 12, 18, 28] {
            assert!(GstRate::standard(pct).is_ok());
        }
        assert!(matches!(
            GstRate::standard(15),
            Err(GstError::UnsupportedRate { percent: 15 })
        ));
        assert!(GstRate::standard(3).is_err());
    }

    #[test]
    fn test_custom_rate_opt_in() {
        // 0.25% notified rate for rough gems
        let rate = GstRate::custom_bps(25).unwrap();
        assert_eq!(rate.bps(), 25);
        assert!(GstRate::custom_bps(10_001).is_err());

        let split = calculate(
            Money::from_rupees(10_000),
            rate,
            state("24"),
            Some(state("24")),
            TaxMode::Exclusive,
        )
        .unwrap();
        assert_eq!(split.total_tax, Money::from_rupees(25));
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(GstRate::for_category("Food Items"), GstRate::FIVE);
        assert_eq!(GstRate::for_category("Essential Medicines"), GstRate::FIVE);
        assert_eq!(GstRate::for_category("Clothing"), GstRate::TWELVE);
        assert_eq!(GstRate::for_category("Books"), GstRate::TWELVE);
        assert_eq!(GstRate::for_category("Luxury Items"), GstRate::TWENTY_EIGHT);
        assert_eq!(GstRate::for_category("General Merchandise"), GstRate::EIGHTEEN);
    }

    #[test]
    fn test_serializes_for_collaborators() {
        let split = calculate(
            Money::from_rupees(1000),
            GstRate::EIGHTEEN,
            state("27"),
            Some(state("07")),
            TaxMode::Exclusive,
        )
        .unwrap();
        let json = serde_json::to_value(&split).unwrap();
        assert_eq!(json["igst"], 18_000);
        assert_eq!(json["inter_state"], true);
    }

    proptest! {
        #[test]
        fn prop_total_is_base_plus_tax(
            paise in 0i64..=10_000_000_000,
            rate in prop::sample::select(vec![0u32, 5, 12, 18, 28]),
            origin in 1u8..=38,
            dest in 1u8..=38,
            inclusive in proptest::bool::ANY,
        ) {
            let origin = StateCode::from_value(origin).unwrap();
            let dest = StateCode::from_value(dest).unwrap();
            let mode = if inclusive { TaxMode::Inclusive } else { TaxMode::Exclusive };
            let split = calculate(
                Money::from_paise(paise),
                GstRate::standard(rate).unwrap(),
                origin,
                Some(dest),
                mode,
            ).unwrap();

            prop_assert_eq!(
                split.total_amount,
                split.base_amount + split.total_tax
            );
            prop_assert_eq!(
                split.total_tax,
                split.cgst + split.sgst + split.igst
            );
        }

        #[test]
        fn prop_components_are_mutually_exclusive(
            paise in 100i64..=10_000_000_000,
            rate in prop::sample::select(vec![5u32, 12, 18, 28]),
            origin in 1u8..=38,
            dest in 1u8..=38,
        ) {
            let origin = StateCode::from_value(origin).unwrap();
            let dest = StateCode::from_value(dest).unwrap();
            let split = calculate(
                Money::from_paise(paise),
                GstRate::standard(rate).unwrap(),
                origin,
                Some(dest),
                TaxMode::Exclusive,
            ).unwrap();

            if split.inter_state {
                prop_assert!(split.igst.paise() > 0);
                prop_assert!(split.cgst.is_zero() && split.sgst.is_zero());
            } else {
                prop_assert!(split.cgst.paise() > 0);
                prop_assert!(split.igst.is_zero());
                // CGST and SGST differ by at most the odd paisa
                prop_assert!((split.cgst - split.sgst).paise() <= 1);
            }
        }
    }
}
