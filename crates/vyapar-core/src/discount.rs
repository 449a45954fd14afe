//! # Discount Engine
//!
//! Applies flat, percentage and quantity-tier discounts to tax-inclusive
//! amounts, recomputing the GST split on the discounted base.
//!
//! ## Discount Before Tax
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  original (gross, tax-inclusive)                                        │
//! │       │                                                                 │
//! │       ▼  recover pre-tax base (Inclusive calculation)                   │
//! │  base ──► apply discount to the BASE ──► discounted base                │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                 fresh GST split (Exclusive) on the discounted base      │
//! │                                                                         │
//! │  The tax authority receives tax on the true discounted value.           │
//! │  Discounting a previously computed tax figure directly is a             │
//! │  compliance violation, not a rounding nicety.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::DiscountError;
use crate::gst::{calculate, GstRate, TaxMode, TaxSplit};
use crate::money::{div_half_up, Money};
use crate::states::StateCode;

// =============================================================================
// Discount Types
// =============================================================================

/// A discount to apply to the pre-tax base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Discount {
    /// Fixed amount off the pre-tax base.
    Flat(Money),
    /// Percentage off the pre-tax base, in basis points (1000 = 10%).
    Percentage(u32),
}

/// A quantity tier: at least `min_quantity` items earns `discount_bps` off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountTier {
    pub min_quantity: i64,
    pub discount_bps: u32,
}

/// Breakdown of a single discount application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountResult {
    /// Split of the original gross amount.
    pub original: TaxSplit,
    /// The discount that was applied.
    pub discount: Discount,
    /// Amount removed from the pre-tax base.
    pub discount_on_base: Money,
    /// Fresh split computed on the discounted base.
    pub discounted: TaxSplit,
    /// Gross saving: original total minus discounted total.
    pub savings: Money,
    /// Saving as a share of the original gross, in basis points.
    pub savings_bps: u32,
}

/// Breakdown of a quantity-tier discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BulkDiscountResult {
    pub item_price: Money,
    pub quantity: i64,
    pub original_total: Money,
    /// The tier that matched, if any.
    pub applied_tier: Option<DiscountTier>,
    /// Full discount breakdown when a tier matched.
    pub discount: Option<DiscountResult>,
    pub final_total: Money,
    /// Effective per-item price after the discount, rounded half-up.
    pub final_per_item: Money,
}

// =============================================================================
// Operations
// =============================================================================

/// Applies a discount to a tax-inclusive amount.
///
/// The pre-tax base is recovered first, the discount lands on that base, and
/// the GST split is recomputed on the discounted base. A flat discount larger
/// than the recovered base and a percentage outside [0, 100] are rejected.
///
/// ## Example
/// ```rust
/// use vyapar_core::discount::{apply_discount, Discount};
/// use vyapar_core::gst::GstRate;
/// use vyapar_core::money::Money;
/// use vyapar_core::states::StateCode;
///
/// // ₹1,180 gross at 18%: base ₹1,000, 10% off -> base ₹900, total ₹1,062
/// let result = apply_discount(
///     Money::from_rupees(1180),
///     Discount::Percentage(1000),
///     GstRate::EIGHTEEN,
///     StateCode::parse("27").unwrap(),
///     None,
/// )
/// .unwrap();
/// assert_eq!(result.discounted.total_amount, Money::from_rupees(1062));
/// assert_eq!(result.savings, Money::from_rupees(118));
/// ```
pub fn apply_discount(
    original_amount: Money,
    discount: Discount,
    rate: GstRate,
    origin: StateCode,
    destination: Option<StateCode>,
) -> Result<DiscountResult, DiscountError> {
    original_amount.validate_range(None, None)?;

    let original = calculate(original_amount, rate, origin, destination, TaxMode::Inclusive)?;
    let base = original.base_amount;

    let discount_on_base = match discount {
        Discount::Percentage(bps) => {
            if bps > 10_000 {
                return Err(DiscountError::InvalidPercentage { basis_points: bps });
            }
            Money::from_paise(div_half_up(base.paise() as i128 * bps as i128, 10_000))
        }
        Discount::Flat(amount) => {
            amount.validate_range(Some(Money::zero()), None)?;
            if amount > base {
                return Err(DiscountError::ExceedsBase {
                    discount: amount.format(true),
                    base: base.format(true),
                });
            }
            amount
        }
    };

    let discounted_base = base - discount_on_base;
    let discounted = calculate(discounted_base, rate, origin, destination, TaxMode::Exclusive)?;

    let savings = original_amount - discounted.total_amount;
    let savings_bps = if savings.paise() > 0 && original_amount.paise() > 0 {
        div_half_up(savings.paise() as i128 * 10_000, original_amount.paise() as i128) as u32
    } else {
        0
    };

    debug!(
        original = original_amount.paise(),
        discounted_total = discounted.total_amount.paise(),
        savings = savings.paise(),
        "applied discount"
    );

    Ok(DiscountResult {
        original,
        discount,
        discount_on_base,
        discounted,
        savings,
        savings_bps,
    })
}

/// Applies a quantity-tier discount to `item_price × quantity`.
///
/// Tiers must be strictly increasing in `min_quantity`; the highest tier
/// whose `min_quantity` does not exceed `quantity` wins. Below every tier,
/// no discount applies and the result echoes the original totals.
pub fn apply_bulk_tier_discount(
    item_price: Money,
    quantity: i64,
    tiers: &[DiscountTier],
    rate: GstRate,
    origin: StateCode,
    destination: Option<StateCode>,
) -> Result<BulkDiscountResult, DiscountError> {
    if quantity <= 0 {
        return Err(DiscountError::InvalidQuantity { quantity });
    }
    item_price.validate_range(None, None)?;

    for pair in tiers.windows(2) {
        if pair[1].min_quantity <= pair[0].min_quantity {
            return Err(DiscountError::InvalidTiers {
                reason: format!(
                    "minimum quantities must be strictly increasing, got {} after {}",
                    pair[1].min_quantity, pair[0].min_quantity
                ),
            });
        }
    }

    let original_total = item_price.multiply_quantity(quantity)?;
    let applied_tier = tiers
        .iter()
        .rev()
        .find(|tier| tier.min_quantity <= quantity)
        .copied();

    let Some(tier) = applied_tier else {
        return Ok(BulkDiscountResult {
            item_price,
            quantity,
            original_total,
            applied_tier: None,
            discount: None,
            final_total: original_total,
            final_per_item: item_price,
        });
    };

    let result = apply_discount(
        original_total,
        Discount::Percentage(tier.discount_bps),
        rate,
        origin,
        destination,
    )?;
    let final_total = result.discounted.total_amount;
    let final_per_item =
        Money::from_paise(div_half_up(final_total.paise() as i128, quantity as i128));

    Ok(BulkDiscountResult {
        item_price,
        quantity,
        original_total,
        applied_tier: Some(tier),
        discount: Some(result),
        final_total,
        final_per_item,
    })
}

/// Threshold eligibility check. Richer coupon semantics (expiry, usage
/// limits, stacking) belong to the upstream policy layer, not this core.
pub fn validate_eligibility(
    order_amount: Money,
    min_order_value: Money,
) -> Result<(), DiscountError> {
    order_amount.validate_range(None, None)?;
    if order_amount < min_order_value {
        return Err(DiscountError::BelowMinimum {
            amount: order_amount.format(true),
            minimum: min_order_value.format(true),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MoneyError;
    use proptest::prelude::*;

    fn state(code: &str) -> StateCode {
        StateCode::parse(code).unwrap()
    }

    fn standard_tiers() -> Vec<DiscountTier> {
        vec![
            DiscountTier { min_quantity: 5, discount_bps: 500 },
            DiscountTier { min_quantity: 10, discount_bps: 1000 },
            DiscountTier { min_quantity: 25, discount_bps: 1500 },
            DiscountTier { min_quantity: 50, discount_bps: 2000 },
        ]
    }

    #[test]
    fn test_percentage_discount_recomputes_tax_on_discounted_base() {
        let result = apply_discount(
            Money::from_rupees(1180),
            Discount::Percentage(1000),
            GstRate::EIGHTEEN,
            state("27"),
            None,
        )
        .unwrap();

        assert_eq!(result.original.base_amount, Money::from_rupees(1000));
        assert_eq!(result.discount_on_base, Money::from_rupees(100));
        assert_eq!(result.discounted.base_amount, Money::from_rupees(900));
        assert_eq!(result.discounted.cgst, Money::from_rupees(81));
        assert_eq!(result.discounted.sgst, Money::from_rupees(81));
        assert_eq!(result.discounted.total_amount, Money::from_rupees(1062));
        assert_eq!(result.savings, Money::from_rupees(118));
        assert_eq!(result.savings_bps, 1000); // 10.00%
    }

    #[test]
    fn test_flat_discount_lands_on_the_base() {
        let result = apply_discount(
            Money::from_rupees(1180),
            Discount::Flat(Money::from_rupees(100)),
            GstRate::EIGHTEEN,
            state("27"),
            None,
        )
        .unwrap();

        assert_eq!(result.discount_on_base, Money::from_rupees(100));
        assert_eq!(result.discounted.base_amount, Money::from_rupees(900));
        assert_eq!(result.discounted.total_amount, Money::from_rupees(1062));
    }

    #[test]
    fn test_flat_discount_cannot_exceed_base() {
        let err = apply_discount(
            Money::from_rupees(1180),
            Discount::Flat(Money::from_paise(100_001)), // base is ₹1,000.00
            GstRate::EIGHTEEN,
            state("27"),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, DiscountError::ExceedsBase { .. }));

        // exactly the base is allowed and zeroes the invoice
        let result = apply_discount(
            Money::from_rupees(1180),
            Discount::Flat(Money::from_rupees(1000)),
            GstRate::EIGHTEEN,
            state("27"),
            None,
        )
        .unwrap();
        assert_eq!(result.discounted.total_amount, Money::zero());
        assert_eq!(result.savings, Money::from_rupees(1180));
    }

    #[test]
    fn test_percentage_out_of_range() {
        let err = apply_discount(
            Money::from_rupees(1180),
            Discount::Percentage(10_001),
            GstRate::EIGHTEEN,
            state("27"),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, DiscountError::InvalidPercentage { .. }));
    }

    #[test]
    fn test_discount_keeps_the_inter_state_branch() {
        let result = apply_discount(
            Money::from_rupees(1180),
            Discount::Percentage(1000),
            GstRate::EIGHTEEN,
            state("27"),
            Some(state("07")),
        )
        .unwrap();
        assert!(result.discounted.inter_state);
        assert_eq!(result.discounted.igst, Money::from_rupees(162));
        assert_eq!(result.discounted.cgst, Money::zero());
    }

    #[test]
    fn test_bulk_tier_selection() {
        // 15 items of ₹118: tier min_qty=10 (10%) applies
        let result = apply_bulk_tier_discount(
            Money::from_rupees(118),
            15,
            &standard_tiers(),
            GstRate::EIGHTEEN,
            state("27"),
            None,
        )
        .unwrap();

        let tier = result.applied_tier.unwrap();
        assert_eq!(tier.min_quantity, 10);
        assert_eq!(tier.discount_bps, 1000);
        assert_eq!(result.original_total, Money::from_rupees(1770));
        // base 1500 -> 1350 after 10%, +18% = 1593
        assert_eq!(result.final_total, Money::from_rupees(1593));
        assert_eq!(result.final_per_item, Money::from_paise(10_620));
        assert_eq!(result.discount.unwrap().savings, Money::from_rupees(177));
    }

    #[test]
    fn test_bulk_below_every_tier_echoes_original() {
        let result = apply_bulk_tier_discount(
            Money::from_rupees(118),
            3,
            &standard_tiers(),
            GstRate::EIGHTEEN,
            state("27"),
            None,
        )
        .unwrap();

        assert!(result.applied_tier.is_none());
        assert!(result.discount.is_none());
        assert_eq!(result.final_total, Money::from_rupees(354));
        assert_eq!(result.final_per_item, Money::from_rupees(118));
    }

    #[test]
    fn test_bulk_exact_tier_boundary() {
        let result = apply_bulk_tier_discount(
            Money::from_rupees(118),
            50,
            &standard_tiers(),
            GstRate::EIGHTEEN,
            state("27"),
            None,
        )
        .unwrap();
        assert_eq!(result.applied_tier.unwrap().discount_bps, 2000);
    }

    #[test]
    fn test_bulk_rejects_bad_quantity_and_tiers() {
        assert!(matches!(
            apply_bulk_tier_discount(
                Money::from_rupees(118),
                0,
                &standard_tiers(),
                GstRate::EIGHTEEN,
                state("27"),
                None,
            ),
            Err(DiscountError::InvalidQuantity { quantity: 0 })
        ));

        let unsorted = vec![
            DiscountTier { min_quantity: 10, discount_bps: 1000 },
            DiscountTier { min_quantity: 5, discount_bps: 500 },
        ];
        assert!(matches!(
            apply_bulk_tier_discount(
                Money::from_rupees(118),
                7,
                &unsorted,
                GstRate::EIGHTEEN,
                state("27"),
                None,
            ),
            Err(DiscountError::InvalidTiers { .. })
        ));
    }

    #[test]
    fn test_bulk_quantity_overflow_is_a_typed_error() {
        // structurally valid quantity whose line total leaves the paise range
        let err = apply_bulk_tier_discount(
            Money::from_rupees(1),
            i64::MAX / 100 + 1,
            &standard_tiers(),
            GstRate::EIGHTEEN,
            state("27"),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DiscountError::Money(MoneyError::Overflow { .. })
        ));
    }

    #[test]
    fn test_eligibility_threshold() {
        assert!(validate_eligibility(Money::from_rupees(500), Money::from_rupees(500)).is_ok());
        assert!(matches!(
            validate_eligibility(Money::from_rupees(499), Money::from_rupees(500)),
            Err(DiscountError::BelowMinimum { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_tier_discount_never_decreases_with_quantity(
            qty_low in 1i64..500,
            bump in 0i64..100,
        ) {
            let tiers = standard_tiers();
            let pct_at = |qty: i64| {
                apply_bulk_tier_discount(
                    Money::from_rupees(118),
                    qty,
                    &tiers,
                    GstRate::EIGHTEEN,
                    state("27"),
                    None,
                )
                .unwrap()
                .applied_tier
                .map_or(0, |t| t.discount_bps)
            };
            prop_assert!(pct_at(qty_low + bump) >= pct_at(qty_low));
        }

        #[test]
        fn prop_savings_match_the_totals(
            gross_rupees in 1i64..=100_000,
            pct_bps in 0u32..=10_000,
        ) {
            let gross = Money::from_rupees(gross_rupees);
            let result = apply_discount(
                gross,
                Discount::Percentage(pct_bps),
                GstRate::EIGHTEEN,
                state("27"),
                None,
            ).unwrap();
            prop_assert_eq!(
                result.savings,
                gross - result.discounted.total_amount
            );
            // tax is always recomputed from the discounted base
            prop_assert_eq!(
                result.discounted.total_amount,
                result.discounted.base_amount + result.discounted.total_tax
            );
        }
    }
}
