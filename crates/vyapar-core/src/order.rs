//! # Order GST Aggregation
//!
//! Rolls per-line GST splits up into an order-level breakdown. Running sums
//! are kept in integer paise and in the given line order, so the result is
//! reproducible regardless of how callers computed the lines.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::GstError;
use crate::gst::{calculate, GstRate, TaxMode, TaxSplit};
use crate::money::Money;
use crate::states::StateCode;

/// One order line: its pre-tax base amount and the rate it attracts.
/// Mixed rates across lines are expected (a grocery order with an
/// electronics item carries both 5% and 28% lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLine {
    pub amount: Money,
    pub rate: GstRate,
}

/// Order-level GST breakdown with per-line splits and paisa-exact totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderGstBreakdown {
    pub lines: Vec<TaxSplit>,
    pub total_base: Money,
    pub total_cgst: Money,
    pub total_sgst: Money,
    pub total_igst: Money,
    pub total_tax: Money,
    pub total_amount: Money,
    pub inter_state: bool,
}

/// Computes a [`TaxSplit`] per line and sums the components.
///
/// Each sum runs in i64 paise over the lines in the order given; amounts are
/// materialized as [`Money`] only at the end, so no rounding drift can
/// accumulate across lines. An empty order yields an all-zero breakdown.
///
/// ## Example
/// ```rust
/// use vyapar_core::gst::GstRate;
/// use vyapar_core::money::Money;
/// use vyapar_core::order::{order_breakdown, OrderLine};
/// use vyapar_core::states::StateCode;
///
/// let lines = [
///     OrderLine { amount: Money::from_rupees(1000), rate: GstRate::EIGHTEEN },
///     OrderLine { amount: Money::from_rupees(500), rate: GstRate::FIVE },
/// ];
/// let breakdown = order_breakdown(
///     &lines,
///     StateCode::parse("27").unwrap(),
///     Some(StateCode::parse("07").unwrap()),
/// )
/// .unwrap();
/// assert_eq!(breakdown.total_igst, Money::from_rupees(205));
/// assert_eq!(breakdown.total_amount, Money::from_rupees(1705));
/// ```
pub fn order_breakdown(
    lines: &[OrderLine],
    origin: StateCode,
    destination: Option<StateCode>,
) -> Result<OrderGstBreakdown, GstError> {
    let mut splits = Vec::with_capacity(lines.len());
    let mut base: i64 = 0;
    let mut cgst: i64 = 0;
    let mut sgst: i64 = 0;
    let mut igst: i64 = 0;

    for line in lines {
        let split = calculate(line.amount, line.rate, origin, destination, TaxMode::Exclusive)?;
        base += split.base_amount.paise();
        cgst += split.cgst.paise();
        sgst += split.sgst.paise();
        igst += split.igst.paise();
        splits.push(split);
    }

    let tax = cgst + sgst + igst;
    Ok(OrderGstBreakdown {
        lines: splits,
        total_base: Money::from_paise(base),
        total_cgst: Money::from_paise(cgst),
        total_sgst: Money::from_paise(sgst),
        total_igst: Money::from_paise(igst),
        total_tax: Money::from_paise(tax),
        total_amount: Money::from_paise(base + tax),
        inter_state: destination.is_some_and(|d| d != origin),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
