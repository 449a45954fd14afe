//! # vyapar-core: Pure GST Compliance Logic for Vyapar
//!
//! This crate is the **heart** of the Vyapar commerce stack. It encodes
//! India's GST arithmetic and validation rules as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vyapar Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │         Checkout / Orders / Payment Gateway (other crates)      │   │
//! │  │    raw amounts, GSTINs, addresses ──► structured results        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vyapar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ │   │
//! │  │   │  money  │ │ states  │ │  gstin  │ │   gst   │ │ discount │ │   │
//! │  │   │  Money  │ │StateCode│ │  Gstin  │ │TaxSplit │ │  tiers   │ │   │
//! │  │   │ ₹ paise │ │ address │ │checksum │ │CGST/SGST│ │ savings  │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ │  IGST   │ └──────────┘ │   │
//! │  │                                       └─────────┘  ┌─────────┐ │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE         │  order  │ │   │
//! │  │   FUNCTIONS                                        │ rollup  │ │   │
//! │  │                                                    └─────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - INR amounts in integer paise, Indian-grouping formatter
//! - [`states`] - the published state-code table and lookups
//! - [`address`] - PIN code and address validation
//! - [`gstin`] - GSTIN structural + checksum validation
//! - [`gst`] - CGST/SGST/IGST splitting in both tax modes
//! - [`discount`] - flat/percentage/tier discounts with tax recalculation
//! - [`order`] - order-level aggregation across mixed-rate lines
//! - [`error`] - the typed error taxonomy
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every operation is deterministic; the only shared
//!    data is the read-only state table, so calls run concurrently with no
//!    coordination
//! 2. **No I/O**: database, network and file access are FORBIDDEN here
//! 3. **Integer Money**: all amounts are paise (i64); rounding is explicit
//!    half-up integer arithmetic, never binary floating point
//! 4. **Explicit Errors**: every failure is a typed value; no panics, no
//!    silent fallbacks, no approximate results
//!
//! ## Example Usage
//!
//! ```rust
//! use vyapar_core::gst::{calculate, GstRate, TaxMode};
//! use vyapar_core::money::Money;
//! use vyapar_core::states::StateCode;
//!
//! let origin = StateCode::parse("27").unwrap(); // Maharashtra
//! let destination = StateCode::parse("07").unwrap(); // Delhi
//!
//! let split = calculate(
//!     Money::from_rupees(1000),
//!     GstRate::EIGHTEEN,
//!     origin,
//!     Some(destination),
//!     TaxMode::Exclusive,
//! )
//! .unwrap();
//!
//! // inter-state: the full 18% is IGST
//! assert_eq!(split.igst, Money::from_rupees(180));
//! assert_eq!(split.total_amount.to_string(), "₹1,180.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod address;
pub mod discount;
pub mod error;
pub mod gst;
pub mod gstin;
pub mod money;
pub mod order;
pub mod states;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vyapar_core::Money` instead of
// `use vyapar_core::money::Money`

pub use address::{validate_address, validate_pincode, Address, AddressInput};
pub use discount::{
    apply_bulk_tier_discount, apply_discount, validate_eligibility, BulkDiscountResult,
    Discount, DiscountResult, DiscountTier,
};
pub use error::{
    AddressError, CoreError, CoreResult, DiscountError, GstError, LookupError, MoneyError,
    ValidationError,
};
pub use gst::{calculate, GstRate, TaxMode, TaxSplit};
pub use gstin::Gstin;
pub use money::{Money, MAX_TRANSACTION, MIN_TRANSACTION};
pub use order::{order_breakdown, OrderGstBreakdown, OrderLine};
pub use states::{code_for_name, name_for_code, StateCode};
