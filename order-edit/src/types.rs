//! Core domain types for the order-edit workflow.
//!
//! Money is integer minor units to keep summary math exact; every reference
//! is a distinct newtype so customer, address, and product ids cannot be
//! mixed up at a call site.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a customer
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(String);

impl CustomerId {
    /// Creates a new `CustomerId` from a string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a saved address
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressId(String);

impl AddressId {
    /// Creates a new `AddressId` from a string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a catalog product
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new `ProductId` from a string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a product variant
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantId(String);

impl VariantId {
    /// Creates a new `VariantId` from a string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier for a line item within one edit session
///
/// Keys are issued by the owning [`LineItemSet`](crate::line_items::LineItemSet)
/// and stay stable across edits, so removals never shift the identity of the
/// remaining lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineKey(u64);

impl LineKey {
    /// Creates a line key with the given value
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric key value
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Money amount in minor units (cents) to avoid floating point drift
///
/// Major-unit `f64` values exist only at the wire boundary. The single place
/// a percentage is applied rounds half away from zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Creates a money amount from minor units
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates a money amount from major units, rounding to the nearest cent
    ///
    /// Non-finite inputs normalize to zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // wire amounts are far below i64 range
    pub fn from_major(major: f64) -> Self {
        if major.is_finite() {
            Self((major * 100.0).round() as i64)
        } else {
            Self::ZERO
        }
    }

    /// Returns the value in minor units
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in major units for the wire boundary
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // acceptable at the serialization boundary
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Applies a percentage, rounding half away from zero
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn percent(&self, percent: f64) -> Self {
        if percent.is_finite() {
            Self((self.0 as f64 * percent / 100.0).round() as i64)
        } else {
            Self::ZERO
        }
    }

    /// Clamps negative amounts to zero
    #[must_use]
    pub const fn clamp_non_negative(self) -> Self {
        if self.0 < 0 {
            Self::ZERO
        } else {
            self
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_major())
    }
}

/// Shipping method for an order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShippingMethod {
    /// Standard delivery
    #[default]
    Standard,
    /// Express delivery
    Express,
}

impl ShippingMethod {
    /// Parses a wire value case-insensitively; unknown values fall back to
    /// `Standard`
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("express") {
            Self::Express
        } else {
            Self::Standard
        }
    }

    /// The lowercase wire spelling; outbound payloads capitalize the first
    /// letter
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of an order in its fulfillment lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order received, not yet confirmed
    #[default]
    Pending,
    /// Order confirmed by the seller
    Confirmed,
    /// Order handed to the carrier
    Shipped,
    /// Order delivered to the customer
    Delivered,
}

impl OrderStatus {
    /// Parses a wire value case-insensitively; unknown values fall back to
    /// `Pending`
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Self::Confirmed,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            _ => Self::Pending,
        }
    }

    /// The lowercase wire spelling; outbound payloads capitalize the first
    /// letter
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of the payment attached to an order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Payment not yet settled
    #[default]
    Pending,
    /// Payment settled
    Confirmed,
    /// Payment attempt failed
    Failed,
}

impl PaymentStatus {
    /// Parses a wire value case-insensitively; unknown values fall back to
    /// `Pending`
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Self::Confirmed,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }

    /// The lowercase wire spelling; outbound payloads capitalize the first
    /// letter
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of an additional charge within the fixed two-slot set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeSlot {
    /// Slot 0: packaging charges including GST
    Packaging,
    /// Slot 1: transaction charges
    Transaction,
}

impl ChargeSlot {
    /// Display label for the slot; names are fixed, only amounts mutate
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Packaging => "Packaging Charges (Inc. GST)",
            Self::Transaction => "Transaction Charges",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Packaging => 0,
            Self::Transaction => 1,
        }
    }
}

/// The fixed pair of order-level charges
///
/// Slot order is positional for serialization: packaging first, transaction
/// second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalCharges {
    amounts: [Money; 2],
}

impl AdditionalCharges {
    /// Creates charges with both amounts at zero
    #[must_use]
    pub const fn new() -> Self {
        Self {
            amounts: [Money::ZERO; 2],
        }
    }

    /// Returns the amount in a slot
    #[must_use]
    pub const fn amount(&self, slot: ChargeSlot) -> Money {
        self.amounts[slot.index()]
    }

    /// Sets the amount in a slot; negative amounts clamp to zero
    pub fn set_amount(&mut self, slot: ChargeSlot, amount: Money) {
        self.amounts[slot.index()] = amount.clamp_non_negative();
    }

    /// Sum of both slots
    #[must_use]
    pub const fn total(&self) -> Money {
        Money::from_cents(self.amounts[0].cents() + self.amounts[1].cents())
    }
}

/// Derived money view of the aggregate
///
/// Recomputed by the composer on every slice change; never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Sum of line price times quantity
    pub subtotal: Money,
    /// Discount applied to the subtotal
    pub discount_amount: Money,
    /// Sum of the additional charge slots
    pub additional_charges_total: Money,
    /// Amount payable; never negative
    pub total: Money,
}

impl FinancialSummary {
    /// Derives the summary from its inputs
    ///
    /// `total = max(0, subtotal - discount_amount + additional_charges_total)`
    #[must_use]
    pub fn derive(subtotal: Money, discount_percent: f64, additional_charges_total: Money) -> Self {
        let discount_amount = subtotal.percent(discount_percent);
        let total = Money::from_cents(
            (subtotal.cents() - discount_amount.cents() + additional_charges_total.cents()).max(0),
        );
        Self {
            subtotal,
            discount_amount,
            additional_charges_total,
            total,
        }
    }
}
