//! Shipping, payment, and charges slice.
//!
//! Numeric noise is normalized at the setters: out-of-range discounts clamp
//! into `[0, 100]` and negative charge amounts clamp to zero. Enum fields are
//! replaced wholesale by the composer.

use crate::types::{AdditionalCharges, ChargeSlot, Money, OrderStatus, PaymentStatus, ShippingMethod};
use serde::{Deserialize, Serialize};

/// Shipping and payment details for the order under edit
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingAndPayment {
    /// Selected shipping method
    pub shipping_method: ShippingMethod,
    /// Order lifecycle status
    pub order_status: OrderStatus,
    /// Payment lifecycle status
    pub payment_status: PaymentStatus,
    /// Percentage discount on the subtotal, always within `[0, 100]`
    pub discount: f64,
    /// Free-form note attached to the order
    pub order_note: String,
    /// The fixed pair of order-level charges
    pub additional_charges: AdditionalCharges,
}

impl ShippingAndPayment {
    /// Sets the discount percentage, clamping to `[0, 100]`
    ///
    /// NaN normalizes to 0.
    pub fn set_discount(&mut self, value: f64) {
        self.discount = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 100.0)
        };
    }

    /// Sets a charge amount; negative amounts clamp to zero
    pub fn set_charge_amount(&mut self, slot: ChargeSlot, amount: Money) {
        self.additional_charges.set_amount(slot, amount);
    }
}
