//! Decomposition of fetched orders into editable slices and composition of
//! the outbound update payload.
//!
//! Inbound strings are forgiving: unknown enum values fall back to their
//! defaults and unparsable charge amounts read as zero. Outbound strings are
//! strict: statuses are capitalized and quantities and charges stringified,
//! exactly as the backend schema demands.

use crate::composer::OrderEditState;
use crate::line_items::LineItemSet;
use crate::shipping::ShippingAndPayment;
use crate::types::{
    AddressId, ChargeSlot, CustomerId, Money, OrderStatus, PaymentStatus, ShippingMethod,
};
use orderdesk_core::gateway::{
    capitalize_first, OrderRecord, OrderUpdatePayload, PayloadCharges, PayloadLine,
};

/// Splits a fetched order into the aggregate's editable slices
///
/// Overwrites the customer, address, line, and shipping slices in place. The
/// caller owns the phase transition and summary recompute.
pub fn decompose(state: &mut OrderEditState, record: &OrderRecord) {
    state.customer = record.customer.clone().map(CustomerId::new);
    state.billing_address = record.billing_address.clone().map(AddressId::new);
    state.shipping_address = record.shipping_address.clone().map(AddressId::new);
    state.lines = LineItemSet::hydrate(&record.products);
    state.shipping = shipping_from_record(record);
}

fn shipping_from_record(record: &OrderRecord) -> ShippingAndPayment {
    let mut shipping = ShippingAndPayment {
        shipping_method: ShippingMethod::parse(&record.shipping_method),
        order_status: OrderStatus::parse(&record.order_status),
        payment_status: PaymentStatus::parse(&record.payment_status),
        discount: 0.0,
        order_note: record.order_note.clone(),
        additional_charges: crate::types::AdditionalCharges::new(),
    };
    shipping.set_discount(record.discount);
    // only the first charges entry is meaningful; the rest is backend noise
    if let Some(charges) = record.additional_charges.first() {
        shipping.set_charge_amount(ChargeSlot::Packaging, parse_charge(&charges.packaging_charge));
        shipping.set_charge_amount(
            ChargeSlot::Transaction,
            parse_charge(&charges.transaction_charge),
        );
    }
    shipping
}

fn parse_charge(raw: &str) -> Money {
    raw.trim().parse::<f64>().map_or(Money::ZERO, Money::from_major)
}

/// Serializes the aggregate into the backend's update shape
///
/// Quantities and charge amounts become decimal strings, statuses are
/// capitalized, and `payment_total` carries the derived total in major units.
#[must_use]
pub fn build_update_payload(state: &OrderEditState) -> OrderUpdatePayload {
    let products = state
        .lines
        .lines()
        .iter()
        .map(|line| PayloadLine {
            product: line.product.id.as_ref().map(|id| id.as_str().to_owned()),
            variant: line.product.variant.as_ref().map(|v| v.as_str().to_owned()),
            quantity: line.quantity.to_string(),
            price: line.price.to_major(),
        })
        .collect();
    let charges = &state.shipping.additional_charges;
    OrderUpdatePayload {
        customer: state.customer.as_ref().map(|c| c.as_str().to_owned()),
        billing_address: state.billing_address.as_ref().map(|a| a.as_str().to_owned()),
        shipping_address: state
            .shipping_address
            .as_ref()
            .map(|a| a.as_str().to_owned()),
        products,
        shipping_method: capitalize_first(state.shipping.shipping_method.as_str()),
        order_status: capitalize_first(state.shipping.order_status.as_str()),
        payment_status: capitalize_first(state.shipping.payment_status.as_str()),
        additional_charges: vec![PayloadCharges {
            packaging_charge: charges.amount(ChargeSlot::Packaging).to_major().to_string(),
            transaction_charge: charges
                .amount(ChargeSlot::Transaction)
                .to_major()
                .to_string(),
        }],
        order_note: state.shipping.order_note.clone(),
        discount: state.shipping.discount,
        payment_total: state.summary.total.to_major(),
    }
}
