//! Property-based tests for the order aggregate
//!
//! These verify invariants that must hold for all inputs, not just the
//! specific cases in the unit tests: product-id uniqueness in the line set,
//! quantities staying positive, and the derived total never going negative.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use orderdesk_order_edit::{
    ChargeSlot, FinancialSummary, LineItemSet, Money, ProductId, ProductRef, ShippingAndPayment,
};
use proptest::prelude::*;

/// A single edit against the line set, driven by index rather than key so
/// that shrunk sequences stay meaningful.
#[derive(Clone, Debug)]
enum LineOp {
    Add { id: u8, quantity: u32 },
    Remove { index: usize },
    SetQuantity { index: usize, quantity: u32 },
}

fn line_op() -> impl Strategy<Value = LineOp> {
    prop_oneof![
        (0..8u8, 1..20u32).prop_map(|(id, quantity)| LineOp::Add { id, quantity }),
        (0..8usize,).prop_map(|(index,)| LineOp::Remove { index }),
        (0..8usize, 0..20u32)
            .prop_map(|(index, quantity)| LineOp::SetQuantity { index, quantity }),
    ]
}

fn catalog_product(id: u8) -> ProductRef {
    ProductRef {
        id: Some(ProductId::new(format!("p{id}"))),
        name: format!("Product {id}"),
        image: vec![],
        original_price: Some(Money::from_cents(i64::from(id) * 100 + 50)),
        discount_price: None,
        variant: None,
    }
}

fn apply(set: &mut LineItemSet, op: &LineOp) {
    match *op {
        LineOp::Add { id, quantity } => {
            set.add(catalog_product(id), quantity);
        }
        LineOp::Remove { index } => {
            if let Some(line) = set.lines().get(index) {
                let key = line.key;
                set.remove(key);
            }
        }
        LineOp::SetQuantity { index, quantity } => {
            if let Some(line) = set.lines().get(index) {
                let key = line.key;
                set.set_quantity(key, quantity);
            }
        }
    }
}

proptest! {
    /// Property: no interleaving of edits produces two lines for the same
    /// product id, and quantities never drop below one.
    #[test]
    fn line_set_keeps_product_ids_unique_and_quantities_positive(
        ops in prop::collection::vec(line_op(), 0..40)
    ) {
        let mut set = LineItemSet::new();
        for op in &ops {
            apply(&mut set, op);
        }

        let mut seen = std::collections::HashSet::new();
        for line in set.lines() {
            prop_assert!(line.quantity >= 1);
            if let Some(id) = &line.product.id {
                prop_assert!(seen.insert(id.as_str().to_owned()), "duplicate product id {id}");
            }
        }
    }

    /// Property: the subtotal is always the sum of line totals.
    #[test]
    fn subtotal_matches_sum_of_line_totals(
        ops in prop::collection::vec(line_op(), 0..40)
    ) {
        let mut set = LineItemSet::new();
        for op in &ops {
            apply(&mut set, op);
        }

        let expected: i64 = set
            .lines()
            .iter()
            .map(|line| line.price.cents() * i64::from(line.quantity))
            .sum();
        prop_assert_eq!(set.subtotal(), Money::from_cents(expected));
    }

    /// Property: the derived total never goes negative, whatever discount
    /// and charge inputs arrive through the setters.
    #[test]
    fn derived_total_never_negative(
        ops in prop::collection::vec(line_op(), 0..20),
        discount in -100.0..300.0f64,
        packaging in -1_000_000..1_000_000i64,
        transaction in -1_000_000..1_000_000i64,
    ) {
        let mut set = LineItemSet::new();
        for op in &ops {
            apply(&mut set, op);
        }

        let mut shipping = ShippingAndPayment::default();
        shipping.set_discount(discount);
        shipping.set_charge_amount(ChargeSlot::Packaging, Money::from_cents(packaging));
        shipping.set_charge_amount(ChargeSlot::Transaction, Money::from_cents(transaction));

        let summary = FinancialSummary::derive(
            set.subtotal(),
            shipping.discount,
            shipping.additional_charges.total(),
        );
        prop_assert!(summary.total >= Money::ZERO);
    }

    /// Property: the discount setter always lands inside `[0, 100]`.
    #[test]
    fn discount_setter_always_clamps(value in prop::num::f64::ANY) {
        let mut shipping = ShippingAndPayment::default();
        shipping.set_discount(value);
        prop_assert!((0.0..=100.0).contains(&shipping.discount));
    }
}
