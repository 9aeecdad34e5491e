//! Order edit walkthrough binary
//!
//! Drives the full edit session against an in-memory gateway: fetch an
//! order, reshape its lines and charges, watch the derived totals move, and
//! submit the composed payload back.

use orderdesk_core::environment::SystemClock;
use orderdesk_core::gateway::{
    ChargesRecord, OrderId, OrderLineRecord, OrderRecord, ProductRecord,
};
use orderdesk_order_edit::{
    ChargeSlot, Money, OrderEditAction, OrderEditEnvironment, OrderEditReducer, OrderEditState,
    ProductId, ProductRef, ShippingMethod,
};
use orderdesk_runtime::Store;
use orderdesk_testing::InMemoryOrderGateway;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn seeded_order() -> OrderRecord {
    OrderRecord {
        customer: Some("cust-1042".to_owned()),
        billing_address: Some("addr-billing".to_owned()),
        shipping_address: Some("addr-shipping".to_owned()),
        products: vec![OrderLineRecord {
            product: Some(ProductRecord {
                id: "prod-widget".to_owned(),
                name: "Widget".to_owned(),
                image: vec![],
                original_price: Some(100.0),
                discount_price: None,
            }),
            variant: None,
            quantity: 2,
            price: None,
        }],
        shipping_method: "standard".to_owned(),
        order_status: "pending".to_owned(),
        payment_status: "pending".to_owned(),
        discount: 0.0,
        order_note: String::new(),
        additional_charges: vec![ChargesRecord {
            packaging_charge: "0".to_owned(),
            transaction_charge: "0".to_owned(),
        }],
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_edit_demo=info,orderdesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Order Edit Walkthrough ===\n");

    let order_id = OrderId::new("ord-1042");
    let gateway = Arc::new(
        InMemoryOrderGateway::new().with_order(order_id.clone(), seeded_order()),
    );
    let env = OrderEditEnvironment::new(gateway.clone(), Arc::new(SystemClock));
    let store = Store::new(
        OrderEditState::opening(order_id),
        OrderEditReducer::new(),
        env,
    );

    // Mirror every feedback action the effects produce.
    let mut feedback = store.subscribe_actions();
    tokio::spawn(async move {
        while let Ok(action) = feedback.recv().await {
            tracing::info!(?action, "feedback action");
        }
    });

    println!(">>> Fetching order ord-1042");
    store
        .send_and_wait_for(
            OrderEditAction::Start,
            |action| {
                matches!(
                    action,
                    OrderEditAction::OrderFetched { .. } | OrderEditAction::FetchFailed { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await?;
    let subtotal = store.state(|s| s.summary.subtotal).await;
    println!("Hydrated. Subtotal: {subtotal}\n");

    println!(">>> Adding an accessory, 10% discount, and order charges");
    store
        .send(OrderEditAction::AddLine {
            product: ProductRef {
                id: Some(ProductId::new("prod-stand")),
                name: "Stand".to_owned(),
                image: vec![],
                original_price: Some(Money::from_major(50.0)),
                discount_price: None,
                variant: None,
            },
            quantity: 1,
        })
        .await?;
    store
        .send(OrderEditAction::SetDiscount { percent: 10.0 })
        .await?;
    store
        .send(OrderEditAction::SetChargeAmount {
            slot: ChargeSlot::Packaging,
            amount: Money::from_major(20.0),
        })
        .await?;
    store
        .send(OrderEditAction::SetChargeAmount {
            slot: ChargeSlot::Transaction,
            amount: Money::from_major(5.0),
        })
        .await?;
    store
        .send(OrderEditAction::SetShippingMethod {
            method: ShippingMethod::Express,
        })
        .await?;

    let summary = store.state(|s| s.summary).await;
    println!(
        "Summary: subtotal {}, discount {}, charges {}, total {}\n",
        summary.subtotal, summary.discount_amount, summary.additional_charges_total, summary.total
    );

    println!(">>> Submitting");
    let outcome = store
        .send_and_wait_for(
            OrderEditAction::Submit,
            |action| {
                matches!(
                    action,
                    OrderEditAction::SubmitSucceeded | OrderEditAction::SubmitFailed { .. }
                )
            },
            Duration::from_secs(5),
        )
        .await?;
    match outcome {
        OrderEditAction::SubmitSucceeded => println!("Submit accepted.\n"),
        OrderEditAction::SubmitFailed { error } => println!("Submit failed: {error}\n"),
        _ => {}
    }

    if let Some(payload) = gateway.last_submitted() {
        println!("Payload sent to the backend:");
        println!("  shippingMethod: {}", payload.shipping_method);
        println!("  discount:       {}", payload.discount);
        println!("  paymentTotal:   {}", payload.payment_total);
        for line in &payload.products {
            println!(
                "  line:           {} x{} @ {}",
                line.product.as_deref().unwrap_or("(deleted)"),
                line.quantity,
                line.price
            );
        }
    }

    store.shutdown_with_default().await?;
    println!("=== Walkthrough Complete ===");
    Ok(())
}
