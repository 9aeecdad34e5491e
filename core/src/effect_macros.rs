//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants,
//! particularly for gateway operations where the callback boxing is noisy.

/// Create an `Effect::Gateway` with a `FetchOrder` operation
///
/// # Example
///
/// ```rust,ignore
/// use orderdesk_core::fetch_order;
///
/// fetch_order! {
///     gateway: env.gateway,
///     order_id: order_id.clone(),
///     on_success: |record| Some(OrderEditAction::OrderFetched { record }),
///     on_error: |error| Some(OrderEditAction::FetchFailed { error: error.to_string() })
/// }
/// ```
#[macro_export]
macro_rules! fetch_order {
    (
        gateway: $gateway:expr,
        order_id: $order_id:expr,
        on_success: |$success_param:ident| $success_body:expr,
        on_error: |$error_param:ident| $error_body:expr
    ) => {
        $crate::effect::Effect::Gateway($crate::effect::GatewayOperation::FetchOrder {
            gateway: ::std::sync::Arc::clone(&$gateway),
            order_id: $order_id,
            on_success: ::std::boxed::Box::new(move |$success_param| $success_body),
            on_error: ::std::boxed::Box::new(move |$error_param| $error_body),
        })
    };
}

/// Create an `Effect::Gateway` with an `UpdateOrder` operation
///
/// # Example
///
/// ```rust,ignore
/// use orderdesk_core::update_order;
///
/// update_order! {
///     gateway: env.gateway,
///     order_id: order_id.clone(),
///     payload: payload,
///     on_success: || Some(OrderEditAction::SubmitSucceeded),
///     on_error: |error| Some(OrderEditAction::SubmitFailed { error: error.to_string() })
/// }
/// ```
#[macro_export]
macro_rules! update_order {
    (
        gateway: $gateway:expr,
        order_id: $order_id:expr,
        payload: $payload:expr,
        on_success: || $success_body:expr,
        on_error: |$error_param:ident| $error_body:expr
    ) => {
        $crate::effect::Effect::Gateway($crate::effect::GatewayOperation::UpdateOrder {
            gateway: ::std::sync::Arc::clone(&$gateway),
            order_id: $order_id,
            payload: $payload,
            on_success: ::std::boxed::Box::new(move |()| $success_body),
            on_error: ::std::boxed::Box::new(move |$error_param| $error_body),
        })
    };
}

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use orderdesk_core::async_effect;
///
/// async_effect! {
///     let record = prepare_record().await;
///     Some(OrderEditAction::OrderFetched { record })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use orderdesk_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_secs(30),
///     action: OrderEditAction::Cancel
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::Effect;
    use crate::gateway::{
        GatewayError, OrderGateway, OrderId, OrderRecord, OrderUpdatePayload,
    };
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Clone, Debug)]
    enum TestAction {
        AsyncResult { value: i32 },
        Timeout,
        Fetched,
        Updated,
        Failed,
    }

    struct NullGateway;

    impl OrderGateway for NullGateway {
        fn fetch_order(
            &self,
            order_id: OrderId,
        ) -> Pin<Box<dyn Future<Output = Result<OrderRecord, GatewayError>> + Send + '_>> {
            Box::pin(async move { Err(GatewayError::NotFound(order_id)) })
        }

        fn update_order(
            &self,
            order_id: OrderId,
            _payload: OrderUpdatePayload,
        ) -> Pin<Box<dyn Future<Output = Result<(), GatewayError>> + Send + '_>> {
            Box::pin(async move { Err(GatewayError::NotFound(order_id)) })
        }
    }

    #[test]
    fn async_effect_macro_builds_future_effect() {
        let effect = async_effect! {
            Some(TestAction::AsyncResult { value: 42 })
        };

        assert!(matches!(effect, Effect::Future(_)));
    }

    #[test]
    fn delay_macro_builds_delay_effect() {
        let effect = delay! {
            duration: Duration::from_secs(30),
            action: TestAction::Timeout
        };

        assert!(matches!(effect, Effect::Delay { .. }));
    }

    #[test]
    fn fetch_order_macro_builds_gateway_effect() {
        let gateway: Arc<dyn OrderGateway> = Arc::new(NullGateway);
        let effect: Effect<TestAction> = fetch_order! {
            gateway: gateway,
            order_id: OrderId::new("order-1"),
            on_success: |_record| Some(TestAction::Fetched),
            on_error: |_error| Some(TestAction::Failed)
        };

        assert!(matches!(
            effect,
            Effect::Gateway(crate::effect::GatewayOperation::FetchOrder { .. })
        ));
    }

    #[test]
    fn update_order_macro_builds_gateway_effect() {
        let gateway: Arc<dyn OrderGateway> = Arc::new(NullGateway);
        let payload = OrderUpdatePayload {
            customer: None,
            billing_address: None,
            shipping_address: None,
            products: vec![],
            shipping_method: "Standard".into(),
            order_status: "Pending".into(),
            payment_status: "Pending".into(),
            additional_charges: vec![],
            order_note: String::new(),
            discount: 0.0,
            payment_total: 0.0,
        };
        let effect: Effect<TestAction> = update_order! {
            gateway: gateway,
            order_id: OrderId::new("order-1"),
            payload: payload,
            on_success: || Some(TestAction::Updated),
            on_error: |_error| Some(TestAction::Failed)
        };

        assert!(matches!(
            effect,
            Effect::Gateway(crate::effect::GatewayOperation::UpdateOrder { .. })
        ));
    }
}
