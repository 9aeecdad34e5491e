//! # Orderdesk Core
//!
//! Core traits and types for the orderdesk order-edit architecture.
//!
//! This crate provides the fundamental abstractions for building the
//! admin-console order workflows using the Reducer pattern.
//!
//! ## Core Concepts
//!
//! - **State**: Instance-scoped domain state for a workflow
//! - **Action**: All possible inputs to a reducer (commands and effect feedback)
//! - **Reducer**: Pure function `(State, Action, Environment) → Effects`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use orderdesk_core::*;
//!
//! #[derive(Clone, Debug)]
//! struct EditState {
//!     lines: Vec<LineItem>,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum EditAction {
//!     AddLine { product: ProductRef, quantity: u32 },
//!     RemoveLine { key: LineKey },
//! }
//!
//! impl Reducer for EditReducer {
//!     type State = EditState;
//!     type Action = EditAction;
//!     type Environment = EditEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut EditState,
//!         action: EditAction,
//!         env: &EditEnvironment,
//!     ) -> SmallVec<[Effect<EditAction>; 4]> {
//!         // Business logic goes here
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Remote order gateway contract (fetch/persist) and wire types
pub mod gateway;

/// Declarative macros for ergonomic effect construction
pub mod effect_macros;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → Effects`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for OrderEditReducer {
    ///     type State = OrderEditState;
    ///     type Action = OrderEditAction;
    ///     type Environment = OrderEditEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut OrderEditState,
    ///         action: OrderEditAction,
    ///         env: &OrderEditEnvironment,
    ///     ) -> SmallVec<[Effect<OrderEditAction>; 4]> {
    ///         match action {
    ///             OrderEditAction::Submit => {
    ///                 // Business logic here
    ///                 smallvec![Effect::None]
    ///             }
    ///             _ => smallvec![Effect::None],
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime. Most reductions produce at
        /// most a handful, hence the inline capacity of four.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use crate::gateway::{GatewayError, OrderGateway, OrderId, OrderRecord, OrderUpdatePayload};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::time::Duration;

    /// Callback invoked when a gateway operation succeeds
    pub type OnSuccess<T, Action> = Box<dyn FnOnce(T) -> Option<Action> + Send>;

    /// Callback invoked when a gateway operation fails
    pub type OnError<Action> = Box<dyn FnOnce(GatewayError) -> Option<Action> + Send>;

    /// A gateway call described as data, executed by the Store runtime
    ///
    /// Reducers never perform I/O; they return one of these and the runtime
    /// drives the actual request, feeding the callback's action back in.
    pub enum GatewayOperation<Action> {
        /// Fetch an existing order by id
        FetchOrder {
            /// Gateway implementation to call
            gateway: Arc<dyn OrderGateway>,
            /// Order to fetch
            order_id: OrderId,
            /// Produces the feedback action on success
            on_success: OnSuccess<OrderRecord, Action>,
            /// Produces the feedback action on failure
            on_error: OnError<Action>,
        },

        /// Persist an updated order
        UpdateOrder {
            /// Gateway implementation to call
            gateway: Arc<dyn OrderGateway>,
            /// Order to update
            order_id: OrderId,
            /// Fully serialized aggregate
            payload: OrderUpdatePayload,
            /// Produces the feedback action on success
            on_success: OnSuccess<(), Action>,
            /// Produces the feedback action on failure
            on_error: OnError<Action>,
        },
    }

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the Store
    /// runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timeouts)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into
        /// the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

        /// Remote order gateway call (fetch or update)
        Gateway(GatewayOperation<Action>),
    }

    // Manual Debug implementation since Future and the boxed callbacks don't
    // implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Gateway(GatewayOperation::FetchOrder { order_id, .. }) => f
                    .debug_struct("Effect::Gateway::FetchOrder")
                    .field("order_id", order_id)
                    .finish(),
                Effect::Gateway(GatewayOperation::UpdateOrder { order_id, .. }) => f
                    .debug_struct("Effect::Gateway::UpdateOrder")
                    .field("order_id", order_id)
                    .finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use orderdesk_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let now = clock.now();
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::effect::Effect;

    #[derive(Clone, Debug)]
    enum TestAction {
        Done,
    }

    #[test]
    fn effect_debug_future_is_opaque() {
        let effect: Effect<TestAction> =
            Effect::Future(Box::pin(async { Some(TestAction::Done) }));
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
    }

    #[test]
    fn effect_merge_is_parallel() {
        let effect: Effect<TestAction> = Effect::merge(vec![Effect::None, Effect::None]);
        assert!(matches!(effect, Effect::Parallel(effects) if effects.len() == 2));
    }

    #[test]
    fn effect_chain_is_sequential() {
        let effect: Effect<TestAction> = Effect::chain(vec![Effect::None]);
        assert!(matches!(effect, Effect::Sequential(_)));
    }
}
