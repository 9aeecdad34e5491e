//! # Orderdesk Testing
//!
//! Testing utilities and helpers for the orderdesk architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - Mock order gateways (in-memory and failing)
//! - A fluent Given-When-Then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use orderdesk_testing::{test_clock, InMemoryOrderGateway};
//! use orderdesk_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_edit_flow() {
//!     let env = test_environment();
//!     let store = Store::new(OrderEditState::opening(order_id), OrderEditReducer, env);
//!
//!     store.send(OrderEditAction::Start).await?;
//!
//!     let phase = store.state(|s| s.phase).await;
//!     assert_eq!(phase, EditPhase::Ready);
//! }
//! ```

use chrono::{DateTime, Utc};
use orderdesk_core::environment::Clock;

/// Mock order gateways with call recording
pub mod gateway_mocks;

/// Fluent Given-When-Then harness for reducers
pub mod reducer_test;

/// Mock implementations of Environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use orderdesk_testing::mocks::FixedClock;
    /// use orderdesk_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Install a compact tracing subscriber for test binaries
///
/// Reads `RUST_LOG` for filtering. Safe to call from multiple tests; only the
/// first call installs the subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .compact()
        .try_init();
}

// Re-export commonly used items
pub use gateway_mocks::{FailingOrderGateway, FailureMode, InMemoryOrderGateway};
pub use mocks::{test_clock, FixedClock};
pub use reducer_test::ReducerTest;
