//! # Todo Core
//!
//! Injected capabilities for the todo engine.
//!
//! Every dependency the record store and business layer reach outside of
//! themselves for is abstracted behind a trait in [`environment`] and passed
//! in at construction time:
//!
//! - **Clock**: current time for `createdAt` / `updatedAt`
//! - **`IdGenerator`**: opaque record identifiers
//! - **Sanitizer**: markup stripping for user supplied text
//!
//! Production implementations live next to the traits ([`SystemClock`],
//! [`UuidGenerator`]); deterministic doubles live in `todo-testing`.
//!
//! ## Example
//!
//! ```
//! use todo_core::environment::{Clock, IdGenerator, SystemClock, UuidGenerator};
//!
//! let clock = SystemClock;
//! let ids = UuidGenerator;
//!
//! let first = ids.next_id();
//! let second = ids.next_id();
//! assert_ne!(first, second);
//! assert!(clock.now() <= clock.now());
//! ```
//!
//! [`SystemClock`]: environment::SystemClock
//! [`UuidGenerator`]: environment::UuidGenerator

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use uuid::Uuid;

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// by the caller. Each trait is object safe and `Send + Sync` so it can be
/// shared as `Arc<dyn Trait>` between the store, the service and request
/// handlers.
pub mod environment {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system wall clock.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of record identifiers.
    ///
    /// Implementations must not hand out the same value twice. The record
    /// store double checks this and refuses to recycle an identifier, but a
    /// generator that repeats itself turns every such create into an
    /// internal error.
    pub trait IdGenerator: Send + Sync {
        /// Produce the next identifier
        fn next_id(&self) -> Uuid;
    }

    /// Random (v4) UUID generator.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidGenerator;

    impl IdGenerator for UuidGenerator {
        fn next_id(&self) -> Uuid {
            Uuid::new_v4()
        }
    }

    /// Markup stripping capability.
    ///
    /// Implementations treat their input as untrusted and return plain text
    /// only: no tag, comment or embedded script may survive. Whitespace
    /// handling (trimming) is left to the caller.
    pub trait Sanitizer: Send + Sync {
        /// Strip all markup from `input`
        fn sanitize(&self, input: &str) -> String;
    }

    /// Sanitizer that returns its input unchanged.
    ///
    /// Useful when the caller has already produced plain text.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct PlainText;

    impl Sanitizer for PlainText {
        fn sanitize(&self, input: &str) -> String {
            input.to_string()
        }
    }
}
