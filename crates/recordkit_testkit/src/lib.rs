//! # recordkit testkit
//!
//! Test utilities for recordkit.
//!
//! This crate provides:
//! - Fixtures built from readable JSON
//! - Property-based test generators using proptest
//! - Named input/expected vectors for the composition operations
//! - A `tracing` subscriber for tests
//!
//! ## Usage
//!
//! ```
//! use recordkit_testkit::prelude::*;
//!
//! init_tracing();
//! let users = users();
//! assert_eq!(users.len(), 3);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
    pub use crate::init_tracing;
}

pub use fixtures::*;
pub use generators::*;
pub use vectors::*;

/// Installs a `tracing` subscriber for the current test process.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`. Output goes
/// through the test writer so it is captured per test. Calling this more
/// than once is harmless.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
