//! Testing infrastructure for projman.
//!
//! - **Mocks**: [`MemoryStore`], an in-memory [`crate::store::ProjectStore`]
//!   with switchable failures
//! - **Fixtures**: temporary store directories and sample projects (test-only)
//! - **Assertions**: invariant and field-by-field project comparisons
//!
//! # Example
//!
//! ```rust,ignore
//! use projman::testing::{MemoryStore, TestFixture};
//!
//! let store = MemoryStore::new().with_failing_saves();
//! let fixture = TestFixture::empty();
//! ```

pub mod assertions;
#[cfg(test)]
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use assertions::*;
#[cfg(test)]
pub use fixtures::*;
pub use mocks::*;
