//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local account directory for tests and embedded hosts
//! - **persistence**: PostgreSQL-backed account directory using Diesel ORM
//! - **visibility**: host-wide and allow-list account visibility
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

mod memory;
pub mod persistence;
mod visibility;

pub use memory::{InMemoryAccountDirectory, InMemorySession};
pub use visibility::{AllowListVisibility, UnknownVisibilityPolicy, VisibilityPolicy};
