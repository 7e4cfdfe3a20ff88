//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Connections come from a `bb8` pool through `diesel-async`. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) stay internal; only the
//! directory adapter and its pool are exported.
//!
//! ```ignore
//! use single_user_group::outbound::persistence::{DbPool, DieselAccountDirectory, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/accounts")).await?;
//! let directory = DieselAccountDirectory::new(pool);
//! ```

mod diesel_account_directory;
pub(crate) mod diesel_helpers;
mod models;
mod pool;
mod schema;

pub use diesel_account_directory::{DieselAccountDirectory, DieselDirectorySession};
pub use pool::{DbPool, OwnedConnection, PoolConfig, PoolError};
