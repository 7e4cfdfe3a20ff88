//! Single-user group backend.
//!
//! Every account is exposed as a group whose only member is that account.
//! The crate follows a ports-and-adapters layout: [`domain`] holds the
//! backend and its ports, [`outbound`] holds the in-memory and PostgreSQL
//! adapters, and [`config`] with [`telemetry`] wire up a host process.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod telemetry;
