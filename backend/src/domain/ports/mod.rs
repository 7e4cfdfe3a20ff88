//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_directory;
mod account_visibility;
mod group_backend;

pub use account_directory::{
    AccountDirectory, AccountDirectoryError, AttributeMatch, DirectorySession,
};
#[cfg(test)]
pub use account_visibility::MockAccountVisibility;
pub use account_visibility::AccountVisibility;
pub use group_backend::GroupBackend;
