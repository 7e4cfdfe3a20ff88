//! Domain primitives and the single-user group backend.
//!
//! Purpose: model accounts as one-member groups. Identifiers, rendered names
//! and membership are derived from account data alone; the account store and
//! visibility rules are reached through the ports in [`ports`].
//!
//! Public surface:
//! - SingleUserGroupBackend (alias to `single_user_group::SingleUserGroupBackend`)
//!   implements the group backend port.
//! - GroupBackends (alias to `registry::GroupBackends`) dispatches across
//!   every registered backend.
//! - Error (alias to `error::Error`) and ErrorCode describe failures of `get`.
//! - GroupUuid, GroupDescriptor and GroupReference are the identifier and
//!   read models handed to hosts.

pub mod account;
pub mod actor;
pub mod error;
pub mod group;
pub mod identifier;
pub mod membership;
pub mod ports;
pub mod prefix_range;
pub mod registry;
pub mod single_user_group;

pub use self::account::{
    AccountAttribute, AccountId, AccountRecord, AccountValidationError, Username,
};
pub use self::actor::{Actor, IdentifiedActor};
pub use self::error::{Error, ErrorCode};
pub use self::group::{GroupDescriptor, GroupReference, render_name};
pub use self::identifier::{
    ACCOUNT_PREFIX, GroupUuid, IdentityToken, NAME_PREFIX, UUID_PREFIX,
};
pub use self::membership::GroupMembership;
pub use self::prefix_range::PrefixRange;
pub use self::registry::{GroupBackends, UniversalMembership};
pub use self::single_user_group::{MAX_SUGGESTIONS, SingleUserGroupBackend, normalize_query};
