//! Driving port implemented by every pluggable group backend.
//!
//! The host keeps an ordered list of backends and dispatches each request to
//! whichever backend claims the identifier (see
//! [`GroupBackends`](crate::domain::GroupBackends)).

use async_trait::async_trait;

use crate::domain::{Actor, Error, GroupDescriptor, GroupMembership, GroupReference, GroupUuid};

/// Capability set of one group backend.
#[async_trait]
pub trait GroupBackend: Send + Sync {
    /// Whether this backend owns `uuid`.
    fn handles(&self, uuid: &GroupUuid) -> bool;

    /// Describe the group named by `uuid`.
    ///
    /// Returns `Ok(None)` for groups that do not exist. Asking about an
    /// identifier the backend does not handle is a caller error.
    async fn get(&self, uuid: &GroupUuid) -> Result<Option<GroupDescriptor>, Error>;

    /// Suggest groups whose names start with `text`.
    ///
    /// Best effort: failures yield an empty list.
    async fn suggest(&self, text: &str, requester: &Actor) -> Vec<GroupReference>;

    /// Groups of this backend that `actor` belongs to.
    fn memberships_of(&self, actor: &Actor) -> GroupMembership;
}
