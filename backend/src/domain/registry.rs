//! Host-side registry of group backends.
//!
//! Backends are registered once at startup, in order. Identifier-based calls
//! go to the first backend that claims the identifier; suggestions are
//! gathered from every backend in registration order.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::actor::Actor;
use super::error::Error;
use super::group::{GroupDescriptor, GroupReference};
use super::identifier::GroupUuid;
use super::membership::GroupMembership;
use super::ports::GroupBackend;

/// Ordered collection of registered backends.
#[derive(Clone, Default)]
pub struct GroupBackends {
    backends: Vec<Arc<dyn GroupBackend>>,
}

impl fmt::Debug for GroupBackends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupBackends")
            .field("backends", &self.backends.len())
            .finish()
    }
}

impl GroupBackends {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a backend; earlier registrations win identifier disputes.
    #[must_use]
    pub fn register(mut self, backend: Arc<dyn GroupBackend>) -> Self {
        self.backends.push(backend);
        self
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    fn backend_for(&self, uuid: &GroupUuid) -> Option<&Arc<dyn GroupBackend>> {
        self.backends.iter().find(|backend| backend.handles(uuid))
    }

    /// Whether any registered backend owns `uuid`.
    pub fn handles(&self, uuid: &GroupUuid) -> bool {
        self.backend_for(uuid).is_some()
    }

    /// Describe `uuid` through the backend that owns it.
    ///
    /// Identifiers no backend owns are reported as missing.
    pub async fn get(&self, uuid: &GroupUuid) -> Result<Option<GroupDescriptor>, Error> {
        match self.backend_for(uuid) {
            Some(backend) => backend.get(uuid).await,
            None => {
                debug!(%uuid, "no group backend handles identifier");
                Ok(None)
            }
        }
    }

    /// Suggestions from every backend, in registration order.
    pub async fn suggest(&self, text: &str, requester: &Actor) -> Vec<GroupReference> {
        let mut matches = Vec::new();
        for backend in &self.backends {
            matches.extend(backend.suggest(text, requester).await);
        }
        matches
    }

    /// Memberships of `actor` across all backends.
    pub fn memberships_of(&self, actor: &Actor) -> UniversalMembership {
        UniversalMembership {
            memberships: self
                .backends
                .iter()
                .map(|backend| (Arc::clone(backend), backend.memberships_of(actor)))
                .collect(),
        }
    }
}

/// Membership spanning every registered backend.
///
/// Each test is answered by the backend that owns the identifier.
pub struct UniversalMembership {
    memberships: Vec<(Arc<dyn GroupBackend>, GroupMembership)>,
}

impl fmt::Debug for UniversalMembership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.memberships.iter().map(|(_, membership)| membership))
            .finish()
    }
}

impl UniversalMembership {
    pub fn contains(&self, uuid: &GroupUuid) -> bool {
        self.memberships
            .iter()
            .find(|(backend, _)| backend.handles(uuid))
            .is_some_and(|(_, membership)| membership.contains(uuid))
    }

    pub fn contains_any_of<'a, I>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'a GroupUuid>,
    {
        candidates.into_iter().any(|uuid| self.contains(uuid))
    }

    /// Every group any backend can enumerate for the actor.
    pub fn known_groups(&self) -> impl Iterator<Item = &GroupUuid> {
        self.memberships
            .iter()
            .flat_map(|(_, membership)| membership.known_groups())
    }
}
