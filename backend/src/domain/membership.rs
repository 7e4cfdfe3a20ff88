//! Group membership of an actor.
//!
//! Every identified actor belongs to the groups named after its own account:
//! `user:<id>` always, and `user:<username>` when a username is set. Both
//! identifiers denote the same account. Resolution never consults the
//! directory, so it cannot fail when the directory is unavailable.

use std::collections::HashSet;

use super::actor::Actor;
use super::identifier::{GroupUuid, encode_account_id, encode_username};

/// Set of groups an actor is known to belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMembership {
    groups: HashSet<GroupUuid>,
}

impl GroupMembership {
    /// Membership that contains nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether `uuid` is one of the groups.
    pub fn contains(&self, uuid: &GroupUuid) -> bool {
        self.groups.contains(uuid)
    }

    /// Whether any of `candidates` is one of the groups.
    pub fn contains_any_of<'a, I>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'a GroupUuid>,
    {
        candidates.into_iter().any(|uuid| self.contains(uuid))
    }

    /// The subset of `candidates` that are groups of this membership.
    pub fn intersection<'a, I>(&self, candidates: I) -> HashSet<GroupUuid>
    where
        I: IntoIterator<Item = &'a GroupUuid>,
    {
        candidates
            .into_iter()
            .filter(|uuid| self.contains(uuid))
            .cloned()
            .collect()
    }

    /// Every group this membership can enumerate.
    pub fn known_groups(&self) -> &HashSet<GroupUuid> {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<GroupUuid> for GroupMembership {
    fn from_iter<T: IntoIterator<Item = GroupUuid>>(iter: T) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}

/// Resolve the single-user groups `actor` belongs to.
pub fn memberships_of(actor: &Actor) -> GroupMembership {
    let Some(identified) = actor.as_identified() else {
        return GroupMembership::empty();
    };

    let by_id = encode_account_id(identified.account_id());
    let by_username = identified.username().map(encode_username);
    std::iter::once(by_id).chain(by_username).collect()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for membership resolution.
    use super::*;
    use crate::domain::account::{AccountId, Username};
    use crate::domain::identifier::encode;
    use rstest::{fixture, rstest};

    #[fixture]
    fn alice() -> Actor {
        Actor::identified(
            AccountId::new(7).expect("valid id"),
            Some(Username::new("alice").expect("valid username")),
        )
    }

    #[rstest]
    fn identified_actor_with_username_has_two_groups(alice: Actor) {
        let membership = memberships_of(&alice);

        let expected: HashSet<GroupUuid> = [encode("7"), encode("alice")].into_iter().collect();
        assert_eq!(membership.known_groups(), &expected);
        assert_eq!(membership.len(), 2);
    }

    #[rstest]
    fn identified_actor_without_username_has_one_group() {
        let actor = Actor::identified(AccountId::new(7).expect("valid id"), None);
        let membership = memberships_of(&actor);

        assert_eq!(membership.len(), 1);
        assert!(membership.contains(&encode("7")));
    }

    #[rstest]
    fn anonymous_actor_has_no_groups() {
        assert!(memberships_of(&Actor::anonymous()).is_empty());
    }

    #[rstest]
    fn contains_any_of_matches_either_form(alice: Actor) {
        let membership = memberships_of(&alice);

        assert!(membership.contains_any_of([&encode("nobody"), &encode("alice")]));
        assert!(membership.contains_any_of(&[encode("7")]));
        assert!(!membership.contains_any_of([&encode("8"), &GroupUuid::new("ldap:7")]));
        assert!(!membership.contains_any_of(std::iter::empty::<&GroupUuid>()));
    }

    #[rstest]
    fn intersection_keeps_only_member_groups(alice: Actor) {
        let membership = memberships_of(&alice);
        let candidates = [encode("7"), encode("bob"), GroupUuid::new("ldap:admins")];

        let shared = membership.intersection(&candidates);
        assert_eq!(shared, [encode("7")].into_iter().collect());
    }
}
