//! The principal on whose behalf the host calls the backend.

use super::account::{AccountId, Username};

/// Identity attributes of an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedActor {
    account_id: AccountId,
    username: Option<Username>,
}

impl IdentifiedActor {
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn username(&self) -> Option<&Username> {
        self.username.as_ref()
    }
}

/// Requesting principal.
///
/// Authentication happens upstream; this type only carries its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    /// Caller without an account.
    Anonymous,
    /// Caller authenticated as a concrete account.
    Identified(IdentifiedActor),
}

impl Actor {
    /// Build an identified actor from its already known attributes.
    pub fn identified(account_id: AccountId, username: Option<Username>) -> Self {
        Self::Identified(IdentifiedActor {
            account_id,
            username,
        })
    }

    pub fn anonymous() -> Self {
        Self::Anonymous
    }

    /// Identity attributes, when the actor is identified.
    pub fn as_identified(&self) -> Option<&IdentifiedActor> {
        match self {
            Self::Identified(identified) => Some(identified),
            Self::Anonymous => None,
        }
    }

    /// Own account id, when the actor is identified.
    pub fn account_id(&self) -> Option<AccountId> {
        self.as_identified().map(IdentifiedActor::account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn anonymous_actor_has_no_account() {
        assert_eq!(Actor::anonymous().account_id(), None);
        assert!(Actor::anonymous().as_identified().is_none());
    }

    #[rstest]
    fn identified_actor_exposes_attributes() {
        let id = AccountId::new(7).expect("valid id");
        let actor = Actor::identified(id, Some(Username::new("alice").expect("valid username")));

        let identified = actor.as_identified().expect("identified actor");
        assert_eq!(actor.account_id(), Some(id));
        assert_eq!(identified.username().map(AsRef::as_ref), Some("alice"));
    }
}
