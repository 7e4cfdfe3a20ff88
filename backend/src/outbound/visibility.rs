//! Visibility adapters.
//!
//! [`VisibilityPolicy`] mirrors the host-wide account visibility setting.
//! [`AllowListVisibility`] grants sight of specific accounts to specific
//! viewers. In both, an identified actor always sees their own account.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::domain::ports::AccountVisibility;
use crate::domain::{AccountId, Actor};

/// Error returned when a visibility policy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown account visibility policy: {value}")]
pub struct UnknownVisibilityPolicy {
    value: String,
}

/// Host-wide account visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisibilityPolicy {
    /// Every account is visible to every actor.
    #[default]
    All,
    /// Actors only see their own account.
    None,
}

impl FromStr for VisibilityPolicy {
    type Err = UnknownVisibilityPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "none" => Ok(Self::None),
            _ => Err(UnknownVisibilityPolicy {
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for VisibilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::None => f.write_str("none"),
        }
    }
}

#[async_trait]
impl AccountVisibility for VisibilityPolicy {
    async fn can_see(&self, requester: &Actor, account: AccountId) -> bool {
        if requester.account_id() == Some(account) {
            return true;
        }
        matches!(self, Self::All)
    }
}

/// Explicit viewer-to-account grants.
#[derive(Debug, Clone, Default)]
pub struct AllowListVisibility {
    grants: HashMap<AccountId, HashSet<AccountId>>,
}

impl AllowListVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `viewer` see `account`.
    #[must_use]
    pub fn grant(mut self, viewer: AccountId, account: AccountId) -> Self {
        self.grants.entry(viewer).or_default().insert(account);
        self
    }
}

#[async_trait]
impl AccountVisibility for AllowListVisibility {
    async fn can_see(&self, requester: &Actor, account: AccountId) -> bool {
        let Some(viewer) = requester.account_id() else {
            return false;
        };
        viewer == account
            || self
                .grants
                .get(&viewer)
                .is_some_and(|visible| visible.contains(&account))
    }
}
