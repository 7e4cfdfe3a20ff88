//! Driven port deciding whether an actor may see an account.

use async_trait::async_trait;

use crate::domain::{AccountId, Actor};

/// Authorization check consulted before an account is disclosed.
///
/// Denial is silent: callers drop the account without telling the requester
/// that it exists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountVisibility: Send + Sync {
    /// Whether `requester` may observe `account`.
    async fn can_see(&self, requester: &Actor, account: AccountId) -> bool;
}
