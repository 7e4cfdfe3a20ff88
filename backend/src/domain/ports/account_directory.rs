//! Driven port for the external account directory.
//!
//! The directory owns account storage and indexing; this backend only issues
//! point lookups and prefix range queries against it. Every unit of work
//! runs inside a [`DirectorySession`] opened from the [`AccountDirectory`].
//! Dropping the session releases whatever it holds (a pooled connection, a
//! read lock), so release happens on every exit path, including `?`.

use async_trait::async_trait;

use crate::domain::{AccountAttribute, AccountId, AccountRecord, PrefixRange, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account directory adapters.
    pub enum AccountDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } => "account directory connection failed: {message}",
        /// Query failed during execution or returned malformed rows.
        Query { message: String } => "account directory query failed: {message}",
    }
}

/// One row of a range query: the attribute value that matched and the
/// account it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMatch {
    value: String,
    account: AccountRecord,
}

impl AttributeMatch {
    pub fn new(value: impl Into<String>, account: AccountRecord) -> Self {
        Self {
            value: value.into(),
            account,
        }
    }

    /// Attribute value that fell inside the queried range.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    pub fn account(&self) -> &AccountRecord {
        &self.account
    }

    pub fn into_account(self) -> AccountRecord {
        self.account
    }
}

/// Scoped access to the directory.
#[async_trait]
pub trait DirectorySession: Send {
    /// Fetch an account by numeric id.
    async fn get_by_id(
        &mut self,
        id: AccountId,
    ) -> Result<Option<AccountRecord>, AccountDirectoryError>;

    /// Fetch an account by username.
    async fn get_by_username(
        &mut self,
        username: &Username,
    ) -> Result<Option<AccountRecord>, AccountDirectoryError>;

    /// Return up to `limit` entries whose `attribute` lies in `range`,
    /// ordered by attribute value.
    ///
    /// Adapters may return values outside the range when their collation
    /// disagrees with code point order; callers re-check the prefix.
    async fn query_by_attribute_range(
        &mut self,
        attribute: AccountAttribute,
        range: &PrefixRange,
        limit: usize,
    ) -> Result<Vec<AttributeMatch>, AccountDirectoryError>;
}

/// Factory for directory sessions.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    type Session: DirectorySession;

    /// Acquire a session; released when the returned value is dropped.
    async fn open_session(&self) -> Result<Self::Session, AccountDirectoryError>;
}
