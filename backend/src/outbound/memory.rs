//! In-memory account directory.
//!
//! Backs the directory port with ordered maps so hosts and tests can run the
//! backend without a database. Sessions are counted on open and on drop,
//! which makes scoped release observable, and failures can be injected to
//! exercise error paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{
    AccountDirectory, AccountDirectoryError, AttributeMatch, DirectorySession,
};
use crate::domain::{AccountAttribute, AccountId, AccountRecord, PrefixRange, Username};

#[derive(Debug, Default)]
struct DirectoryState {
    accounts: BTreeMap<AccountId, AccountRecord>,
    secondary_emails: BTreeMap<AccountId, Vec<String>>,
    open_failure: Option<AccountDirectoryError>,
    query_failure: Option<AccountDirectoryError>,
}

impl DirectoryState {
    fn check_queries(&self) -> Result<(), AccountDirectoryError> {
        match &self.query_failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn attribute_values(&self, attribute: AccountAttribute) -> Vec<(String, AccountId)> {
        match attribute {
            AccountAttribute::Username => self.single_values(|a| a.username().map(AsRef::as_ref)),
            AccountAttribute::FullName => self.single_values(AccountRecord::full_name),
            AccountAttribute::PreferredEmail => self.single_values(AccountRecord::preferred_email),
            AccountAttribute::SecondaryEmail => self
                .secondary_emails
                .iter()
                .flat_map(|(id, emails)| emails.iter().map(|email| (email.clone(), *id)))
                .collect(),
        }
    }

    fn single_values<F>(&self, value_of: F) -> Vec<(String, AccountId)>
    where
        F: Fn(&AccountRecord) -> Option<&str>,
    {
        self.accounts
            .values()
            .filter_map(|account| value_of(account).map(|value| (value.to_owned(), account.id())))
            .collect()
    }
}

#[derive(Debug, Default)]
struct SessionCounters {
    opened: AtomicUsize,
    live: AtomicUsize,
}

/// Directory holding accounts in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountDirectory {
    state: Arc<RwLock<DirectoryState>>,
    counters: Arc<SessionCounters>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account.
    pub fn insert(&self, account: AccountRecord) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.accounts.insert(account.id(), account);
    }

    /// Attach a secondary email address to an account.
    pub fn add_secondary_email(&self, id: AccountId, email: impl Into<String>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.secondary_emails.entry(id).or_default().push(email.into());
    }

    /// Make subsequent `open_session` calls fail with `error`.
    pub fn fail_open_with(&self, error: Option<AccountDirectoryError>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.open_failure = error;
    }

    /// Make subsequent lookups and range queries fail with `error`.
    pub fn fail_queries_with(&self, error: Option<AccountDirectoryError>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.query_failure = error;
    }

    /// Total sessions opened so far.
    pub fn sessions_opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    /// Sessions opened and not yet released.
    pub fn live_sessions(&self) -> usize {
        self.counters.live.load(Ordering::SeqCst)
    }
}

/// Session over an [`InMemoryAccountDirectory`].
#[derive(Debug)]
pub struct InMemorySession {
    state: Arc<RwLock<DirectoryState>>,
    counters: Arc<SessionCounters>,
}

impl InMemorySession {
    fn read<T>(&self, f: impl FnOnce(&DirectoryState) -> T) -> T {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }
}

impl Drop for InMemorySession {
    fn drop(&mut self) {
        self.counters.live.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DirectorySession for InMemorySession {
    async fn get_by_id(
        &mut self,
        id: AccountId,
    ) -> Result<Option<AccountRecord>, AccountDirectoryError> {
        self.read(|state| {
            state.check_queries()?;
            Ok(state.accounts.get(&id).cloned())
        })
    }

    async fn get_by_username(
        &mut self,
        username: &Username,
    ) -> Result<Option<AccountRecord>, AccountDirectoryError> {
        self.read(|state| {
            state.check_queries()?;
            Ok(state
                .accounts
                .values()
                .find(|account| account.username() == Some(username))
                .cloned())
        })
    }

    async fn query_by_attribute_range(
        &mut self,
        attribute: AccountAttribute,
        range: &PrefixRange,
        limit: usize,
    ) -> Result<Vec<AttributeMatch>, AccountDirectoryError> {
        self.read(|state| {
            state.check_queries()?;

            let mut values = state.attribute_values(attribute);
            values.retain(|(value, _)| range.contains(value));
            values.sort();
            Ok(values
                .into_iter()
                .filter_map(|(value, id)| {
                    let account = state.accounts.get(&id)?.clone();
                    Some(AttributeMatch::new(value, account))
                })
                .take(limit)
                .collect())
        })
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    type Session = InMemorySession;

    async fn open_session(&self) -> Result<Self::Session, AccountDirectoryError> {
        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(error) = &state.open_failure {
                return Err(error.clone());
            }
        }

        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        self.counters.live.fetch_add(1, Ordering::SeqCst);
        Ok(InMemorySession {
            state: Arc::clone(&self.state),
            counters: Arc::clone(&self.counters),
        })
    }
}
