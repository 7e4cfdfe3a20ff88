//! Group backend that turns every account into its own group.
//!
//! This module implements the [`GroupBackend`] driving port on top of the
//! account directory and visibility ports. It keeps no state of its own:
//! every call re-reads the directory.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Span, info_span, warn};

use crate::domain::ports::{
    AccountDirectory, AccountDirectoryError, AccountVisibility, DirectorySession, GroupBackend,
};
use crate::domain::{
    ACCOUNT_PREFIX, AccountAttribute, AccountId, AccountRecord, Actor, Error, GroupDescriptor,
    GroupMembership, GroupReference, GroupUuid, IdentityToken, NAME_PREFIX, PrefixRange, Username,
    identifier, membership,
};

/// Upper bound on suggestions per call, and on rows per attribute query.
pub const MAX_SUGGESTIONS: usize = 10;

/// Single-user group backend.
#[derive(Clone)]
pub struct SingleUserGroupBackend<D, V> {
    directory: Arc<D>,
    visibility: Arc<V>,
    span: Span,
}

impl<D, V> SingleUserGroupBackend<D, V> {
    /// Create a backend over the given directory and visibility check.
    pub fn new(directory: Arc<D>, visibility: Arc<V>) -> Self {
        Self {
            directory,
            visibility,
            span: info_span!("single_user_group"),
        }
    }

    /// Replace the span under which warnings are logged.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// Strip a rendered-name marker a caller may have echoed back.
pub fn normalize_query(text: &str) -> &str {
    text.strip_prefix(NAME_PREFIX)
        .or_else(|| text.strip_prefix(ACCOUNT_PREFIX))
        .unwrap_or(text)
}

impl From<AccountDirectoryError> for Error {
    fn from(error: AccountDirectoryError) -> Self {
        match error {
            AccountDirectoryError::Connection { message } => {
                Self::service_unavailable(format!("account directory unavailable: {message}"))
            }
            AccountDirectoryError::Query { message } => {
                Self::internal(format!("account directory error: {message}"))
            }
        }
    }
}

/// Matches accumulated during one suggestion call.
struct Suggestions {
    seen: HashSet<AccountId>,
    matches: Vec<GroupReference>,
    limit: usize,
}

impl Suggestions {
    fn with_limit(limit: usize) -> Self {
        Self {
            seen: HashSet::new(),
            matches: Vec::with_capacity(limit),
            limit,
        }
    }

    fn is_full(&self) -> bool {
        self.matches.len() >= self.limit
    }

    /// Record `id`; `false` when an earlier pass already saw it.
    fn first_sighting(&mut self, id: AccountId) -> bool {
        self.seen.insert(id)
    }

    fn push(&mut self, reference: GroupReference) {
        self.matches.push(reference);
    }

    fn into_matches(self) -> Vec<GroupReference> {
        self.matches
    }
}

impl<D, V> SingleUserGroupBackend<D, V>
where
    D: AccountDirectory,
    V: AccountVisibility,
{
    async fn lookup(
        session: &mut D::Session,
        token: &str,
    ) -> Result<Option<AccountRecord>, AccountDirectoryError> {
        match identifier::classify(token) {
            IdentityToken::NumericId(id) => {
                if let Some(account) = session.get_by_id(id).await? {
                    return Ok(Some(account));
                }
                // all-digit usernames share the numeric form
                match Username::new(token) {
                    Ok(username) => session.get_by_username(&username).await,
                    Err(_) => Ok(None),
                }
            }
            IdentityToken::Username(username) => session.get_by_username(&username).await,
            IdentityToken::Unrecognised => Ok(None),
        }
    }

    async fn add(&self, found: &mut Suggestions, requester: &Actor, account: AccountRecord) {
        if !found.first_sighting(account.id()) {
            return;
        }
        if !self.visibility.can_see(requester, account.id()).await {
            return;
        }
        found.push(GroupReference::for_account(&account));
    }

    async fn try_suggest(
        &self,
        needle: &str,
        requester: &Actor,
    ) -> Result<Vec<GroupReference>, AccountDirectoryError> {
        let mut session = self.directory.open_session().await?;
        let mut found = Suggestions::with_limit(MAX_SUGGESTIONS);

        if let Ok(id) = AccountId::parse(needle) {
            if let Some(account) = session.get_by_id(id).await? {
                self.add(&mut found, requester, account).await;
                return Ok(found.into_matches());
            }
        }

        let Some(range) = PrefixRange::for_prefix(needle) else {
            return Ok(found.into_matches());
        };

        for attribute in AccountAttribute::SEARCH_ORDER {
            if found.is_full() {
                break;
            }
            if attribute == AccountAttribute::Username && !Username::is_valid(needle) {
                continue;
            }

            let candidates = session
                .query_by_attribute_range(attribute, &range, MAX_SUGGESTIONS)
                .await?;
            for candidate in candidates {
                if found.is_full() {
                    break;
                }
                // collation order may interleave values outside the prefix
                if !candidate.value().starts_with(needle) {
                    continue;
                }
                self.add(&mut found, requester, candidate.into_account())
                    .await;
            }
        }

        Ok(found.into_matches())
    }
}

#[async_trait]
impl<D, V> GroupBackend for SingleUserGroupBackend<D, V>
where
    D: AccountDirectory,
    V: AccountVisibility,
{
    fn handles(&self, uuid: &GroupUuid) -> bool {
        identifier::handles(uuid)
    }

    async fn get(&self, uuid: &GroupUuid) -> Result<Option<GroupDescriptor>, Error> {
        let token = identifier::decode(uuid)?;
        if matches!(identifier::classify(token), IdentityToken::Unrecognised) {
            return Ok(None);
        }

        let mut session = self.directory.open_session().await?;
        let account = Self::lookup(&mut session, token).await?;
        Ok(account.map(|account| GroupDescriptor::for_account(uuid.clone(), token, &account)))
    }

    async fn suggest(&self, text: &str, requester: &Actor) -> Vec<GroupReference> {
        let needle = normalize_query(text);
        if needle.is_empty() {
            return Vec::new();
        }

        match self.try_suggest(needle, requester).await {
            Ok(matches) => matches,
            Err(error) => {
                warn!(parent: &self.span, %error, query = needle, "cannot suggest users");
                Vec::new()
            }
        }
    }

    fn memberships_of(&self, actor: &Actor) -> GroupMembership {
        membership::memberships_of(actor)
    }
}
