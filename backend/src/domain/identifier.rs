//! Synthetic group identifiers.
//!
//! Every account is addressable as a group through `user:<token>`, where the
//! token is either the decimal account id or the username. These helpers are
//! pure and never touch the directory.

use std::fmt;

use serde::Serialize;

use super::account::{AccountId, Username};
use super::error::Error;

/// Marker that prefixes every identifier owned by this backend.
pub const UUID_PREFIX: &str = "user:";
/// Marker prepended to rendered names of username-backed groups.
pub const NAME_PREFIX: &str = "user/";
/// Marker prepended to rendered names of id-backed groups.
pub const ACCOUNT_PREFIX: &str = "userid/";

/// Host-wide group identifier.
///
/// Any backend may own a given value; use [`handles`] to check whether this
/// backend does.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct GroupUuid(String);

impl GroupUuid {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self(uuid.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for GroupUuid {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for GroupUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<GroupUuid> for String {
    fn from(value: GroupUuid) -> Self {
        value.0
    }
}

/// Classification of an identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityToken {
    /// Token of the form `[1-9][0-9]*` within the account id range.
    NumericId(AccountId),
    /// Token satisfying the username grammar.
    Username(Username),
    /// Token that can never name an account.
    Unrecognised,
}

/// Whether `uuid` belongs to this backend.
pub fn handles(uuid: &GroupUuid) -> bool {
    uuid.as_str().starts_with(UUID_PREFIX)
}

/// Prefix `token` with the identifier marker.
pub fn encode(token: &str) -> GroupUuid {
    GroupUuid(format!("{UUID_PREFIX}{token}"))
}

/// Identifier derived from an account id.
pub fn encode_account_id(id: AccountId) -> GroupUuid {
    encode(&id.to_string())
}

/// Identifier derived from a username.
pub fn encode_username(username: &Username) -> GroupUuid {
    encode(username.as_ref())
}

/// Strip the identifier marker.
///
/// # Errors
///
/// Returns [`ErrorCode::InvalidIdentifier`](super::ErrorCode::InvalidIdentifier)
/// when `uuid` lacks the marker. Callers are expected to check [`handles`]
/// first.
pub fn decode(uuid: &GroupUuid) -> Result<&str, Error> {
    uuid.as_str()
        .strip_prefix(UUID_PREFIX)
        .ok_or_else(|| Error::invalid_identifier(uuid))
}

/// Decide which kind of account reference `token` is.
pub fn classify(token: &str) -> IdentityToken {
    if let Ok(id) = AccountId::parse(token) {
        return IdentityToken::NumericId(id);
    }
    match Username::new(token) {
        Ok(username) => IdentityToken::Username(username),
        Err(_) => IdentityToken::Unrecognised,
    }
}

/// Whether a token renders with the account-id marker.
pub(crate) fn is_account_id_token(token: &str) -> bool {
    AccountId::matches_pattern(token)
}
