//! Group views rendered from account records.
//!
//! Descriptors and references are derived per call and never cached. The
//! rendered name carries a marker telling readers which identifier form
//! backs the group: `user/` for usernames, `userid/` for account ids.

use serde::Serialize;

use super::account::AccountRecord;
use super::identifier::{
    ACCOUNT_PREFIX, GroupUuid, NAME_PREFIX, encode_account_id, encode_username,
    is_account_id_token,
};

/// Description of one single-user group.
///
/// ## Invariants
/// - `url` is always absent.
/// - The group is never visible to everyone; visibility is actor relative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDescriptor {
    uuid: GroupUuid,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl GroupDescriptor {
    /// Describe `account` as the group addressed by `uuid`, whose identity
    /// token is `token`.
    pub(crate) fn for_account(uuid: GroupUuid, token: &str, account: &AccountRecord) -> Self {
        Self {
            name: render_name(token, account),
            email: account.preferred_email().map(str::to_owned),
            url: None,
            uuid,
        }
    }

    pub fn uuid(&self) -> &GroupUuid {
        &self.uuid
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Always `false`: callers must re-check visibility per actor.
    pub fn is_visible_to_all(&self) -> bool {
        false
    }
}

/// Suggestion entry naming one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupReference {
    uuid: GroupUuid,
    name: String,
}

impl GroupReference {
    pub fn new(uuid: GroupUuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
        }
    }

    /// Reference for `account`, preferring the username-based identifier.
    pub fn for_account(account: &AccountRecord) -> Self {
        let (uuid, name) = match account.username() {
            Some(username) => (encode_username(username), render_name(username.as_ref(), account)),
            None => {
                let id = account.id().to_string();
                (encode_account_id(account.id()), render_name(&id, account))
            }
        };
        Self { uuid, name }
    }

    pub fn uuid(&self) -> &GroupUuid {
        &self.uuid
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Human-readable group name for `account` addressed through `token`.
///
/// `Full Name (username)`, `Full Name (id)`, `username` or `id`, prefixed
/// with the marker matching the token form.
pub fn render_name(token: &str, account: &AccountRecord) -> String {
    let label = match (account.full_name(), account.username()) {
        (Some(full_name), Some(username)) => format!("{full_name} ({username})"),
        (Some(full_name), None) => format!("{full_name} ({})", account.id()),
        (None, Some(username)) => username.to_string(),
        (None, None) => account.id().to_string(),
    };
    let marker = if is_account_id_token(token) {
        ACCOUNT_PREFIX
    } else {
        NAME_PREFIX
    };
    format!("{marker}{label}")
}
