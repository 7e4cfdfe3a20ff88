//! Account records as read from the external directory.
//!
//! Purpose: model the slice of an account this backend needs to resolve and
//! render single-user groups. Records are read-only views; the directory
//! owns the durable state.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Validation errors returned by the account constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    ZeroId,
    InvalidId,
    EmptyUsername,
    UsernameInvalidCharacters,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroId => write!(f, "account id must be positive"),
            Self::InvalidId => write!(f, "account id must be a decimal number without a leading zero"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameInvalidCharacters => write!(
                f,
                "username must start and end with a letter or digit and may only contain letters, digits, '.', '_', '@' or '-'",
            ),
        }
    }
}

impl std::error::Error for AccountValidationError {}

static ACCOUNT_ID_RE: OnceLock<Regex> = OnceLock::new();
static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn account_id_regex() -> &'static Regex {
    ACCOUNT_ID_RE.get_or_init(|| {
        Regex::new("^[1-9][0-9]*$")
            .unwrap_or_else(|error| panic!("account id regex failed to compile: {error}"))
    })
}

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        let pattern = "^([a-zA-Z0-9][a-zA-Z0-9._@-]*[a-zA-Z0-9]|[a-zA-Z0-9])$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Numeric, immutable account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u32")]
pub struct AccountId(u32);

impl AccountId {
    /// Construct an id, rejecting zero.
    pub fn new(value: u32) -> Result<Self, AccountValidationError> {
        if value == 0 {
            return Err(AccountValidationError::ZeroId);
        }
        Ok(Self(value))
    }

    /// Parse the textual form `[1-9][0-9]*`.
    ///
    /// Text outside the pattern, and numbers too large for an id, are
    /// rejected.
    pub fn parse(text: &str) -> Result<Self, AccountValidationError> {
        if !Self::matches_pattern(text) {
            return Err(AccountValidationError::InvalidId);
        }
        let value = text
            .parse::<u32>()
            .map_err(|_| AccountValidationError::InvalidId)?;
        Self::new(value)
    }

    /// Whether `text` has the shape of an account id, regardless of range.
    pub fn matches_pattern(text: &str) -> bool {
        account_id_regex().is_match(text)
    }

    /// Raw numeric value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<AccountId> for u32 {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

/// Unique login name attached to an account.
///
/// ## Invariants
/// - Starts and ends with an ASCII letter or digit.
/// - Interior characters are letters, digits, `.`, `_`, `@` or `-`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, AccountValidationError> {
        let username = username.into();
        if username.is_empty() {
            return Err(AccountValidationError::EmptyUsername);
        }
        if !Self::is_valid(&username) {
            return Err(AccountValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(username))
    }

    /// Whether `text` satisfies the username grammar.
    pub fn is_valid(text: &str) -> bool {
        username_regex().is_match(text)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Read-only account view supplied by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    id: AccountId,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<Username>,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preferred_email: Option<String>,
}

impl AccountRecord {
    /// Bare record with only the id set.
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            username: None,
            full_name: None,
            preferred_email: None,
        }
    }

    /// Attach a username.
    pub fn with_username(mut self, username: Username) -> Self {
        self.username = Some(username);
        self
    }

    /// Attach a full display name.
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Attach a preferred email address.
    pub fn with_preferred_email(mut self, email: impl Into<String>) -> Self {
        self.preferred_email = Some(email.into());
        self
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn username(&self) -> Option<&Username> {
        self.username.as_ref()
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn preferred_email(&self) -> Option<&str> {
        self.preferred_email.as_deref()
    }
}

/// Account attributes the directory can range-query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountAttribute {
    Username,
    FullName,
    PreferredEmail,
    SecondaryEmail,
}

impl AccountAttribute {
    /// Order in which suggestion passes consult the attributes.
    pub const SEARCH_ORDER: [Self; 4] = [
        Self::Username,
        Self::FullName,
        Self::PreferredEmail,
        Self::SecondaryEmail,
    ];

    /// Stable label used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::FullName => "full_name",
            Self::PreferredEmail => "preferred_email",
            Self::SecondaryEmail => "secondary_email",
        }
    }
}

impl fmt::Display for AccountAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
