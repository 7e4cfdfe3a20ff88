//! Domain-level error types.
//!
//! These errors are host agnostic. The registry and the host map them to
//! whatever envelope their callers expect.

use serde::Serialize;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A backend was asked about an identifier it does not handle.
    InvalidIdentifier,
    /// The account directory could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain or directory.
    InternalError,
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use single_user_group::domain::{Error, ErrorCode};
///
/// let err = Error::invalid_identifier("ldap:admins");
/// assert_eq!(err.code(), ErrorCode::InvalidIdentifier);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Create a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Contract violation: `uuid` is not owned by the backend that was asked.
    pub fn invalid_identifier(uuid: impl AsRef<str>) -> Self {
        Self::new(
            ErrorCode::InvalidIdentifier,
            format!("single user group backend does not handle {}", uuid.as_ref()),
        )
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn invalid_identifier_names_the_offending_uuid() {
        let err = Error::invalid_identifier("ldap:admins");
        assert_eq!(err.code(), ErrorCode::InvalidIdentifier);
        assert_eq!(
            err.to_string(),
            "single user group backend does not handle ldap:admins"
        );
    }

    #[rstest]
    #[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
    #[case(Error::internal("boom"), ErrorCode::InternalError)]
    fn constructors_set_codes(#[case] err: Error, #[case] expected: ErrorCode) {
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    fn serializes_with_snake_case_code() {
        let value = serde_json::to_value(Error::service_unavailable("down")).expect("serialize");
        assert_eq!(
            value,
            json!({ "code": "service_unavailable", "message": "down" })
        );
    }
}
