use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

// CatalogError is returned by the catalog service and its stores.
#[derive(Debug)]
pub enum CatalogError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    // the book or author id does not resolve
    NotFound {
        message: String,
    },
    // throttled or dropped store call, may succeed on retry
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl CatalogError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> CatalogError {
        CatalogError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> CatalogError {
        CatalogError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn not_found(message: &str) -> CatalogError {
        CatalogError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> CatalogError {
        CatalogError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> CatalogError {
        CatalogError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> CatalogError {
        CatalogError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> CatalogError {
        CatalogError::Runtime { message: message.to_string(), reason_code }
    }

    // Classifies a failed store call using the HTTP status carried in `reason`.
    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> CatalogError {
        if retryable {
            return CatalogError::unavailable(&format!("store unavailable: {}", message), reason, true);
        }
        match reason.as_deref() {
            Some(code) if code.contains("404") => {
                CatalogError::not_found(&format!("store item not found: {}", message))
            }
            Some(code) if code.contains("400") => {
                CatalogError::access_denied(&format!("store rejected request: {}", message), reason)
            }
            _ => CatalogError::database(&format!("store failure: {}", message), reason, false),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CatalogError::Database { message, .. } |
            CatalogError::AccessDenied { message, .. } |
            CatalogError::NotFound { message } |
            CatalogError::CurrentlyUnavailable { message, .. } |
            CatalogError::Validation { message, .. } |
            CatalogError::Serialization { message } |
            CatalogError::Runtime { message, .. } => message.as_str(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::serialization(&format!("invalid book json {}", err))
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Database { reason_code: Some(code), .. } |
            CatalogError::AccessDenied { reason_code: Some(code), .. } |
            CatalogError::CurrentlyUnavailable { reason_code: Some(code), .. } |
            CatalogError::Validation { reason_code: Some(code), .. } |
            CatalogError::Runtime { reason_code: Some(code), .. } => {
                write!(f, "{} ({})", self.message(), code)
            }
            _ => write!(f, "{}", self.message()),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

// Role granted to a caller by the upstream authorizer. Only the API boundary looks at roles.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum Role {
    Librarian,
    User,
    Anonymous,
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        let upper = s.trim().to_ascii_uppercase();
        match upper.strip_prefix("ROLE_").unwrap_or(upper.as_str()) {
            "LIBRARIAN" => Role::Librarian,
            "USER" => Role::User,
            _ => Role::Anonymous,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Role::Librarian => write!(f, "ROLE_LIBRARIAN"),
            Role::User => write!(f, "ROLE_USER"),
            Role::Anonymous => write!(f, "ROLE_ANONYMOUS"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{CatalogError, Role};

    #[tokio::test]
    async fn test_should_classify_store_errors() {
        assert!(matches!(CatalogError::database_or_unavailable("test", None, true), CatalogError::CurrentlyUnavailable { retryable: true, .. }));
        assert!(matches!(CatalogError::database_or_unavailable("test", Some("404".to_string()), false), CatalogError::NotFound { .. }));
        assert!(matches!(CatalogError::database_or_unavailable("test", Some("400".to_string()), false), CatalogError::AccessDenied { .. }));
        assert!(matches!(CatalogError::database_or_unavailable("test", Some("500".to_string()), false), CatalogError::Database { retryable: false, .. }));
        assert!(matches!(CatalogError::database_or_unavailable("test", None, false), CatalogError::Database { .. }));
    }

    #[tokio::test]
    async fn test_should_detect_not_found() {
        let err = CatalogError::not_found("book 42");
        assert!(err.is_not_found());
        assert_eq!("book 42", err.to_string());
        assert!(!CatalogError::runtime("test", None).is_not_found());
    }

    #[tokio::test]
    async fn test_should_display_reason_code() {
        let err = CatalogError::validation("unknown author 7", Some("author".to_string()));
        assert_eq!("unknown author 7 (author)", err.to_string());
        assert_eq!("unknown author 7", err.message());
    }

    #[tokio::test]
    async fn test_should_parse_roles() {
        assert_eq!(Role::Librarian, Role::from("ROLE_LIBRARIAN".to_string()));
        assert_eq!(Role::Librarian, Role::from("librarian".to_string()));
        assert_eq!(Role::User, Role::from(" role_user ".to_string()));
        assert_eq!(Role::Anonymous, Role::from("ROLE_ADMIN".to_string()));
        for role in [Role::Librarian, Role::User, Role::Anonymous] {
            assert_eq!(role, Role::from(role.to_string()));
        }
    }
}
