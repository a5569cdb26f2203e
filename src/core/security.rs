use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use crate::core::controller::ServerError;
use crate::core::library::Role;

pub(crate) const USER_ID_HEADER: &str = "x-user-id";
pub(crate) const USER_ROLES_HEADER: &str = "x-user-roles";

pub(crate) const READ_ROLES: &[Role] = &[Role::Librarian, Role::User];
pub(crate) const WRITE_ROLES: &[Role] = &[Role::Librarian];

// Principal is the caller identity asserted by the upstream authorizer (API gateway).
// Handlers check roles here so that the catalog service never sees them.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Principal {
    pub user_id: Option<String>,
    pub roles: Vec<Role>,
}

impl Principal {
    pub(crate) fn from_headers(headers: &HeaderMap) -> Result<Self, ServerError> {
        let roles = headers.get(USER_ROLES_HEADER)
            .ok_or((StatusCode::UNAUTHORIZED, "missing caller roles".to_string()))?
            .to_str()
            .map_err(|err| (StatusCode::UNAUTHORIZED, format!("invalid caller roles {}", err)))?
            .split(',')
            .filter(|r| !r.trim().is_empty())
            .map(|r| Role::from(r.to_string()))
            .collect();
        let user_id = headers.get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(Principal { user_id, roles })
    }

    pub(crate) fn has_any_role(&self, allowed: &[Role]) -> bool {
        self.roles.iter().any(|r| allowed.contains(r))
    }

    pub(crate) fn require_any_role(&self, allowed: &[Role]) -> Result<(), ServerError> {
        if self.has_any_role(allowed) {
            return Ok(());
        }
        tracing::warn!(user_id = ?self.user_id, roles = ?self.roles, "caller lacks required role");
        Err((StatusCode::FORBIDDEN, format!("access denied, requires one of {:?}", allowed)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal where S: Send + Sync {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Principal::from_headers(&parts.headers)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, StatusCode};
    use crate::core::library::Role;
    use crate::core::security::{Principal, READ_ROLES, USER_ID_HEADER, USER_ROLES_HEADER, WRITE_ROLES};

    #[tokio::test]
    async fn test_should_reject_missing_roles() {
        let (status, _) = Principal::from_headers(&HeaderMap::new()).expect_err("should be unauthenticated");
        assert_eq!(StatusCode::UNAUTHORIZED, status);
    }

    #[tokio::test]
    async fn test_should_parse_principal() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ROLES_HEADER, HeaderValue::from_static("ROLE_USER, ROLE_LIBRARIAN"));
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("ana"));
        let principal = Principal::from_headers(&headers).expect("should parse principal");
        assert_eq!(Some("ana".to_string()), principal.user_id);
        assert_eq!(vec![Role::User, Role::Librarian], principal.roles);
        assert!(principal.require_any_role(WRITE_ROLES).is_ok());
    }

    #[tokio::test]
    async fn test_should_enforce_roles() {
        let patron = Principal { user_id: None, roles: vec![Role::User] };
        assert!(patron.require_any_role(READ_ROLES).is_ok());
        let (status, _) = patron.require_any_role(WRITE_ROLES).expect_err("should be forbidden");
        assert_eq!(StatusCode::FORBIDDEN, status);

        let nobody = Principal { user_id: None, roles: vec![] };
        assert!(!nobody.has_any_role(READ_ROLES));
    }
}
