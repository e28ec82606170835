//! Bearer-token permission gate.

use axum::http::{header, HeaderMap};
use serde::Serialize;

/// Permissions understood by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    GraphRead,
    WipeDb,
}

/// Permissions granted to the bearer of the given request headers.
///
/// With no admin token configured the instance is open and every caller
/// holds every permission.
pub fn permissions_for(headers: &HeaderMap, admin_token: Option<&str>) -> Vec<Permission> {
    let mut permissions = vec![Permission::GraphRead];
    match admin_token {
        Some(expected) => {
            if bearer_token(headers).as_deref() == Some(expected) {
                permissions.push(Permission::WipeDb);
            }
        }
        None => permissions.push(Permission::WipeDb),
    }
    permissions
}

pub fn has_permission(
    headers: &HeaderMap,
    admin_token: Option<&str>,
    permission: Permission,
) -> bool {
    permissions_for(headers, admin_token).contains(&permission)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_token(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_open_instance_grants_wipe_db() {
        assert!(has_permission(&HeaderMap::new(), None, Permission::WipeDb));
    }

    #[test]
    fn test_matching_token_grants_wipe_db() {
        let headers = headers_with_token("s3cret");
        assert!(has_permission(&headers, Some("s3cret"), Permission::WipeDb));
    }

    #[test]
    fn test_wrong_or_missing_token_denies_wipe_db() {
        let headers = headers_with_token("nope");
        assert!(!has_permission(&headers, Some("s3cret"), Permission::WipeDb));
        assert!(!has_permission(
            &HeaderMap::new(),
            Some("s3cret"),
            Permission::WipeDb
        ));

        // Reads stay open either way.
        assert!(has_permission(&headers, Some("s3cret"), Permission::GraphRead));
    }
}
