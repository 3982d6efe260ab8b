//! Admin token check for the stats and dashboard endpoints.
//!
//! A single shared secret (`ADMIN_TOKEN`), sent either as
//! `Authorization: Bearer <token>` or as `?token=<token>`. There are no
//! users or sessions.

use axum::{
    extract::{FromRequestParts, Query},
    http::{header::AUTHORIZATION, request::Parts, Uri},
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor that requires the admin token.
///
/// ```rust,ignore
/// async fn stats(_admin: RequireAdmin, State(state): State<AppState>) -> ApiResult<Json<OrderStats>> {
///     ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.admin_token.as_deref() else {
            return Err(ApiError::Unauthorized);
        };

        let header_token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_bearer_token)
            .map(str::to_string);

        let presented = header_token.or_else(|| query_token(&parts.uri));

        match presented {
            Some(token) if token == expected => Ok(RequireAdmin),
            _ => Err(ApiError::Unauthorized),
        }
    }
}

/// Extract bearer token from an Authorization header value.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Percent-decoded `?token=` value, if any.
fn query_token(uri: &Uri) -> Option<String> {
    let Query(query) = Query::<TokenQuery>::try_from_uri(uri).ok()?;
    query.token.filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("Basic abc"), None);
    }

    fn token_of(uri: &str) -> Option<String> {
        query_token(&uri.parse::<Uri>().unwrap())
    }

    #[test]
    fn test_query_token() {
        assert_eq!(token_of("/api/stats?token=abc").as_deref(), Some("abc"));
        assert_eq!(token_of("/api/stats?limit=5&token=abc").as_deref(), Some("abc"));
        assert_eq!(token_of("/api/stats?token="), None);
        assert_eq!(token_of("/api/stats?tokens=abc"), None);
        assert_eq!(token_of("/api/stats"), None);
    }

    #[test]
    fn test_query_token_is_percent_decoded() {
        assert_eq!(token_of("/api/stats?token=a%2Bb%26c%25d").as_deref(), Some("a+b&c%d"));
        assert_eq!(token_of("/api/stats?token=two+words").as_deref(), Some("two words"));
    }
}
