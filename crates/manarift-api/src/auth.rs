//! Mock authentication.
//!
//! Real authentication (JWT verify, then user id from the token subject)
//! is not wired up yet. Requests run as a fixed mock user; an
//! `x-user-id` header overrides it, which is also how tests pick their
//! user. The extraction seam is the same one a real middleware would use.

use axum::http::HeaderMap;
use manarift_types::UserId;
use uuid::Uuid;

use crate::error::ApiError;

/// Fixed user id applied when no `x-user-id` header is present. A valid
/// UUID v4 so downstream validation passes.
pub const MOCK_USER_ID: &str = "7a3f2b9e-5c41-4c8a-9d27-6b1f0e8a4d55";

/// Header that overrides the mock user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Resolve the requesting user from headers.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] if the override header is present but
/// not a valid UUID.
pub fn user_id_from_headers(headers: &HeaderMap) -> Result<UserId, ApiError> {
    let raw = match headers.get(USER_ID_HEADER) {
        Some(value) => value
            .to_str()
            .map_err(|_non_ascii| ApiError::Validation(String::from("user id header is not ASCII")))?,
        None => MOCK_USER_ID,
    };

    let uuid = Uuid::parse_str(raw)
        .map_err(|e| ApiError::Validation(format!("user id is not a valid UUID: {e}")))?;
    Ok(UserId::from(uuid))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_falls_back_to_mock_user() {
        let user_id = user_id_from_headers(&HeaderMap::new()).unwrap();
        assert_eq!(user_id.to_string(), MOCK_USER_ID);
    }

    #[test]
    fn header_overrides_mock_user() {
        let mut headers = HeaderMap::new();
        let id = Uuid::new_v4();
        headers.insert(USER_ID_HEADER, id.to_string().parse().unwrap());
        assert_eq!(user_id_from_headers(&headers).unwrap(), UserId::from(id));
    }

    #[test]
    fn malformed_header_is_a_validation_error() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, "not-a-uuid".parse().unwrap());
        assert!(matches!(
            user_id_from_headers(&headers),
            Err(ApiError::Validation(_))
        ));
    }
}
