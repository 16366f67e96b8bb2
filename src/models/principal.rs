//! Client principal decoding

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Identity of the platform-authenticated caller, carried base64-encoded in
/// the `x-ms-client-principal` request header.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientPrincipal {
    pub user_details: Option<String>,
    pub user_id: Option<String>,
    pub identity_provider: Option<String>,
    #[serde(default)]
    pub user_roles: Vec<String>,
}

impl ClientPrincipal {
    /// Decode the base64 JSON blob from the header value. Pure projection,
    /// no state; unknown keys in the blob are ignored.
    pub fn from_header_value(encoded: &str) -> AppResult<Self> {
        let decoded = STANDARD
            .decode(encoded)
            .map_err(|_| AppError::Authentication("invalid authentication header".to_string()))?;
        serde_json::from_slice(&decoded)
            .map_err(|_| AppError::Authentication("invalid authentication header".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(json: &str) -> String {
        STANDARD.encode(json.as_bytes())
    }

    #[test]
    fn test_decode_full_principal() {
        let blob = encode(
            r#"{"userDetails":"jane","userId":"u-1","identityProvider":"aad","userRoles":["authenticated","admin"]}"#,
        );
        let principal = ClientPrincipal::from_header_value(&blob).unwrap();
        assert_eq!(principal.user_details.as_deref(), Some("jane"));
        assert_eq!(principal.user_id.as_deref(), Some("u-1"));
        assert_eq!(principal.identity_provider.as_deref(), Some("aad"));
        assert_eq!(principal.user_roles, vec!["authenticated", "admin"]);
    }

    #[test]
    fn test_decode_defaults_roles_to_empty() {
        let blob = encode(r#"{"userDetails":"jane"}"#);
        let principal = ClientPrincipal::from_header_value(&blob).unwrap();
        assert!(principal.user_roles.is_empty());
        assert!(principal.user_id.is_none());
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(ClientPrincipal::from_header_value("not base64!!").is_err());
    }

    #[test]
    fn test_decode_rejects_bad_json() {
        let blob = encode("plain text");
        assert!(ClientPrincipal::from_header_value(&blob).is_err());
    }
}
