//! Platform principal endpoint
//!
//! Deployments behind the platform edge receive the caller's identity as a
//! base64 JSON blob in the `x-ms-client-principal` header. This endpoint
//! decodes it back into a structured principal; it does not consult the
//! account store and is independent of the bearer-token session flow.

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppError, models::principal::ClientPrincipal};

/// Header carrying the encoded principal
pub const PRINCIPAL_HEADER: &str = "x-ms-client-principal";

/// 401 body when the request carries no principal header at all. The empty
/// `roles` array is part of the wire contract.
#[derive(Serialize, ToSchema)]
pub struct MissingHeaderResponse {
    pub roles: Vec<String>,
    pub error: String,
}

/// Decode the platform authentication header into the caller's principal
#[utoipa::path(
    get,
    path = "/principal",
    tag = "principal",
    responses(
        (status = 200, description = "Decoded caller principal", body = ClientPrincipal),
        (status = 401, description = "Header absent or undecodable", body = MissingHeaderResponse)
    )
)]
pub async fn get_principal(headers: HeaderMap) -> Response {
    let Some(value) = headers.get(PRINCIPAL_HEADER) else {
        let body = MissingHeaderResponse {
            roles: vec![],
            error: "No authentication header found".to_string(),
        };
        return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    };

    let Ok(encoded) = value.to_str() else {
        return AppError::Authentication("invalid authentication header".to_string())
            .into_response();
    };

    match ClientPrincipal::from_header_value(encoded) {
        Ok(principal) => Json(principal).into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_gets_the_fixed_401_body() {
        let response = get_principal(HeaderMap::new()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["roles"], serde_json::json!([]));
        assert_eq!(body["error"], "No authentication header found");
    }

    #[tokio::test]
    async fn test_valid_header_is_projected() {
        let blob = STANDARD.encode(r#"{"userDetails":"jane","userRoles":["authenticated"]}"#);
        let mut headers = HeaderMap::new();
        headers.insert(PRINCIPAL_HEADER, HeaderValue::from_str(&blob).unwrap());

        let response = get_principal(headers).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["userDetails"], "jane");
        assert_eq!(body["userRoles"], serde_json::json!(["authenticated"]));
    }

    #[tokio::test]
    async fn test_garbage_header_is_a_plain_401() {
        let mut headers = HeaderMap::new();
        headers.insert(PRINCIPAL_HEADER, HeaderValue::from_static("not base64!!"));

        let response = get_principal(headers).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "invalid authentication header");
    }
}
