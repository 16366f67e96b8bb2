//! Dashboard overview endpoint

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppResult, ErrorResponse};

use super::AuthenticatedUser;

/// Aggregated dashboard numbers. A CRM slot is `null` when that vendor
/// could not be reached.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    /// Local active clients plus every reachable CRM count
    pub total_clients: i64,
    pub new_leads: i64,
    pub alerts: i64,
    pub crm: BTreeMap<String, Option<i64>>,
}

/// Dashboard overview, open to any authenticated account
#[utoipa::path(
    get,
    path = "/overview",
    tag = "overview",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Aggregated dashboard counts", body = OverviewResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn get_overview(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<OverviewResponse>> {
    let overview = state.services.overview.overview().await?;
    Ok(Json(overview))
}
