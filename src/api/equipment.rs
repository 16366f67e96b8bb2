//! Equipment inventory endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppResult, ErrorResponse},
    models::equipment::{CreateEquipment, EquipmentRecord},
};

use super::{AuthenticatedUser, ValidatedJson};

/// Power summary plus the full record list
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub count: usize,
    /// Sum of rated wattages, rounded to two decimals
    pub total_power: f64,
    /// Mean daily usage hours over all records; 0 for an empty inventory
    pub average_daily_usage: f64,
    /// Sum of wattage x hours x 30, rounded to two decimals
    pub estimated_monthly_consumption: f64,
    pub items: Vec<EquipmentItem>,
}

/// Wire projection of one equipment record
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    pub name: String,
    pub rated_power: f64,
    pub daily_usage_hours: f64,
    pub category: Option<String>,
    pub age_years: Option<i32>,
    pub efficiency_label: Option<String>,
    pub notes: Option<String>,
    /// `DD/MM/YYYY HH:MM`, empty when the record was never stamped
    pub last_updated_formatted: String,
}

impl From<EquipmentRecord> for EquipmentItem {
    fn from(record: EquipmentRecord) -> Self {
        let last_updated_formatted = record.last_updated_formatted();
        EquipmentItem {
            name: record.name,
            rated_power: record.rated_power,
            daily_usage_hours: record.daily_usage_hours,
            category: record.category,
            age_years: record.age_years,
            efficiency_label: record.efficiency_label,
            notes: record.notes,
            last_updated_formatted,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CreateEquipmentResponse {
    pub msg: String,
}

/// List the equipment inventory with its power summary
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Inventory with power summary", body = InventoryReport),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin capability required", body = ErrorResponse)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<InventoryReport>> {
    claims.require_admin()?;
    let report = state.services.equipment.inventory().await?;
    Ok(Json(report))
}

/// Add an equipment record
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment added", body = CreateEquipmentResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin capability required", body = ErrorResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CreateEquipment>,
) -> AppResult<(StatusCode, Json<CreateEquipmentResponse>)> {
    claims.require_admin()?;
    state.services.equipment.create(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateEquipmentResponse {
            msg: "Equipment added".to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_item_projection_formats_timestamp() {
        let record = EquipmentRecord {
            id: 3,
            name: "Heat pump".to_string(),
            rated_power: 1200.0,
            daily_usage_hours: 6.0,
            category: Some("hvac".to_string()),
            notes: None,
            age_years: Some(2),
            efficiency_label: Some("A+".to_string()),
            last_updated: Some(Utc.with_ymd_and_hms(2025, 1, 31, 8, 15, 0).unwrap()),
        };

        let item = EquipmentItem::from(record);
        assert_eq!(item.name, "Heat pump");
        assert_eq!(item.last_updated_formatted, "31/01/2025 08:15");
        assert_eq!(item.category.as_deref(), Some("hvac"));
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = InventoryReport {
            count: 0,
            total_power: 0.0,
            average_daily_usage: 0.0,
            estimated_monthly_consumption: 0.0,
            items: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("totalPower").is_some());
        assert!(json.get("averageDailyUsage").is_some());
        assert!(json.get("estimatedMonthlyConsumption").is_some());
    }
}
