//! Equipment model

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Timestamp wire format: `DD/MM/YYYY HH:MM`, 24-hour clock.
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// One piece of metered equipment
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct EquipmentRecord {
    /// Assigned by the store on insert; unique and immutable.
    pub id: i32,
    pub name: String,
    /// Rated wattage. Sign and range are not validated.
    pub rated_power: f64,
    /// Hours of use per day. Same numeric laxity as `rated_power`.
    pub daily_usage_hours: f64,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub age_years: Option<i32>,
    /// Short energy-efficiency class code
    pub efficiency_label: Option<String>,
    /// Server clock at the moment the create was accepted; never mutated.
    pub last_updated: Option<DateTime<Utc>>,
}

impl EquipmentRecord {
    /// Render `last_updated` for the wire, or an empty string when unset.
    pub fn last_updated_formatted(&self) -> String {
        self.last_updated
            .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default()
    }
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub rated_power: f64,
    pub daily_usage_hours: f64,
    pub category: Option<String>,
    pub age_years: Option<i32>,
    pub efficiency_label: Option<String>,
    pub notes: Option<String>,
}
