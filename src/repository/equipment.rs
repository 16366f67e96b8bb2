//! Equipment store

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::equipment::{CreateEquipment, EquipmentRecord},
};

/// Persistence operations for the equipment inventory
#[async_trait]
pub trait EquipmentStore: Send + Sync {
    /// All records in creation (id) order
    async fn list_all(&self) -> AppResult<Vec<EquipmentRecord>>;

    /// Insert a record, stamping `last_updated` with the current server
    /// time, and return the assigned id. Never deduplicates.
    async fn insert(&self, data: &CreateEquipment) -> AppResult<i32>;
}

#[derive(Clone)]
pub struct PgEquipmentStore {
    pool: Pool<Postgres>,
}

impl PgEquipmentStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EquipmentStore for PgEquipmentStore {
    async fn list_all(&self) -> AppResult<Vec<EquipmentRecord>> {
        let rows = sqlx::query_as::<_, EquipmentRecord>("SELECT * FROM equipment ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, data: &CreateEquipment) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO equipment
                (name, rated_power, daily_usage_hours, category, age_years,
                 efficiency_label, notes, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(data.rated_power)
        .bind(data.daily_usage_hours)
        .bind(&data.category)
        .bind(data.age_years)
        .bind(&data.efficiency_label)
        .bind(&data.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }
}
