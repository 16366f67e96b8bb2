//! Client record model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A client known to the local database. Rows are produced by external CRM
/// sync jobs; this server only counts the active ones for the dashboard.
#[derive(Debug, Clone, FromRow)]
pub struct ClientRecord {
    pub id: i32,
    pub name: Option<String>,
    /// Originating system (e.g. "hubspot", "pipedrive")
    pub source: Option<String>,
    pub active: bool,
    pub last_seen: Option<DateTime<Utc>>,
}
