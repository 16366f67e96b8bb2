//! Repository layer for persistence
//!
//! Handlers and services never touch SQL directly: every domain is behind a
//! narrow store trait. Two engines implement the traits, Postgres for
//! deployments and a volatile in-memory one for local runs and tests.

pub mod clients;
pub mod equipment;
pub mod memory;
pub mod users;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use clients::ClientStore;
pub use equipment::EquipmentStore;
pub use users::UserStore;

/// Store handles for every domain, engine-agnostic
#[derive(Clone)]
pub struct Repository {
    pub equipment: Arc<dyn EquipmentStore>,
    pub users: Arc<dyn UserStore>,
    pub clients: Arc<dyn ClientStore>,
}

impl Repository {
    /// Postgres-backed stores sharing one connection pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: Arc::new(equipment::PgEquipmentStore::new(pool.clone())),
            users: Arc::new(users::PgUserStore::new(pool.clone())),
            clients: Arc::new(clients::PgClientStore::new(pool)),
        }
    }

    /// Volatile stores for running without a database
    pub fn in_memory() -> Self {
        Self {
            equipment: Arc::new(memory::InMemoryEquipmentStore::default()),
            users: Arc::new(memory::InMemoryUserStore::default()),
            clients: Arc::new(memory::InMemoryClientStore::default()),
        }
    }
}
