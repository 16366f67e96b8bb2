//! In-memory store engine
//!
//! Backs local runs when no database is configured, and the HTTP-level
//! tests. State lives behind `RwLock`s and vanishes on shutdown.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        client::ClientRecord,
        equipment::{CreateEquipment, EquipmentRecord},
        user::{NewUser, User},
    },
};

use super::{ClientStore, EquipmentStore, UserStore};

fn poisoned(which: &str) -> AppError {
    AppError::Internal(format!("{} store lock poisoned", which))
}

#[derive(Default)]
pub struct InMemoryEquipmentStore {
    records: RwLock<Vec<EquipmentRecord>>,
}

impl InMemoryEquipmentStore {
    /// Current record count, for assertions around denied writes
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EquipmentStore for InMemoryEquipmentStore {
    async fn list_all(&self) -> AppResult<Vec<EquipmentRecord>> {
        let records = self.records.read().map_err(|_| poisoned("equipment"))?;
        Ok(records.clone())
    }

    async fn insert(&self, data: &CreateEquipment) -> AppResult<i32> {
        let mut records = self.records.write().map_err(|_| poisoned("equipment"))?;
        // No deletes in this store, so length + 1 stays unique.
        let id = records.len() as i32 + 1;
        records.push(EquipmentRecord {
            id,
            name: data.name.clone(),
            rated_power: data.rated_power,
            daily_usage_hours: data.daily_usage_hours,
            category: data.category.clone(),
            notes: data.notes.clone(),
            age_years: data.age_years,
            efficiency_label: data.efficiency_label.clone(),
            last_updated: Some(Utc::now()),
        });
        Ok(id)
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: &NewUser) -> AppResult<User> {
        let mut users = self.users.write().map_err(|_| poisoned("user"))?;
        let created = User {
            id: users.len() as i32 + 1,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(|_| poisoned("user"))?;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let users = self.users.read().map_err(|_| poisoned("user"))?;
        Ok(users.iter().any(|u| u.username == username))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().map_err(|_| poisoned("user"))?;
        Ok(users.clone())
    }
}

#[derive(Default)]
pub struct InMemoryClientStore {
    clients: RwLock<Vec<ClientRecord>>,
}

impl InMemoryClientStore {
    /// Seed a client row (no HTTP write surface exists for clients)
    pub fn push(&self, record: ClientRecord) {
        if let Ok(mut clients) = self.clients.write() {
            clients.push(record);
        }
    }
}

#[async_trait]
impl ClientStore for InMemoryClientStore {
    async fn count_active(&self) -> AppResult<i64> {
        let clients = self.clients.read().map_err(|_| poisoned("client"))?;
        Ok(clients.iter().filter(|c| c.active).count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equipment(name: &str) -> CreateEquipment {
        CreateEquipment {
            name: name.to_string(),
            rated_power: 100.0,
            daily_usage_hours: 2.0,
            category: None,
            age_years: None,
            efficiency_label: None,
            notes: None,
        }
    }

    fn client(active: bool) -> ClientRecord {
        ClientRecord {
            id: 0,
            name: None,
            source: None,
            active,
            last_seen: None,
        }
    }

    #[tokio::test]
    async fn test_equipment_ids_are_sequential_and_stamped() {
        let store = InMemoryEquipmentStore::default();
        assert_eq!(store.insert(&equipment("a")).await.unwrap(), 1);
        assert_eq!(store.insert(&equipment("b")).await.unwrap(), 2);

        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "a");
        assert!(records[0].last_updated.is_some());
    }

    #[tokio::test]
    async fn test_identical_inserts_create_distinct_records() {
        let store = InMemoryEquipmentStore::default();
        let first = store.insert(&equipment("dup")).await.unwrap();
        let second = store.insert(&equipment("dup")).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_count_active_ignores_inactive_clients() {
        let store = InMemoryClientStore::default();
        store.push(client(true));
        store.push(client(false));
        store.push(client(true));
        assert_eq!(store.count_active().await.unwrap(), 2);
    }
}
