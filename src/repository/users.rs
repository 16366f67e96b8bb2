//! Users store

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::user::{NewUser, User},
};

/// Persistence operations for accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert an account and return it with its assigned id
    async fn insert(&self, user: &NewUser) -> AppResult<User>;

    /// Exact-match lookup by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Check whether a username is already taken
    async fn username_exists(&self, username: &str) -> AppResult<bool>;

    /// All accounts in registration order
    async fn list(&self) -> AppResult<Vec<User>>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: Pool<Postgres>,
}

impl PgUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: &NewUser) -> AppResult<User> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
        })
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }
}
