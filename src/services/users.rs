//! Account registration and session service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{NewUser, Role, User, UserClaims, UserSummary},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new account. Usernames are unique; the role defaults to
    /// operator when not supplied.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Option<Role>,
    ) -> AppResult<User> {
        if self.repository.users.username_exists(username).await? {
            return Err(AppError::Conflict("user already exists".to_string()));
        }

        let user = NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: self.hash_password(password)?,
            role: role.unwrap_or(Role::Operator),
        };
        self.repository.users.insert(&user).await
    }

    /// Authenticate by username and password and mint a session token.
    /// Unknown user and wrong password are indistinguishable to the caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !self.verify_password(&user, password)? {
            return Err(invalid_credentials());
        }

        let now = Utc::now().timestamp();
        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            role: user.role,
            exp: now + self.config.jwt_expiration_hours as i64 * 3600,
            iat: now,
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok((token, user))
    }

    /// Full account list in registration order
    pub async fn list(&self) -> AppResult<Vec<UserSummary>> {
        let users = self.repository.users.list().await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    /// Create the bootstrap admin account unless the username is taken
    pub async fn ensure_admin(&self, username: &str, email: &str, password: &str) -> AppResult<()> {
        if self.repository.users.username_exists(username).await? {
            return Ok(());
        }

        let user = NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: self.hash_password(password)?,
            role: Role::Admin,
        };
        self.repository.users.insert(&user).await?;
        tracing::info!(username, "created bootstrap admin account");
        Ok(())
    }

    /// Verify a password against the stored argon2 hash
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}

fn invalid_credentials() -> AppError {
    AppError::Authentication("invalid username or password".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> UsersService {
        UsersService::new(
            Repository::in_memory(),
            AuthConfig {
                jwt_secret: "test-secret".to_string(),
                jwt_expiration_hours: 1,
            },
        )
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let service = service();
        let user = service
            .register("jane", "jane@example.com", "s3cret", None)
            .await
            .unwrap();
        assert_eq!(user.role, Role::Operator);

        let (token, user) = service.authenticate("jane", "s3cret").await.unwrap();
        assert_eq!(user.username, "jane");

        let claims = UserClaims::from_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, "jane");
        assert_eq!(claims.role, Role::Operator);
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username() {
        let service = service();
        service
            .register("jane", "jane@example.com", "s3cret", None)
            .await
            .unwrap();

        let err = service
            .register("jane", "other@example.com", "password", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_authenticate_hides_which_part_was_wrong() {
        let service = service();
        service
            .register("jane", "jane@example.com", "s3cret", None)
            .await
            .unwrap();

        let unknown = service.authenticate("nobody", "s3cret").await.unwrap_err();
        let wrong = service.authenticate("jane", "wrong").await.unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let service = service();
        service
            .ensure_admin("admin", "admin@example.com", "changeme")
            .await
            .unwrap();
        service
            .ensure_admin("admin", "admin@example.com", "changeme")
            .await
            .unwrap();

        let users = service.list().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::Admin);
    }
}
