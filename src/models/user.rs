//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

use crate::error::AppError;

/// Capability level attached to every account.
///
/// `Admin` grants access to the restricted endpoints (equipment inventory,
/// user listing); `Operator` is the default for registered accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Operator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operator => "operator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "operator" => Ok(Role::Operator),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

// A stored role that parses to nothing recognizable degrades to Operator,
// never to Admin.
impl From<String> for Role {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Role::Operator)
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or(Role::Operator)
    }
}

// SQLx conversion for Role (stored as lowercase text)
impl sqlx::Type<Postgres> for Role {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Role {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        Ok(Role::from(s))
    }
}

impl Encode<'_, Postgres> for Role {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Full user account as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
}

/// Insert payload for a new account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Public projection returned by the user listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary {
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// JWT claims for authenticated sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Check if the session carries the admin capability
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Gate for admin-only operations. Denies with the fixed body
    /// `{"error": "Access restricted"}` and must run before any store access.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization("Access restricted".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Role) -> UserClaims {
        let now = chrono::Utc::now().timestamp();
        UserClaims {
            sub: "someone".to_string(),
            user_id: 7,
            role,
            exp: now + 3600,
            iat: now,
        }
    }

    #[test]
    fn test_role_parsing_falls_back_to_operator() {
        assert_eq!(Role::from("admin".to_string()), Role::Admin);
        assert_eq!(Role::from("OPERATOR".to_string()), Role::Operator);
        assert_eq!(Role::from("superuser".to_string()), Role::Operator);
        assert_eq!(Role::from(String::new()), Role::Operator);
    }

    #[test]
    fn test_require_admin() {
        assert!(claims(Role::Admin).require_admin().is_ok());
        assert!(claims(Role::Operator).require_admin().is_err());
    }

    #[test]
    fn test_token_round_trip() {
        let token = claims(Role::Admin).create_token("secret").unwrap();
        let decoded = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(decoded.sub, "someone");
        assert_eq!(decoded.user_id, 7);
        assert!(decoded.is_admin());
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let token = claims(Role::Operator).create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "other").is_err());
    }
}
