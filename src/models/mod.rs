//! Data models for Backoffice

pub mod client;
pub mod equipment;
pub mod principal;
pub mod user;

// Re-export commonly used types
pub use client::ClientRecord;
pub use equipment::{CreateEquipment, EquipmentRecord};
pub use principal::ClientPrincipal;
pub use user::{NewUser, Role, User, UserClaims, UserSummary};
