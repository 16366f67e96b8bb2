//! Business logic services

pub mod crm;
pub mod equipment;
pub mod overview;
pub mod users;

use std::sync::Arc;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub users: users::UsersService,
    pub overview: overview::OverviewService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        providers: Vec<Arc<dyn crm::CrmProvider>>,
    ) -> Self {
        Self {
            equipment: equipment::EquipmentService::new(repository.clone()),
            users: users::UsersService::new(repository.clone(), auth_config),
            overview: overview::OverviewService::new(repository, providers),
        }
    }
}
