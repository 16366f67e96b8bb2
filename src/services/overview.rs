//! Dashboard overview service

use std::{collections::BTreeMap, sync::Arc};

use crate::{api::overview::OverviewResponse, error::AppResult, repository::Repository};

use super::crm::CrmProvider;

#[derive(Clone)]
pub struct OverviewService {
    repository: Repository,
    providers: Vec<Arc<dyn CrmProvider>>,
}

impl OverviewService {
    pub fn new(repository: Repository, providers: Vec<Arc<dyn CrmProvider>>) -> Self {
        Self {
            repository,
            providers,
        }
    }

    /// Local head count plus one slot per CRM vendor. A vendor failure is
    /// logged and surfaces as `null` for that vendor; it never fails the
    /// endpoint or taints the other slots.
    pub async fn overview(&self) -> AppResult<OverviewResponse> {
        let mut total_clients = self.repository.clients.count_active().await?;
        let mut crm = BTreeMap::new();

        for provider in &self.providers {
            match provider.active_client_count().await {
                Ok(count) => {
                    total_clients += count;
                    crm.insert(provider.name().to_string(), Some(count));
                }
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "CRM count failed");
                    crm.insert(provider.name().to_string(), None);
                }
            }
        }

        Ok(OverviewResponse {
            total_clients,
            new_leads: 0,
            alerts: 0,
            crm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::client::ClientRecord,
        repository::memory::InMemoryClientStore,
        services::crm::{MockCrmProvider, ProviderError},
    };

    fn repository_with_active_clients(n: usize) -> Repository {
        let repository = Repository::in_memory();
        let store = InMemoryClientStore::default();
        for i in 0..n {
            store.push(ClientRecord {
                id: i as i32 + 1,
                name: None,
                source: None,
                active: true,
                last_seen: None,
            });
        }
        Repository {
            clients: Arc::new(store),
            ..repository
        }
    }

    fn provider_ok(name: &'static str, count: i64) -> Arc<dyn CrmProvider> {
        let mut mock = MockCrmProvider::new();
        mock.expect_name().return_const(name);
        mock.expect_active_client_count().returning(move || Ok(count));
        Arc::new(mock)
    }

    fn provider_err(name: &'static str) -> Arc<dyn CrmProvider> {
        let mut mock = MockCrmProvider::new();
        mock.expect_name().return_const(name);
        mock.expect_active_client_count()
            .returning(move || Err(ProviderError::MissingCredentials(name)));
        Arc::new(mock)
    }

    #[tokio::test]
    async fn test_overview_sums_local_and_provider_counts() {
        let service = OverviewService::new(
            repository_with_active_clients(3),
            vec![provider_ok("hubspot", 2), provider_ok("pipedrive", 0)],
        );

        let overview = service.overview().await.unwrap();
        assert_eq!(overview.total_clients, 5);
        assert_eq!(overview.new_leads, 0);
        assert_eq!(overview.alerts, 0);
        assert_eq!(overview.crm.get("hubspot"), Some(&Some(2)));
        assert_eq!(overview.crm.get("pipedrive"), Some(&Some(0)));
    }

    #[tokio::test]
    async fn test_provider_failure_is_isolated() {
        let service = OverviewService::new(
            repository_with_active_clients(4),
            vec![provider_err("hubspot"), provider_ok("pipedrive", 1)],
        );

        let overview = service.overview().await.unwrap();
        assert_eq!(overview.total_clients, 5);
        assert_eq!(overview.crm.get("hubspot"), Some(&None));
        assert_eq!(overview.crm.get("pipedrive"), Some(&Some(1)));
    }

    #[tokio::test]
    async fn test_overview_without_providers() {
        let service = OverviewService::new(repository_with_active_clients(2), vec![]);
        let overview = service.overview().await.unwrap();
        assert_eq!(overview.total_clients, 2);
        assert!(overview.crm.is_empty());
    }
}
