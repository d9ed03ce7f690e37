//! Application state for shared services

use std::sync::Arc;

use crate::config::SiteSettings;
use crate::domain::admin::{ChangeList, ChangeListParams, ModelAdmin};
use crate::domain::{DomainError, Kat, KatQuery, KatRepository};
use crate::infrastructure::kat::{CreateKatRequest, KatService, UpdateKatRequest};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub kat_service: Arc<dyn KatServiceTrait>,
    pub site: Arc<SiteSettings>,
}

/// Trait for kat service operations
#[async_trait::async_trait]
pub trait KatServiceTrait: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Kat>, DomainError>;
    async fn count(&self, query: Option<KatQuery>) -> Result<usize, DomainError>;
    async fn create(&self, request: CreateKatRequest) -> Result<Kat, DomainError>;
    async fn update(&self, id: &str, request: UpdateKatRequest) -> Result<Kat, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
    async fn change_list(
        &self,
        admin: &ModelAdmin,
        params: &ChangeListParams,
    ) -> Result<ChangeList, DomainError>;
}

#[async_trait::async_trait]
impl KatServiceTrait for KatService {
    async fn get(&self, id: &str) -> Result<Option<Kat>, DomainError> {
        KatService::get(self, id).await
    }

    async fn count(&self, query: Option<KatQuery>) -> Result<usize, DomainError> {
        KatService::count(self, query).await
    }

    async fn create(&self, request: CreateKatRequest) -> Result<Kat, DomainError> {
        KatService::create(self, request).await
    }

    async fn update(&self, id: &str, request: UpdateKatRequest) -> Result<Kat, DomainError> {
        KatService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        KatService::delete(self, id).await
    }

    async fn change_list(
        &self,
        admin: &ModelAdmin,
        params: &ChangeListParams,
    ) -> Result<ChangeList, DomainError> {
        KatService::change_list(self, admin, params).await
    }
}

impl AppState {
    pub fn new(kat_service: Arc<dyn KatServiceTrait>, site: SiteSettings) -> Self {
        Self {
            kat_service,
            site: Arc::new(site),
        }
    }

    /// Create state from a kat repository
    pub fn with_repository(repository: Arc<dyn KatRepository>, site: SiteSettings) -> Self {
        Self::new(Arc::new(KatService::new(repository)), site)
    }
}
