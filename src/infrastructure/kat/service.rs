//! Kat service for kat management

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::admin::{AdminQueryError, ChangeList, ChangeListParams, ListFilter, ModelAdmin};
use crate::domain::kat::{Kat, KatField, KatId, KatQuery, KatRepository, NewKat};
use crate::domain::DomainError;

/// Request for creating a new kat
#[derive(Debug, Clone)]
pub struct CreateKatRequest {
    pub name: String,
    pub age: i32,
}

/// Request for updating a kat
#[derive(Debug, Clone, Default)]
pub struct UpdateKatRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
}

/// Kat service for managing kats
#[derive(Debug, Clone)]
pub struct KatService {
    repository: Arc<dyn KatRepository>,
}

fn parse_id(id: &str) -> Result<KatId, DomainError> {
    id.parse::<KatId>()
        .map_err(|e| DomainError::invalid_id(format!("'{}': {}", id, e)))
}

/// Unknown registered fields are a configuration problem, everything else a bad request
fn admin_error(err: AdminQueryError) -> DomainError {
    match err {
        AdminQueryError::UnknownField(_) => DomainError::configuration(err.to_string()),
        _ => DomainError::validation(err.to_string()),
    }
}

impl KatService {
    /// Create a new kat service
    pub fn new(repository: Arc<dyn KatRepository>) -> Self {
        Self { repository }
    }

    /// Create a new kat
    pub async fn create(&self, request: CreateKatRequest) -> Result<Kat, DomainError> {
        info!(name = %request.name, age = request.age, "Creating kat");

        let kat = NewKat::new(request.name, request.age)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.repository.create(kat).await
    }

    /// Get a kat by ID
    pub async fn get(&self, id: &str) -> Result<Option<Kat>, DomainError> {
        let kat_id = parse_id(id)?;
        self.repository.get(kat_id).await
    }

    /// List kats
    pub async fn list(&self, query: Option<KatQuery>) -> Result<Vec<Kat>, DomainError> {
        self.repository.list(&query.unwrap_or_default()).await
    }

    /// Count kats
    pub async fn count(&self, query: Option<KatQuery>) -> Result<usize, DomainError> {
        self.repository.count(&query.unwrap_or_default()).await
    }

    /// Update a kat
    pub async fn update(&self, id: &str, request: UpdateKatRequest) -> Result<Kat, DomainError> {
        info!(id = %id, "Updating kat");

        let kat_id = parse_id(id)?;

        let mut kat = self
            .repository
            .get(kat_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Kat '{}' not found", id)))?;

        if let Some(name) = request.name {
            kat.set_name(name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(age) = request.age {
            kat.set_age(age);
        }

        self.repository.update(kat).await
    }

    /// Delete a kat
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        info!(id = %id, "Deleting kat");

        let kat_id = parse_id(id)?;

        if !self.repository.delete(kat_id).await? {
            return Err(DomainError::not_found(format!("Kat '{}' not found", id)));
        }

        Ok(())
    }

    /// Build one page of the admin change list
    pub async fn change_list(
        &self,
        admin: &ModelAdmin,
        params: &ChangeListParams,
    ) -> Result<ChangeList, DomainError> {
        debug!(?params, "Building kat change list");

        let query = admin.build_query(params).map_err(admin_error)?;

        let kats = self.repository.list(&query).await?;
        let total = self.repository.count(&query).await?;

        let rows = kats
            .iter()
            .map(|kat| admin.row(kat))
            .collect::<Result<Vec<_>, _>>()
            .map_err(admin_error)?;

        let mut filters = Vec::new();

        if admin.is_filterable(KatField::Age.column()) {
            filters.push(ListFilter {
                field: KatField::Age.to_string(),
                choices: self.repository.distinct_ages().await?,
                selected: params.age,
            });
        }

        Ok(ChangeList {
            columns: admin.columns(),
            rows,
            filters,
            search: query.search.clone(),
            total,
            limit: query.limit.unwrap_or(total),
            offset: query.offset.unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::admin::{DEFAULT_LIST_PER_PAGE, KAT_ADMIN};
    use crate::infrastructure::kat::InMemoryKatRepository;

    fn create_service() -> KatService {
        KatService::new(Arc::new(InMemoryKatRepository::new()))
    }

    async fn seed(service: &KatService, kats: &[(&str, i32)]) {
        for (name, age) in kats {
            service
                .create(CreateKatRequest {
                    name: name.to_string(),
                    age: *age,
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_create_kat() {
        let service = create_service();

        let kat = service
            .create(CreateKatRequest {
                name: "Whiskers".to_string(),
                age: 3,
            })
            .await
            .unwrap();

        assert_eq!(kat.id().value(), 1);
        assert_eq!(kat.to_string(), "Whiskers : 3");
    }

    #[tokio::test]
    async fn test_create_kat_invalid_name() {
        let service = create_service();

        let result = service
            .create(CreateKatRequest {
                name: "".to_string(),
                age: 3,
            })
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let result = service
            .create(CreateKatRequest {
                name: "a".repeat(256),
                age: 3,
            })
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_names_are_not_unique() {
        let service = create_service();
        seed(&service, &[("Tom", 1), ("Tom", 1)]).await;

        assert_eq!(service.count(None).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_kat() {
        let service = create_service();
        seed(&service, &[("Whiskers", 3)]).await;

        let kat = service.get("1").await.unwrap().unwrap();
        assert_eq!(kat.name(), "Whiskers");

        assert!(service.get("2").await.unwrap().is_none());
        assert!(matches!(
            service.get("whiskers").await,
            Err(DomainError::InvalidId { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_kat() {
        let service = create_service();
        seed(&service, &[("Whiskers", 3)]).await;

        let updated = service
            .update(
                "1",
                UpdateKatRequest {
                    name: None,
                    age: Some(4),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.to_string(), "Whiskers : 4");

        let result = service
            .update(
                "1",
                UpdateKatRequest {
                    name: Some("".to_string()),
                    age: None,
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_missing_kat() {
        let service = create_service();

        let result = service.update("5", UpdateKatRequest::default()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_kat() {
        let service = create_service();
        seed(&service, &[("Whiskers", 3)]).await;

        service.delete("1").await.unwrap();
        assert!(service.get("1").await.unwrap().is_none());

        let result = service.delete("1").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_change_list_defaults() {
        let service = create_service();
        seed(&service, &[("Whiskers", 3), ("Mittens", 2), ("Boots", 3)]).await;

        let list = service
            .change_list(&KAT_ADMIN, &ChangeListParams::default())
            .await
            .unwrap();

        assert_eq!(list.columns, vec!["name", "age"]);
        let lines: Vec<String> = list.rows.iter().map(|r| r.to_line()).collect();
        assert_eq!(lines, vec!["Boots | 3", "Mittens | 2", "Whiskers | 3"]);
        assert_eq!(list.total, 3);
        assert_eq!(list.limit, DEFAULT_LIST_PER_PAGE);
        assert_eq!(list.filters.len(), 1);
        assert_eq!(list.filters[0].field, "age");
        assert_eq!(list.filters[0].choices, vec![2, 3]);
        assert_eq!(list.filters[0].selected, None);
    }

    #[tokio::test]
    async fn test_change_list_search_and_filter() {
        let service = create_service();
        seed(&service, &[("Whiskers", 3), ("Mittens", 2), ("Boots", 3)]).await;

        let params = ChangeListParams {
            q: Some("s".to_string()),
            age: Some(3),
            ..Default::default()
        };
        let list = service.change_list(&KAT_ADMIN, &params).await.unwrap();

        let names: Vec<&str> = list.rows.iter().map(|r| r.cells[0].as_str()).collect();
        assert_eq!(names, vec!["Boots", "Whiskers"]);
        assert_eq!(list.total, 2);
        assert_eq!(list.filters[0].selected, Some(3));
        // Filter choices reflect all records, not just the current page
        assert_eq!(list.filters[0].choices, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_change_list_rejects_bad_ordering() {
        let service = create_service();

        let params = ChangeListParams {
            o: Some("color".to_string()),
            ..Default::default()
        };
        let result = service.change_list(&KAT_ADMIN, &params).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
