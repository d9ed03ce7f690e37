//! Declarative admin registration for models

use serde::Deserialize;
use thiserror::Error;

use crate::domain::kat::{KatField, KatOrder, KatQuery};

/// Default number of rows on one change list page
pub const DEFAULT_LIST_PER_PAGE: usize = 100;

/// Upper bound for the number of rows a single change list request may ask for
pub const MAX_LIST_PER_PAGE: usize = 200;

/// Errors raised while turning change list parameters into a query
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AdminQueryError {
    #[error("Cannot order by '{0}': not a displayed column")]
    InvalidOrdering(String),

    #[error("Cannot filter by '{0}': not a list filter")]
    InvalidFilter(String),

    #[error("Unknown field '{0}' in admin registration")]
    UnknownField(String),
}

/// How a model is listed, searched and filtered in the admin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelAdmin {
    pub app_label: &'static str,
    pub model_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub search_fields: &'static [&'static str],
    pub list_display: &'static [&'static str],
    pub list_filter: &'static [&'static str],
    pub ordering: &'static [&'static str],
}

/// Admin registration for kats
pub const KAT_ADMIN: ModelAdmin = ModelAdmin {
    app_label: "kat_corner",
    model_name: "kat",
    verbose_name_plural: "kats",
    search_fields: &["name"],
    list_display: &["name", "age"],
    list_filter: &["age"],
    ordering: &["name"],
};

/// Parameters accepted by a change list page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChangeListParams {
    /// Search text
    pub q: Option<String>,
    /// Exact age filter
    pub age: Option<i32>,
    /// Ordering override, comma-separated field names with optional '-' prefix
    pub o: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ModelAdmin {
    /// URL path of this model's change list page
    pub fn changelist_path(&self) -> String {
        format!("/admin/{}/{}/", self.app_label, self.model_name)
    }

    /// Whether a field may be used as a filter
    pub fn is_filterable(&self, field: &str) -> bool {
        self.list_filter.contains(&field)
    }

    /// Resolved search fields
    pub fn search_field_list(&self) -> Result<Vec<KatField>, AdminQueryError> {
        self.search_fields.iter().map(|name| resolve_field(name)).collect()
    }

    /// Default ordering declared by the registration
    pub fn default_ordering(&self) -> Result<Vec<KatOrder>, AdminQueryError> {
        self.ordering
            .iter()
            .map(|clause| parse_order(clause).ok_or_else(|| AdminQueryError::UnknownField(clause.to_string())))
            .collect()
    }

    /// Parse a user-supplied ordering; only displayed columns are sortable
    pub fn parse_ordering(&self, raw: &str) -> Result<Vec<KatOrder>, AdminQueryError> {
        raw.split(',')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .map(|clause| {
                let column = clause.trim_start_matches('-');

                if !self.list_display.contains(&column) {
                    return Err(AdminQueryError::InvalidOrdering(clause.to_string()));
                }

                parse_order(clause).ok_or_else(|| AdminQueryError::InvalidOrdering(clause.to_string()))
            })
            .collect()
    }

    /// Build the repository query for a change list request
    pub fn build_query(&self, params: &ChangeListParams) -> Result<KatQuery, AdminQueryError> {
        let ordering = match params.o.as_deref() {
            Some(raw) if !raw.trim().is_empty() => self.parse_ordering(raw)?,
            _ => self.default_ordering()?,
        };

        let mut query = KatQuery::new()
            .with_ordering(ordering)
            .with_limit(
                params
                    .limit
                    .unwrap_or(DEFAULT_LIST_PER_PAGE)
                    .min(MAX_LIST_PER_PAGE),
            )
            .with_offset(params.offset.unwrap_or(0));

        if let Some(search) = params.q.as_deref() {
            query = query.with_search(search, &self.search_field_list()?);
        }

        if let Some(age) = params.age {
            if !self.is_filterable(KatField::Age.column()) {
                return Err(AdminQueryError::InvalidFilter(KatField::Age.to_string()));
            }
            query = query.with_age(age);
        }

        Ok(query)
    }
}

fn resolve_field(name: &str) -> Result<KatField, AdminQueryError> {
    KatField::from_name(name).ok_or_else(|| AdminQueryError::UnknownField(name.to_string()))
}

fn parse_order(clause: &str) -> Option<KatOrder> {
    match clause.strip_prefix('-') {
        Some(column) => KatField::from_name(column).map(KatOrder::desc),
        None => KatField::from_name(clause).map(KatOrder::asc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kat_admin_registration() {
        assert_eq!(KAT_ADMIN.search_fields, &["name"]);
        assert_eq!(KAT_ADMIN.list_display, &["name", "age"]);
        assert_eq!(KAT_ADMIN.list_filter, &["age"]);
        assert_eq!(KAT_ADMIN.ordering, &["name"]);
        assert_eq!(KAT_ADMIN.changelist_path(), "/admin/kat_corner/kat/");
    }

    #[test]
    fn test_every_declared_field_resolves() {
        for name in KAT_ADMIN
            .search_fields
            .iter()
            .chain(KAT_ADMIN.list_display)
            .chain(KAT_ADMIN.list_filter)
        {
            assert!(KatField::from_name(name).is_some(), "unknown field {}", name);
        }
    }

    #[test]
    fn test_default_query_orders_by_name() {
        let query = KAT_ADMIN.build_query(&ChangeListParams::default()).unwrap();

        assert_eq!(query.ordering, vec![KatOrder::asc(KatField::Name)]);
        assert_eq!(query.limit, Some(DEFAULT_LIST_PER_PAGE));
        assert_eq!(query.offset, Some(0));
        assert!(query.search.is_none());
        assert!(query.age.is_none());
    }

    #[test]
    fn test_query_with_search_and_filter() {
        let params = ChangeListParams {
            q: Some("whisk".to_string()),
            age: Some(3),
            ..Default::default()
        };
        let query = KAT_ADMIN.build_query(&params).unwrap();

        assert_eq!(query.search.as_deref(), Some("whisk"));
        assert_eq!(query.search_fields, vec![KatField::Name]);
        assert_eq!(query.age, Some(3));
    }

    #[test]
    fn test_ordering_override() {
        let params = ChangeListParams {
            o: Some("-age, name".to_string()),
            ..Default::default()
        };
        let query = KAT_ADMIN.build_query(&params).unwrap();

        assert_eq!(
            query.ordering,
            vec![KatOrder::desc(KatField::Age), KatOrder::asc(KatField::Name)]
        );
    }

    #[test]
    fn test_ordering_rejects_hidden_columns() {
        assert_eq!(
            KAT_ADMIN.parse_ordering("id"),
            Err(AdminQueryError::InvalidOrdering("id".to_string()))
        );
        assert_eq!(
            KAT_ADMIN.parse_ordering("-color"),
            Err(AdminQueryError::InvalidOrdering("-color".to_string()))
        );
    }

    #[test]
    fn test_limit_is_capped() {
        let params = ChangeListParams {
            limit: Some(10_000),
            ..Default::default()
        };
        let query = KAT_ADMIN.build_query(&params).unwrap();

        assert_eq!(query.limit, Some(MAX_LIST_PER_PAGE));
    }

    #[test]
    fn test_age_filter_requires_registration() {
        let admin = ModelAdmin {
            list_filter: &[],
            ..KAT_ADMIN
        };
        let params = ChangeListParams {
            age: Some(1),
            ..Default::default()
        };

        assert_eq!(
            admin.build_query(&params).unwrap_err(),
            AdminQueryError::InvalidFilter("age".to_string())
        );
    }
}
