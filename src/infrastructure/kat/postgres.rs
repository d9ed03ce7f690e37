//! PostgreSQL kat repository

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow, Postgres};
use sqlx::{QueryBuilder, Row};

use crate::domain::kat::{Kat, KatId, KatQuery, KatRepository, NewKat};
use crate::domain::DomainError;

/// Table holding kat records
pub const KAT_TABLE: &str = "kat_corner_kat";

/// PostgreSQL-backed kat repository; IDs come from a `BIGSERIAL` column
#[derive(Debug, Clone)]
pub struct PostgresKatRepository {
    pool: PgPool,
}

impl PostgresKatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn row_to_kat(row: &PgRow) -> Result<Kat, DomainError> {
    let id: i64 = row.get("id");
    let name: String = row.get("name");
    let age: i32 = row.get("age");

    let id = KatId::new(id).map_err(|e| DomainError::storage(format!("Invalid kat row: {}", e)))?;
    Kat::new(id, name, age).map_err(|e| DomainError::storage(format!("Invalid kat row: {}", e)))
}

/// Escape LIKE wildcards so search terms match literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');

    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped.push('%');
    escaped
}

fn push_keyword(builder: &mut QueryBuilder<'_, Postgres>, has_condition: &mut bool) {
    builder.push(if *has_condition { " AND " } else { " WHERE " });
    *has_condition = true;
}

/// Append the WHERE clause for the query's search and filters
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &KatQuery) {
    let mut has_condition = false;

    if let Some(age) = query.age {
        push_keyword(builder, &mut has_condition);
        builder.push("age = ").push_bind(age);
    }

    for term in query.search_terms() {
        push_keyword(builder, &mut has_condition);
        builder.push("(");

        for (i, field) in query.search_fields.iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder
                .push(format!("CAST({} AS TEXT) ILIKE ", field.column()))
                .push_bind(escape_like(&term));
        }

        builder.push(")");
    }
}

/// Append ORDER BY, always ending with the primary key so pages are stable
fn push_ordering(builder: &mut QueryBuilder<'_, Postgres>, query: &KatQuery) {
    builder.push(" ORDER BY ");

    for order in &query.ordering {
        builder
            .push(order.field.column())
            .push(if order.descending { " DESC, " } else { " ASC, " });
    }

    builder.push("id ASC");
}

fn push_pagination(builder: &mut QueryBuilder<'_, Postgres>, query: &KatQuery) {
    if let Some(limit) = query.limit {
        builder.push(" LIMIT ").push_bind(limit as i64);
    }

    if let Some(offset) = query.offset.filter(|offset| *offset > 0) {
        builder.push(" OFFSET ").push_bind(offset as i64);
    }
}

fn list_query(query: &KatQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT id, name, age FROM {}", KAT_TABLE));
    push_filters(&mut builder, query);
    push_ordering(&mut builder, query);
    push_pagination(&mut builder, query);
    builder
}

fn count_query(query: &KatQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) AS count FROM {}", KAT_TABLE));
    push_filters(&mut builder, query);
    builder
}

#[async_trait]
impl KatRepository for PostgresKatRepository {
    async fn get(&self, id: KatId) -> Result<Option<Kat>, DomainError> {
        let query = format!("SELECT id, name, age FROM {} WHERE id = $1", KAT_TABLE);

        let row = sqlx::query(&query)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get kat: {}", e)))?;

        row.as_ref().map(row_to_kat).transpose()
    }

    async fn create(&self, kat: NewKat) -> Result<Kat, DomainError> {
        let query = format!(
            "INSERT INTO {} (name, age) VALUES ($1, $2) RETURNING id",
            KAT_TABLE
        );

        let id: i64 = sqlx::query_scalar(&query)
            .bind(kat.name())
            .bind(kat.age())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create kat: {}", e)))?;

        let id = KatId::new(id).map_err(|e| DomainError::storage(e.to_string()))?;
        Ok(kat.into_kat(id))
    }

    async fn update(&self, kat: Kat) -> Result<Kat, DomainError> {
        let query = format!("UPDATE {} SET name = $2, age = $3 WHERE id = $1", KAT_TABLE);

        let result = sqlx::query(&query)
            .bind(kat.id().value())
            .bind(kat.name())
            .bind(kat.age())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update kat: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Kat '{}' not found",
                kat.id()
            )));
        }

        Ok(kat)
    }

    async fn delete(&self, id: KatId) -> Result<bool, DomainError> {
        let query = format!("DELETE FROM {} WHERE id = $1", KAT_TABLE);

        let result = sqlx::query(&query)
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete kat: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, query: &KatQuery) -> Result<Vec<Kat>, DomainError> {
        let rows = list_query(query)
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list kats: {}", e)))?;

        rows.iter().map(row_to_kat).collect()
    }

    async fn count(&self, query: &KatQuery) -> Result<usize, DomainError> {
        let row = count_query(query)
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count kats: {}", e)))?;

        let count: i64 = row.get("count");
        Ok(count as usize)
    }

    async fn distinct_ages(&self) -> Result<Vec<i32>, DomainError> {
        let query = format!("SELECT DISTINCT age FROM {} ORDER BY age", KAT_TABLE);

        sqlx::query_scalar(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list ages: {}", e)))
    }

    async fn exists(&self, id: KatId) -> Result<bool, DomainError> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1) AS exists",
            KAT_TABLE
        );

        sqlx::query_scalar(&query)
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check existence: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kat::{KatField, KatOrder};

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("tom"), "%tom%");
        assert_eq!(escape_like("100%_cat\\"), "%100\\%\\_cat\\\\%");
    }

    #[test]
    fn test_list_query_without_filters() {
        let builder = list_query(&KatQuery::new());

        assert_eq!(
            builder.sql(),
            "SELECT id, name, age FROM kat_corner_kat ORDER BY id ASC"
        );
    }

    #[test]
    fn test_list_query_with_everything() {
        let query = KatQuery::new()
            .with_search("tom kat", &[KatField::Name])
            .with_age(3)
            .with_ordering(vec![KatOrder::desc(KatField::Age), KatOrder::asc(KatField::Name)])
            .with_limit(10)
            .with_offset(20);

        let builder = list_query(&query);

        assert_eq!(
            builder.sql(),
            "SELECT id, name, age FROM kat_corner_kat \
             WHERE age = $1 \
             AND (CAST(name AS TEXT) ILIKE $2) \
             AND (CAST(name AS TEXT) ILIKE $3) \
             ORDER BY age DESC, name ASC, id ASC LIMIT $4 OFFSET $5"
        );
    }

    #[test]
    fn test_search_over_several_fields() {
        let query = KatQuery::new().with_search("3", &[KatField::Name, KatField::Age]);
        let builder = count_query(&query);

        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) AS count FROM kat_corner_kat \
             WHERE (CAST(name AS TEXT) ILIKE $1 OR CAST(age AS TEXT) ILIKE $2)"
        );
    }

    #[test]
    fn test_count_query_ignores_ordering_and_pagination() {
        let query = KatQuery::new()
            .with_ordering(vec![KatOrder::asc(KatField::Name)])
            .with_limit(5);

        assert_eq!(
            count_query(&query).sql(),
            "SELECT COUNT(*) AS count FROM kat_corner_kat"
        );
    }
}
