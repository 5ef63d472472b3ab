//! Place repository
//!
//! Covers the plain list/create path, the compiled-filter selection path,
//! and the allow-listed attribute projection.

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::{PlaceRow, ProjectionRow};
use crate::domain::selection::{CompiledFilter, SqlParams};

/// Fields a filter expression may reference on `places`.
pub const FILTER_FIELDS: &[&str] = &["name", "address", "type", "description"];

/// Columns a projection may request, in schema order.
pub const PROJECTION_FIELDS: &[&str] = &["name", "address", "type", "description"];

const SELECT_COLUMNS: &str = "name, address, type, description, created_at";

/// List all places with pagination, ordered by name
pub async fn list_places(
    pool: &SqlitePool,
    page: u32,
    limit: u32,
) -> Result<(Vec<PlaceRow>, u64), SqliteError> {
    let offset = (page.saturating_sub(1)) * limit;

    let rows = sqlx::query_as::<_, PlaceRow>(&format!(
        "SELECT {} FROM places ORDER BY name, address LIMIT ? OFFSET ?",
        SELECT_COLUMNS
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM places")
        .fetch_one(pool)
        .await?;

    Ok((rows, total.0 as u64))
}

/// Create a new place
pub async fn create_place(
    pool: &SqlitePool,
    name: &str,
    address: &str,
    place_type: &str,
    description: Option<&str>,
) -> Result<PlaceRow, SqliteError> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO places (name, address, type, description, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(name)
    .bind(address)
    .bind(place_type)
    .bind(description)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(PlaceRow {
        name: name.to_string(),
        address: address.to_string(),
        place_type: place_type.to_string(),
        description: description.map(str::to_string),
        created_at: now,
    })
}

/// Get a place by its composite key
pub async fn get_place(
    pool: &SqlitePool,
    name: &str,
    address: &str,
) -> Result<Option<PlaceRow>, SqliteError> {
    let row = sqlx::query_as::<_, PlaceRow>(&format!(
        "SELECT {} FROM places WHERE name = ? AND address = ?",
        SELECT_COLUMNS
    ))
    .bind(name)
    .bind(address)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Run a compiled filter against `places`.
///
/// The filter's fields must already be validated against [`FILTER_FIELDS`];
/// values are bound, never spliced.
pub async fn select_places(
    pool: &SqlitePool,
    filter: &CompiledFilter,
) -> Result<Vec<PlaceRow>, SqliteError> {
    let mut params = SqlParams::default();
    let clause = filter.to_sql(&mut params);
    let sql = format!(
        "SELECT {} FROM places WHERE {} ORDER BY name, address",
        SELECT_COLUMNS, clause
    );

    let mut query = sqlx::query_as::<_, PlaceRow>(&sql);
    for value in &params.values {
        query = query.bind(value);
    }

    Ok(query.fetch_all(pool).await?)
}

/// Project a subset of columns from `places`, in request order.
///
/// `attributes` must be a non-empty subset of [`PROJECTION_FIELDS`],
/// enforced by the caller.
pub async fn project_places(
    pool: &SqlitePool,
    attributes: &[String],
) -> Result<Vec<ProjectionRow>, SqliteError> {
    let sql = format!(
        "SELECT {} FROM places ORDER BY name, address",
        attributes.join(", ")
    );

    // The column set varies per request, so rows stay untyped here.
    let raw = sqlx::query(&sql).fetch_all(pool).await?;

    use sqlx::Row;
    let mut out = Vec::with_capacity(raw.len());
    for row in raw {
        let mut values = Vec::with_capacity(attributes.len());
        for i in 0..attributes.len() {
            let value: Option<String> = row.try_get(i)?;
            values.push(match value {
                Some(s) => serde_json::Value::String(s),
                None => serde_json::Value::Null,
            });
        }
        out.push(ProjectionRow { values });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::compile;

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_and_get_place() {
        let pool = setup_test_pool().await;
        let created = create_place(&pool, "Queen Elizabeth Park", "4600 Cambie St", "Park", None)
            .await
            .unwrap();
        assert_eq!(created.place_type, "Park");

        let fetched = get_place(&pool, "Queen Elizabeth Park", "4600 Cambie St")
            .await
            .unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().name, "Queen Elizabeth Park");
    }

    #[tokio::test]
    async fn test_duplicate_place_rejected() {
        let pool = setup_test_pool().await;
        create_place(&pool, "Spot", "1 Main St", "Cafe", None)
            .await
            .unwrap();
        let err = create_place(&pool, "Spot", "1 Main St", "Cafe", None)
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_list_places_includes_seeds() {
        let pool = setup_test_pool().await;
        let (places, total) = list_places(&pool, 1, 50).await.unwrap();
        assert!(total >= 3);
        assert!(places.iter().any(|p| p.name == "Stanley Park"));
    }

    #[tokio::test]
    async fn test_select_places_by_name() {
        let pool = setup_test_pool().await;
        let filter = compile("name = stanley park").unwrap();
        filter.validate_fields(FILTER_FIELDS).unwrap();

        let rows = select_places(&pool, &filter).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].address, "610 Pipeline Rd");
    }

    #[tokio::test]
    async fn test_select_places_with_or() {
        let pool = setup_test_pool().await;
        let filter = compile("type = park or type = market").unwrap();

        let rows = select_places(&pool, &filter).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_select_places_no_match() {
        let pool = setup_test_pool().await;
        let filter = compile("type = aquarium").unwrap();

        let rows = select_places(&pool, &filter).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_project_places_subset() {
        let pool = setup_test_pool().await;
        let attrs = vec!["name".to_string(), "type".to_string()];

        let rows = project_places(&pool, &attrs).await.unwrap();
        assert!(!rows.is_empty());
        assert_eq!(rows[0].values.len(), 2);
    }
}
