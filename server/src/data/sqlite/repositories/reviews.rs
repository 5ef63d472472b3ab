//! Review repository

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::ReviewRow;

const SELECT_COLUMNS: &str =
    "id, user_id, place_name, place_address, rating, message, created_at";

/// Reviews for one place, newest first
pub async fn list_for_place(
    pool: &SqlitePool,
    place_name: &str,
    place_address: &str,
) -> Result<Vec<ReviewRow>, SqliteError> {
    let rows = sqlx::query_as::<_, ReviewRow>(&format!(
        "SELECT {} FROM reviews WHERE place_name = ? AND place_address = ? ORDER BY created_at DESC, id DESC",
        SELECT_COLUMNS
    ))
    .bind(place_name)
    .bind(place_address)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Create a review for a place
pub async fn create_review(
    pool: &SqlitePool,
    user_id: i64,
    place_name: &str,
    place_address: &str,
    rating: i64,
    message: Option<&str>,
) -> Result<ReviewRow, SqliteError> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO reviews (user_id, place_name, place_address, rating, message, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(place_name)
    .bind(place_address)
    .bind(rating)
    .bind(message)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(ReviewRow {
        id: result.last_insert_rowid(),
        user_id,
        place_name: place_name.to_string(),
        place_address: place_address.to_string(),
        rating,
        message: message.map(str::to_string),
        created_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_and_list_reviews() {
        let pool = setup_test_pool().await;
        create_review(
            &pool,
            1,
            "Stanley Park",
            "610 Pipeline Rd",
            4,
            Some("Busy on weekends"),
        )
        .await
        .unwrap();

        let reviews = list_for_place(&pool, "Stanley Park", "610 Pipeline Rd")
            .await
            .unwrap();
        // One seed review plus the new one
        assert_eq!(reviews.len(), 2);
    }

    #[tokio::test]
    async fn test_review_requires_existing_place() {
        let pool = setup_test_pool().await;
        let err = create_review(&pool, 1, "Nowhere", "0 Nothing St", 3, None)
            .await
            .unwrap_err();
        assert!(err.is_foreign_key_violation());
    }

    #[tokio::test]
    async fn test_review_requires_existing_user() {
        let pool = setup_test_pool().await;
        let err = create_review(&pool, 999, "Stanley Park", "610 Pipeline Rd", 3, None)
            .await
            .unwrap_err();
        assert!(err.is_foreign_key_violation());
    }
}
