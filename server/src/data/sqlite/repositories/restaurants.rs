//! Restaurant repository

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::CuisineRatingRow;

/// Cuisines whose average restaurant rating is strictly above `threshold`
pub async fn cuisines_above_threshold(
    pool: &SqlitePool,
    threshold: f64,
) -> Result<Vec<CuisineRatingRow>, SqliteError> {
    let rows = sqlx::query_as::<_, CuisineRatingRow>(
        r#"
        SELECT cuisine, AVG(rating) AS average_rating
        FROM restaurants
        WHERE rating IS NOT NULL
        GROUP BY cuisine
        HAVING AVG(rating) > ?
        ORDER BY average_rating DESC
        "#,
    )
    .bind(threshold)
    .fetch_all(pool)
    .await?;

    Ok(rows)
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
    async fn test_cuisines_above_threshold() {
        let pool = setup_test_pool().await;

        // Seed restaurant Miku (Japanese) is rated 4.6
        let high = cuisines_above_threshold(&pool, 4.0).await.unwrap();
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].cuisine, "Japanese");

        let none = cuisines_above_threshold(&pool, 4.9).await.unwrap();
        assert!(none.is_empty());
    }
}
