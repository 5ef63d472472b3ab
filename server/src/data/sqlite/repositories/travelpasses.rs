//! Travel pass repository
//!
//! Passes are a shared catalog; redeeming inserts into the holders
//! junction, so one pass can be held by many users but only once each.

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::TravelPassRow;

const SELECT_COLUMNS: &str = "id, name, cost, start_date, end_date";

/// List the full pass catalog
pub async fn list_passes(pool: &SqlitePool) -> Result<Vec<TravelPassRow>, SqliteError> {
    let rows = sqlx::query_as::<_, TravelPassRow>(&format!(
        "SELECT {} FROM travel_passes ORDER BY cost, id",
        SELECT_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Passes held by one user
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<TravelPassRow>, SqliteError> {
    let rows = sqlx::query_as::<_, TravelPassRow>(
        r#"
        SELECT tp.id, tp.name, tp.cost, tp.start_date, tp.end_date
        FROM travel_passes tp
        JOIN travel_pass_holders h ON tp.id = h.pass_id
        WHERE h.user_id = ?
        ORDER BY tp.cost, tp.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Acquire a pass for a user.
///
/// Returns `Ok(None)` when the pass does not exist, `Err(Conflict)` when
/// the user already holds it.
pub async fn redeem(
    pool: &SqlitePool,
    pass_id: i64,
    user_id: i64,
) -> Result<Option<TravelPassRow>, SqliteError> {
    let pass = sqlx::query_as::<_, TravelPassRow>(&format!(
        "SELECT {} FROM travel_passes WHERE id = ?",
        SELECT_COLUMNS
    ))
    .bind(pass_id)
    .fetch_optional(pool)
    .await?;

    let Some(pass) = pass else {
        return Ok(None);
    };

    let now = chrono::Utc::now().timestamp();
    let result = sqlx::query(
        "INSERT INTO travel_pass_holders (user_id, pass_id, redeemed_at) VALUES (?, ?, ?)",
    )
    .bind(user_id)
    .bind(pass_id)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(Some(pass)),
        Err(e) => {
            let err = SqliteError::Database(e);
            if err.is_unique_violation() {
                Err(SqliteError::Conflict(format!(
                    "user {} already holds pass {}",
                    user_id, pass_id
                )))
            } else {
                Err(err)
            }
        }
    }
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
    async fn test_list_passes_seeds() {
        let pool = setup_test_pool().await;
        let passes = list_passes(&pool).await.unwrap();
        assert_eq!(passes.len(), 2);
        // Ordered by cost
        assert!(passes[0].cost <= passes[1].cost);
    }

    #[tokio::test]
    async fn test_redeem_pass() {
        let pool = setup_test_pool().await;
        let pass = redeem(&pool, 1, 1).await.unwrap().unwrap();
        assert_eq!(pass.name, "Day Explorer");

        let mine = list_for_user(&pool, 1).await.unwrap();
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn test_redeem_twice_conflicts() {
        let pool = setup_test_pool().await;
        redeem(&pool, 1, 1).await.unwrap();

        let err = redeem(&pool, 1, 1).await.unwrap_err();
        assert!(matches!(err, SqliteError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_same_pass_for_two_users() {
        let pool = setup_test_pool().await;
        redeem(&pool, 1, 1).await.unwrap();
        let second = redeem(&pool, 1, 2).await.unwrap();
        assert!(second.is_some());
    }

    #[tokio::test]
    async fn test_redeem_missing_pass() {
        let pool = setup_test_pool().await;
        let result = redeem(&pool, 999, 1).await.unwrap();
        assert!(result.is_none());
    }
}
