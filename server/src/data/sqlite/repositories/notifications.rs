//! Notification repository

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::NotificationRow;

/// True when the user exists
pub async fn user_exists(pool: &SqlitePool, user_id: i64) -> Result<bool, SqliteError> {
    let exists: bool = sqlx::query_scalar("SELECT COUNT(*) > 0 FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Notifications delivered to one user, newest first
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<NotificationRow>, SqliteError> {
    let rows = sqlx::query_as::<_, NotificationRow>(
        r#"
        SELECT n.id, n.message, n.created_at
        FROM notifications n
        JOIN notification_receipts r ON n.id = r.notification_id
        WHERE r.user_id = ?
        ORDER BY n.created_at DESC, n.id DESC
        "#,
    )
    .bind(user_id)
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
    async fn test_list_for_user_joins_receipts() {
        let pool = setup_test_pool().await;
        let notifications = list_for_user(&pool, 1).await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].message, "Welcome to CityHop");
    }

    #[tokio::test]
    async fn test_user_without_receipts_gets_nothing() {
        let pool = setup_test_pool().await;
        let notifications = list_for_user(&pool, 2).await.unwrap();
        assert!(notifications.is_empty());
    }

    #[tokio::test]
    async fn test_user_exists() {
        let pool = setup_test_pool().await;
        assert!(user_exists(&pool, 1).await.unwrap());
        assert!(!user_exists(&pool, 999).await.unwrap());
    }
}
