//! Gift card repository
//!
//! Redeeming claims an unclaimed card for a user. The claim is a single
//! conditional UPDATE so two concurrent redeems cannot both win.

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::GiftCardRow;

const SELECT_COLUMNS: &str = "id, franchise, value, points, user_id";

/// List unclaimed gift cards (the redeemable catalog)
pub async fn list_unclaimed(pool: &SqlitePool) -> Result<Vec<GiftCardRow>, SqliteError> {
    let rows = sqlx::query_as::<_, GiftCardRow>(&format!(
        "SELECT {} FROM gift_cards WHERE user_id IS NULL ORDER BY franchise, id",
        SELECT_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Gift cards already claimed by one user
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<GiftCardRow>, SqliteError> {
    let rows = sqlx::query_as::<_, GiftCardRow>(&format!(
        "SELECT {} FROM gift_cards WHERE user_id = ? ORDER BY franchise, id",
        SELECT_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Claim an unclaimed card for a user.
///
/// Returns `Ok(None)` when the card does not exist, `Err(Conflict)` when
/// it is already claimed.
pub async fn redeem(
    pool: &SqlitePool,
    card_id: i64,
    user_id: i64,
) -> Result<Option<GiftCardRow>, SqliteError> {
    let result = sqlx::query("UPDATE gift_cards SET user_id = ? WHERE id = ? AND user_id IS NULL")
        .bind(user_id)
        .bind(card_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        let existing = sqlx::query_as::<_, GiftCardRow>(&format!(
            "SELECT {} FROM gift_cards WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(card_id)
        .fetch_optional(pool)
        .await?;

        return match existing {
            Some(_) => Err(SqliteError::Conflict(format!(
                "gift card {} is already claimed",
                card_id
            ))),
            None => Ok(None),
        };
    }

    let row = sqlx::query_as::<_, GiftCardRow>(&format!(
        "SELECT {} FROM gift_cards WHERE id = ?",
        SELECT_COLUMNS
    ))
    .bind(card_id)
    .fetch_one(pool)
    .await?;

    Ok(Some(row))
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
    async fn test_list_unclaimed_seeds() {
        let pool = setup_test_pool().await;
        let cards = list_unclaimed(&pool).await.unwrap();
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|c| c.user_id.is_none()));
    }

    #[tokio::test]
    async fn test_redeem_claims_card() {
        let pool = setup_test_pool().await;
        let card = redeem(&pool, 1, 1).await.unwrap().unwrap();
        assert_eq!(card.user_id, Some(1));

        let mine = list_for_user(&pool, 1).await.unwrap();
        assert_eq!(mine.len(), 1);

        let remaining = list_unclaimed(&pool).await.unwrap();
        assert_eq!(remaining.len(), 1);
    }

    #[tokio::test]
    async fn test_redeem_claimed_card_conflicts() {
        let pool = setup_test_pool().await;
        redeem(&pool, 1, 1).await.unwrap();

        let err = redeem(&pool, 1, 2).await.unwrap_err();
        assert!(matches!(err, SqliteError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_redeem_missing_card() {
        let pool = setup_test_pool().await;
        let result = redeem(&pool, 999, 1).await.unwrap();
        assert!(result.is_none());
    }
}
