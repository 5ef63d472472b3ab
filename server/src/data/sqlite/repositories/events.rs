//! Event repository
//!
//! Date-bounded listing, creation against an existing place, the
//! events-at-place join, and the per-place average rating aggregation.

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::{EventRow, PlaceRatingRow};

const SELECT_COLUMNS: &str =
    "id, title, event_date, description, rating, place_name, place_address";

/// List events, optionally bounded by date.
///
/// With `after`, returns events on or after that date, soonest first.
/// With `before`, returns events strictly before it, most recent first.
/// `after` wins if both are passed.
pub async fn list_events(
    pool: &SqlitePool,
    after: Option<&str>,
    before: Option<&str>,
) -> Result<Vec<EventRow>, SqliteError> {
    let rows = match (after, before) {
        (Some(date), _) => {
            sqlx::query_as::<_, EventRow>(&format!(
                "SELECT {} FROM events WHERE event_date >= ? ORDER BY event_date ASC",
                SELECT_COLUMNS
            ))
            .bind(date)
            .fetch_all(pool)
            .await?
        }
        (None, Some(date)) => {
            sqlx::query_as::<_, EventRow>(&format!(
                "SELECT {} FROM events WHERE event_date < ? ORDER BY event_date DESC",
                SELECT_COLUMNS
            ))
            .bind(date)
            .fetch_all(pool)
            .await?
        }
        (None, None) => {
            sqlx::query_as::<_, EventRow>(&format!(
                "SELECT {} FROM events ORDER BY event_date ASC",
                SELECT_COLUMNS
            ))
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

/// Create a new event at an existing place
pub async fn create_event(
    pool: &SqlitePool,
    title: &str,
    event_date: &str,
    description: Option<&str>,
    rating: Option<i64>,
    place_name: &str,
    place_address: &str,
) -> Result<EventRow, SqliteError> {
    let result = sqlx::query(
        "INSERT INTO events (title, event_date, description, rating, place_name, place_address) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(title)
    .bind(event_date)
    .bind(description)
    .bind(rating)
    .bind(place_name)
    .bind(place_address)
    .execute(pool)
    .await?;

    Ok(EventRow {
        id: result.last_insert_rowid(),
        title: title.to_string(),
        event_date: event_date.to_string(),
        description: description.map(str::to_string),
        rating,
        place_name: place_name.to_string(),
        place_address: place_address.to_string(),
    })
}

/// All events occurring at one place
pub async fn list_for_place(
    pool: &SqlitePool,
    place_name: &str,
    place_address: &str,
) -> Result<Vec<EventRow>, SqliteError> {
    let rows = sqlx::query_as::<_, EventRow>(&format!(
        "SELECT {} FROM events WHERE place_name = ? AND place_address = ? ORDER BY event_date ASC",
        SELECT_COLUMNS
    ))
    .bind(place_name)
    .bind(place_address)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Average event rating per place, for places with at least one rated event
pub async fn average_rating_per_place(
    pool: &SqlitePool,
) -> Result<Vec<PlaceRatingRow>, SqliteError> {
    let rows = sqlx::query_as::<_, PlaceRatingRow>(
        r#"
        SELECT place_name, place_address, AVG(rating) AS average_rating
        FROM events
        WHERE rating IS NOT NULL
        GROUP BY place_name, place_address
        ORDER BY place_name, place_address
        "#,
    )
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
    async fn test_create_event() {
        let pool = setup_test_pool().await;
        let event = create_event(
            &pool,
            "Food Truck Friday",
            "2026-09-04",
            Some("Weekly food trucks"),
            None,
            "Stanley Park",
            "610 Pipeline Rd",
        )
        .await
        .unwrap();

        assert!(event.id > 0);
        assert_eq!(event.title, "Food Truck Friday");
    }

    #[tokio::test]
    async fn test_create_event_requires_existing_place() {
        let pool = setup_test_pool().await;
        let err = create_event(
            &pool,
            "Ghost Event",
            "2026-09-04",
            None,
            None,
            "Nowhere",
            "0 Nothing St",
        )
        .await
        .unwrap_err();

        assert!(err.is_foreign_key_violation());
    }

    #[tokio::test]
    async fn test_list_events_after_date() {
        let pool = setup_test_pool().await;
        let events = list_events(&pool, Some("2026-10-01"), None).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Winter Market");
    }

    #[tokio::test]
    async fn test_list_events_before_date() {
        let pool = setup_test_pool().await;
        let events = list_events(&pool, None, Some("2026-10-01")).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Summer Cinema");
    }

    #[tokio::test]
    async fn test_list_events_unbounded_is_ascending() {
        let pool = setup_test_pool().await;
        let events = list_events(&pool, None, None).await.unwrap();

        assert_eq!(events.len(), 2);
        assert!(events[0].event_date <= events[1].event_date);
    }

    #[tokio::test]
    async fn test_list_for_place() {
        let pool = setup_test_pool().await;
        let events = list_for_place(&pool, "Stanley Park", "610 Pipeline Rd")
            .await
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Summer Cinema");
    }

    #[tokio::test]
    async fn test_average_rating_per_place() {
        let pool = setup_test_pool().await;
        create_event(
            &pool,
            "Autumn Cinema",
            "2026-10-14",
            None,
            Some(3),
            "Stanley Park",
            "610 Pipeline Rd",
        )
        .await
        .unwrap();

        let ratings = average_rating_per_place(&pool).await.unwrap();
        let stanley = ratings
            .iter()
            .find(|r| r.place_name == "Stanley Park")
            .unwrap();
        // Seed event is rated 5, the new one 3
        assert!((stanley.average_rating - 4.0).abs() < f64::EPSILON);
    }
}
