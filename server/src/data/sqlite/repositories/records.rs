//! Generic record insert
//!
//! Inserts `{table, columns, values}` requests against a closed registry.
//! Table and column names never reach the SQL text unless they match the
//! registry exactly; values are always bound.

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;

/// One insertable table and its writable columns
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// Tables open to the generic insert endpoint.
///
/// Autoincrement ids and junction bookkeeping columns are writable here
/// on purpose: the endpoint exists for data seeding, not end users.
pub const TABLE_REGISTRY: &[TableSpec] = &[
    TableSpec {
        name: "users",
        columns: &["id", "email", "display_name", "points", "created_at"],
    },
    TableSpec {
        name: "places",
        columns: &["name", "address", "type", "description", "created_at"],
    },
    TableSpec {
        name: "restaurants",
        columns: &["name", "address", "cuisine", "rating"],
    },
    TableSpec {
        name: "events",
        columns: &[
            "id",
            "title",
            "event_date",
            "description",
            "rating",
            "place_name",
            "place_address",
        ],
    },
    TableSpec {
        name: "reviews",
        columns: &[
            "id",
            "user_id",
            "place_name",
            "place_address",
            "rating",
            "message",
            "created_at",
        ],
    },
    TableSpec {
        name: "gift_cards",
        columns: &["id", "franchise", "value", "points", "user_id"],
    },
    TableSpec {
        name: "travel_passes",
        columns: &["id", "name", "cost", "start_date", "end_date"],
    },
    TableSpec {
        name: "notifications",
        columns: &["id", "message", "created_at"],
    },
    TableSpec {
        name: "notification_receipts",
        columns: &["user_id", "notification_id"],
    },
];

/// Look up a table in the registry by exact name
pub fn lookup_table(name: &str) -> Option<&'static TableSpec> {
    TABLE_REGISTRY.iter().find(|spec| spec.name == name)
}

/// Insert one row.
///
/// `columns` must already be validated as a subset of `spec.columns` and
/// the same length as `values`.
pub async fn insert_record(
    pool: &SqlitePool,
    spec: &TableSpec,
    columns: &[String],
    values: &[String],
) -> Result<u64, SqliteError> {
    let placeholders = vec!["?"; values.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        spec.name,
        columns.join(", "),
        placeholders
    );

    let mut query = sqlx::query(&sql);
    for value in values {
        query = query.bind(value);
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}
