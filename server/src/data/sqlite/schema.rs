//! SQLite schema definitions
//!
//! Initial schema with all tables plus seed data for local development.
//! No migrations needed for first version.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Users
-- =============================================================================
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT UNIQUE CHECK(email IS NULL OR length(email) >= 3),
    display_name TEXT CHECK(display_name IS NULL OR length(display_name) <= 100),
    points INTEGER NOT NULL DEFAULT 0 CHECK(points >= 0),
    created_at INTEGER NOT NULL
);

-- =============================================================================
-- 2. Places (composite key: two places may share a name, never an address too)
-- =============================================================================
CREATE TABLE IF NOT EXISTS places (
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 100),
    address TEXT NOT NULL CHECK(length(address) >= 1 AND length(address) <= 200),
    type TEXT NOT NULL,
    description TEXT,
    created_at INTEGER NOT NULL,
    PRIMARY KEY (name, address)
);

CREATE INDEX IF NOT EXISTS idx_places_type ON places(type);

-- =============================================================================
-- 3. Restaurants (place subtype)
-- =============================================================================
CREATE TABLE IF NOT EXISTS restaurants (
    name TEXT NOT NULL,
    address TEXT NOT NULL,
    cuisine TEXT NOT NULL,
    rating REAL CHECK(rating IS NULL OR (rating >= 0 AND rating <= 5)),
    PRIMARY KEY (name, address),
    FOREIGN KEY (name, address) REFERENCES places(name, address) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_restaurants_cuisine ON restaurants(cuisine);

-- =============================================================================
-- 4. Events (references places)
-- =============================================================================
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL CHECK(length(title) >= 1 AND length(title) <= 200),
    event_date TEXT NOT NULL,
    description TEXT,
    rating INTEGER CHECK(rating IS NULL OR (rating >= 1 AND rating <= 5)),
    place_name TEXT NOT NULL,
    place_address TEXT NOT NULL,
    FOREIGN KEY (place_name, place_address) REFERENCES places(name, address) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_events_date ON events(event_date);
CREATE INDEX IF NOT EXISTS idx_events_place ON events(place_name, place_address);

-- =============================================================================
-- 5. Reviews (references users and places)
-- =============================================================================
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    place_name TEXT NOT NULL,
    place_address TEXT NOT NULL,
    rating INTEGER NOT NULL CHECK(rating >= 1 AND rating <= 5),
    message TEXT,
    created_at INTEGER NOT NULL,
    FOREIGN KEY (place_name, place_address) REFERENCES places(name, address) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_reviews_place ON reviews(place_name, place_address);
CREATE INDEX IF NOT EXISTS idx_reviews_user ON reviews(user_id);

-- =============================================================================
-- 6. Gift cards (user_id is NULL until the card is claimed)
-- =============================================================================
CREATE TABLE IF NOT EXISTS gift_cards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    franchise TEXT NOT NULL,
    value INTEGER NOT NULL CHECK(value > 0),
    points INTEGER NOT NULL DEFAULT 0 CHECK(points >= 0),
    user_id INTEGER REFERENCES users(id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_gift_cards_user ON gift_cards(user_id);
CREATE INDEX IF NOT EXISTS idx_gift_cards_unclaimed ON gift_cards(franchise) WHERE user_id IS NULL;

-- =============================================================================
-- 7. Travel passes and holders junction
-- =============================================================================
CREATE TABLE IF NOT EXISTS travel_passes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    cost INTEGER NOT NULL CHECK(cost >= 0),
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS travel_pass_holders (
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    pass_id INTEGER NOT NULL REFERENCES travel_passes(id) ON DELETE CASCADE,
    redeemed_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, pass_id)
);

CREATE INDEX IF NOT EXISTS idx_pass_holders_pass ON travel_pass_holders(pass_id);

-- =============================================================================
-- 8. Notifications and receipts junction
-- =============================================================================
CREATE TABLE IF NOT EXISTS notifications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    message TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS notification_receipts (
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    notification_id INTEGER NOT NULL REFERENCES notifications(id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, notification_id)
);

CREATE INDEX IF NOT EXISTS idx_receipts_user ON notification_receipts(user_id);

-- =============================================================================
-- Seed Data (inserted in dependency order)
-- =============================================================================

INSERT OR IGNORE INTO users (id, email, display_name, points, created_at)
VALUES (1, 'local@cityhop.dev', 'Local User', 120, strftime('%s', 'now'));

INSERT OR IGNORE INTO users (id, email, display_name, points, created_at)
VALUES (2, 'sam@cityhop.dev', 'Sam Rivers', 45, strftime('%s', 'now'));

INSERT OR IGNORE INTO places (name, address, type, description, created_at)
VALUES ('Stanley Park', '610 Pipeline Rd', 'Park', 'Urban park with seawall and trails', strftime('%s', 'now'));

INSERT OR IGNORE INTO places (name, address, type, description, created_at)
VALUES ('Granville Island Market', '1689 Johnston St', 'Market', 'Public market and food hall', strftime('%s', 'now'));

INSERT OR IGNORE INTO places (name, address, type, description, created_at)
VALUES ('Miku', '200 Granville St', 'Restaurant', 'Waterfront aburi sushi', strftime('%s', 'now'));

INSERT OR IGNORE INTO restaurants (name, address, cuisine, rating)
VALUES ('Miku', '200 Granville St', 'Japanese', 4.6);

INSERT OR IGNORE INTO events (id, title, event_date, description, rating, place_name, place_address)
VALUES (1, 'Summer Cinema', '2026-07-14', 'Outdoor movie night', 5, 'Stanley Park', '610 Pipeline Rd');

INSERT OR IGNORE INTO events (id, title, event_date, description, rating, place_name, place_address)
VALUES (2, 'Winter Market', '2026-12-05', 'Artisan stalls and food trucks', 4, 'Granville Island Market', '1689 Johnston St');

INSERT OR IGNORE INTO reviews (id, user_id, place_name, place_address, rating, message, created_at)
VALUES (1, 2, 'Stanley Park', '610 Pipeline Rd', 5, 'Best seawall walk in town', strftime('%s', 'now'));

INSERT OR IGNORE INTO gift_cards (id, franchise, value, points)
VALUES (1, 'Beanaround Coffee', 25, 100);

INSERT OR IGNORE INTO gift_cards (id, franchise, value, points)
VALUES (2, 'Pedal Bikes', 50, 200);

INSERT OR IGNORE INTO travel_passes (id, name, cost, start_date, end_date)
VALUES (1, 'Day Explorer', 15, '2026-01-01', '2026-12-31');

INSERT OR IGNORE INTO travel_passes (id, name, cost, start_date, end_date)
VALUES (2, 'Monthly Commuter', 105, '2026-01-01', '2026-12-31');

INSERT OR IGNORE INTO notifications (id, message, created_at)
VALUES (1, 'Welcome to CityHop', strftime('%s', 'now'));

INSERT OR IGNORE INTO notification_receipts (user_id, notification_id)
VALUES (1, 1);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn test_schema_version_is_positive() {
        assert!(SCHEMA_VERSION > 0);
    }

    #[test]
    fn test_schema_contains_required_tables() {
        let required_tables = [
            "schema_version",
            "schema_migrations",
            "users",
            "places",
            "restaurants",
            "events",
            "reviews",
            "gift_cards",
            "travel_passes",
            "travel_pass_holders",
            "notifications",
            "notification_receipts",
        ];

        for table in required_tables {
            assert!(
                SCHEMA.contains(&format!("CREATE TABLE IF NOT EXISTS {}", table)),
                "Schema missing table: {}",
                table
            );
        }
    }

    #[test]
    fn test_schema_contains_seed_data() {
        assert!(
            SCHEMA.contains("INSERT OR IGNORE INTO users"),
            "Schema missing seed users"
        );
        assert!(
            SCHEMA.contains("INSERT OR IGNORE INTO places"),
            "Schema missing seed places"
        );
        assert!(
            SCHEMA.contains("INSERT OR IGNORE INTO gift_cards"),
            "Schema missing seed gift cards"
        );
    }
}
