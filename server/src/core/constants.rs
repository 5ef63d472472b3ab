// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "CityHop";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "cityhop";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".cityhop";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "cityhop.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "CITYHOP_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "CITYHOP_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "CITYHOP_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "CITYHOP_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "CITYHOP_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5177;

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "CITYHOP_DATA_DIR";

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite database filename
pub const SQLITE_DB_FILENAME: &str = "cityhop.db";

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// SQLite cache size (negative = KB, so -64000 = 64MB)
pub const SQLITE_CACHE_SIZE: &str = "-64000";

/// SQLite WAL auto-checkpoint threshold (pages, ~4MB at 1000)
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// WAL checkpoint interval in seconds (5 minutes)
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

/// Environment variable for SQLite pool max connections
pub const ENV_DB_MAX_CONNECTIONS: &str = "CITYHOP_DB_MAX_CONNECTIONS";

// =============================================================================
// Request Body Limits
// =============================================================================

/// Default body limit for general API requests (1 MB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

// =============================================================================
// Query Limits
// =============================================================================

/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Maximum page size for list endpoints
pub const MAX_PAGE_SIZE: u32 = 500;

// =============================================================================
// Shutdown
// =============================================================================

/// Graceful shutdown timeout in seconds (5 minutes)
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 300;
