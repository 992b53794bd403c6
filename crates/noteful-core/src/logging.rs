//! Structured logging field name constants for noteful.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation can query by the same names across subsystems.
//! A field listed here is always written as `{ CONST } = value`; only
//! fields specific to a single event use a literal name.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Infrastructure failure surfaced to a client as 500 |
//! | WARN  | Recoverable issue (rejected input, pool pressure) |
//! | INFO  | Lifecycle events (startup, shutdown, seeding) |
//! | DEBUG | Repository operations and their outcomes |
//! | TRACE | Per-row detail |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID set by the request-id middleware (UUIDv7).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "database", "seed"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "pool", "folders", "notes"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "list", "create", "cascade_delete"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Folder UUID being operated on.
pub const FOLDER_ID: &str = "folder_id";

/// Note UUID being operated on.
pub const NOTE_ID: &str = "note_id";

/// Search term supplied by the client.
pub const SEARCH_TERM: &str = "search_term";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of rows returned by a query.
pub const RESULT_COUNT: &str = "result_count";

/// Number of rows changed by a statement.
pub const ROWS_AFFECTED: &str = "rows_affected";

// ─── Database fields ───────────────────────────────────────────────────────

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

/// Database table affected.
pub const DB_TABLE: &str = "db_table";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
