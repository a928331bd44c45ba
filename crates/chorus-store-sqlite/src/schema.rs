//! SQL schema for the Chorus SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS stores (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL,
    area  TEXT
);

-- Feedback is insert-only. The single UPDATE ever issued moves `status`
-- from 'New' to 'Resolved'.
CREATE TABLE IF NOT EXISTS feedback (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    platform         TEXT NOT NULL,
    text             TEXT NOT NULL,
    timestamp        TEXT NOT NULL,   -- RFC 3339 UTC, fixed-width micros
    category         TEXT NOT NULL CHECK (category IN
                       ('Quality of food', 'Customer service', 'Speed', 'Ambience')),
    sentiment        TEXT NOT NULL CHECK (sentiment IN
                       ('Positive', 'Neutral', 'Negative')),
    sentiment_score  REAL NOT NULL CHECK (sentiment_score BETWEEN -1.0 AND 1.0),
    store_id         INTEGER,         -- weak reference to stores(id)
    status           TEXT NOT NULL DEFAULT 'New' CHECK (status IN ('New', 'Resolved'))
);

CREATE INDEX IF NOT EXISTS feedback_timestamp_idx ON feedback(timestamp);
CREATE INDEX IF NOT EXISTS feedback_store_idx     ON feedback(store_id);
CREATE INDEX IF NOT EXISTS stores_area_idx        ON stores(area);

PRAGMA user_version = 1;
";
