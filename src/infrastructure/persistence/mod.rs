use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use log::LevelFilter;
use sqlx::{
    any::{AnyConnectOptions, AnyPoolOptions, AnyRow},
    AnyPool, ConnectOptions, Row,
};
use std::str::FromStr;

mod categories;
mod sla;
mod tickets;

#[derive(Clone)]
pub struct Database {
    pub(crate) pool: AnyPool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        // Ensure drivers are installed for AnyPool
        sqlx::any::install_default_drivers();

        let connect_options = AnyConnectOptions::from_str(database_url)?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, std::time::Duration::from_secs(1));

        let pool = AnyPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .connect_with(connect_options)
            .await?;

        if database_url.starts_with("sqlite") {
            sqlx::query("PRAGMA busy_timeout = 5000")
                .execute(&pool)
                .await?;
            sqlx::query("PRAGMA foreign_keys = ON")
                .execute(&pool)
                .await?;
        }

        tracing::info!("Database pool ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Create the schema if it does not exist yet.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::info!("Database schema up to date");
        Ok(())
    }
}

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS sla_policies (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        low_first_response INTEGER NOT NULL CHECK(low_first_response >= 0),
        low_resolve_within INTEGER NOT NULL CHECK(low_resolve_within >= 0),
        medium_first_response INTEGER NOT NULL CHECK(medium_first_response >= 0),
        medium_resolve_within INTEGER NOT NULL CHECK(medium_resolve_within >= 0),
        high_first_response INTEGER NOT NULL CHECK(high_first_response >= 0),
        high_resolve_within INTEGER NOT NULL CHECK(high_resolve_within >= 0),
        urgent_first_response INTEGER NOT NULL CHECK(urgent_first_response >= 0),
        urgent_resolve_within INTEGER NOT NULL CHECK(urgent_resolve_within >= 0)
    )",
    "CREATE TABLE IF NOT EXISTS agents (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        is_admin INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE IF NOT EXISTS categories (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        fallback_admin_id TEXT REFERENCES agents(id)
    )",
    "CREATE TABLE IF NOT EXISTS category_agents (
        category_id TEXT NOT NULL REFERENCES categories(id),
        agent_id TEXT NOT NULL REFERENCES agents(id),
        position INTEGER NOT NULL,
        PRIMARY KEY (category_id, agent_id)
    )",
    "CREATE TABLE IF NOT EXISTS tickets (
        id TEXT PRIMARY KEY,
        subject TEXT NOT NULL,
        user_id TEXT NOT NULL,
        category_id TEXT NOT NULL,
        priority TEXT NOT NULL,
        status TEXT NOT NULL,
        agent_id TEXT,
        sla_id TEXT,
        created_at TEXT NOT NULL,
        completed_at TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_tickets_agent ON tickets(agent_id)",
    "CREATE TABLE IF NOT EXISTS ticket_comments (
        id TEXT PRIMARY KEY,
        ticket_id TEXT NOT NULL REFERENCES tickets(id),
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_ticket_comments_ticket ON ticket_comments(ticket_id)",
];

/// Read a nullable TEXT column. The Any driver reports NULL as a type
/// mismatch for `Option<String>`, so a failed read is treated as absent.
pub(crate) fn nullable_text(row: &AnyRow, column: &str) -> Option<String> {
    row.try_get::<Option<String>, _>(column).ok().flatten()
}

/// Fixed-width UTC form used for every timestamp this crate writes.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (read as UTC), a bare
/// `YYYY-MM-DD` date (start of day) and integer Unix seconds.
pub fn parse_timestamp(value: &str) -> DomainResult<DateTime<Utc>> {
    let value = value.trim();
    let invalid = || DomainError::Database(format!("Invalid timestamp: {}", value));

    if !value.is_empty() && value.trim_start_matches('-').bytes().all(|b| b.is_ascii_digit()) {
        let secs: i64 = value.parse().map_err(|_| invalid())?;
        return Utc.timestamp_opt(secs, 0).single().ok_or_else(invalid);
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .ok_or_else(invalid);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .map_err(|_| invalid())
}
