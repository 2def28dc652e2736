//! SQLite store for course notes.
//!
//! Pool settings follow SQLite guidance for read-heavy web workloads:
//! WAL mode, NORMAL synchronous, busy timeout. The site never writes
//! after startup, so a single pool serves both the seed transaction
//! and request-time reads.

pub mod queries;
pub mod records;

use std::time::Duration;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
};
use time::OffsetDateTime;

use crate::{config::DatabaseConfig, error::SiteError};

/// Handle to the course-notes store.
///
/// Cheap to clone; handlers receive it through the shared router state and
/// pass the inner pool to the query functions explicitly.
#[derive(Clone, Debug)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Opens the SQLite database described by `config`, creating the file
    /// if it does not exist.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, SiteError> {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
            .pragma("temp_store", "MEMORY")
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await?;

        tracing::info!(
            path = %config.path.display(),
            max_connections = config.max_connections,
            "Course-notes database opened"
        );

        Ok(Self { pool })
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Ensures the schema exists and seeds demo data into an empty store.
    ///
    /// Safe to call against an already-initialized store: table creation is
    /// `IF NOT EXISTS` and seeding is skipped when any subject is present.
    /// Schema creation and seeding are separate steps, so a failed seed
    /// leaves the schema intact.
    pub async fn initialize(&self) -> Result<(), SiteError> {
        ensure_schema(&self.pool).await?;

        if is_populated(&self.pool).await? {
            tracing::debug!("Store already populated, skipping demo seed");
            return Ok(());
        }

        seed_demo_data(&self.pool).await?;
        tracing::info!("Seeded demo course data");
        Ok(())
    }
}

/// Creates the four tables if they don't exist.
async fn ensure_schema(pool: &SqlitePool) -> Result<(), SiteError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subjects (
            id   INTEGER PRIMARY KEY,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sections (
            id           INTEGER PRIMARY KEY,
            name         TEXT NOT NULL,
            url          TEXT NOT NULL,
            seq          INTEGER NOT NULL,
            subject_code TEXT NOT NULL REFERENCES subjects (code),
            UNIQUE (subject_code, name),
            UNIQUE (subject_code, url),
            UNIQUE (subject_code, seq)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS paragraphs (
            id         INTEGER PRIMARY KEY,
            html       TEXT NOT NULL,
            seq        INTEGER NOT NULL,
            section_id INTEGER NOT NULL REFERENCES sections (id),
            UNIQUE (section_id, seq)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id           INTEGER PRIMARY KEY,
            name         TEXT NOT NULL,
            email        TEXT NOT NULL,
            created_at   TEXT NOT NULL,
            text         TEXT NOT NULL,
            paragraph_id INTEGER NOT NULL REFERENCES paragraphs (id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Whether the store already holds any subject.
async fn is_populated(pool: &SqlitePool) -> Result<bool, SiteError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subjects")
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Inserts the fixed demo records in a single transaction.
async fn seed_demo_data(pool: &SqlitePool) -> Result<(), SiteError> {
    let mut tx = pool.begin().await?;

    insert_subject(&mut tx, "mast30020", "Prob & Stat").await?;
    let sigalg_id = insert_section(&mut tx, "mast30020", "Sigma algebras", "sigalg", 1).await?;
    insert_section(&mut tx, "mast30020", "Random variables", "randvar", 2).await?;
    insert_section(&mut tx, "mast30020", "Expectation", "expectation", 3).await?;

    let paragraph_id = sqlx::query("INSERT INTO paragraphs (html, seq, section_id) VALUES (?1, ?2, ?3)")
        .bind("Here is some maths")
        .bind(1_i64)
        .bind(sigalg_id)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    sqlx::query(
        "INSERT INTO comments (name, email, created_at, text, paragraph_id) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind("AF")
    .bind("a@a.a")
    .bind(OffsetDateTime::now_utc())
    .bind("That's some cool maths.")
    .bind(paragraph_id)
    .execute(&mut *tx)
    .await?;

    insert_subject(&mut tx, "mast30025", "Linear Models").await?;
    insert_section(&mut tx, "mast30025", "Linear Algebra", "linalg", 1).await?;
    insert_section(&mut tx, "mast30025", "Random variables", "randvar", 2).await?;
    insert_section(&mut tx, "mast30025", "Expectation", "expectation", 3).await?;

    tx.commit().await?;
    Ok(())
}

async fn insert_subject(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    code: &str,
    name: &str,
) -> Result<(), SiteError> {
    sqlx::query("INSERT INTO subjects (code, name) VALUES (?1, ?2)")
        .bind(code)
        .bind(name)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

async fn insert_section(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    subject_code: &str,
    name: &str,
    url: &str,
    seq: i64,
) -> Result<i64, SiteError> {
    let result = sqlx::query(
        "INSERT INTO sections (name, url, seq, subject_code) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(name)
    .bind(url)
    .bind(seq)
    .bind(subject_code)
    .execute(&mut **tx)
    .await?;
    Ok(result.last_insert_rowid())
}
