//! Database connection utilities.

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

/// Pragmas applied to every file-backed SQLite connection.
///
/// `foreign_keys` makes list deletion cascade to memberships. WAL keeps the
/// API server's readers from blocking a running stars import, and the busy
/// timeout lets concurrent ingests wait on the write lock instead of failing.
const SQLITE_PRAGMAS: &[&str] = &[
    "PRAGMA foreign_keys=ON",
    "PRAGMA journal_mode=WAL",
    "PRAGMA busy_timeout=5000",
    "PRAGMA synchronous=NORMAL",
];

async fn configure_sqlite(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    for pragma in SQLITE_PRAGMAS {
        db.execute(Statement::from_string(backend, pragma.to_string()))
            .await?;
    }
    Ok(())
}

/// Connect to the item store.
///
/// Accepts `sqlite://` and `postgres://` URLs. File-backed SQLite databases
/// get [`SQLITE_PRAGMAS`] applied; `sqlite::memory:` is left as is.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    if database_url.starts_with("sqlite://") {
        configure_sqlite(&db).await?;
        tracing::debug!("Configured SQLite connection");
    }
    Ok(db)
}

/// Connect and bring the schema up to date.
///
/// The CLI and the API server go through this so ingestion never runs against
/// a stale schema.
///
/// ```ignore
/// let db = linkhoard::connect_and_migrate("sqlite://linkhoard.db?mode=rwc").await?;
/// ```
#[cfg(feature = "migrate")]
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    use sea_orm_migration::MigratorTrait;

    let db = connect(database_url).await?;
    crate::migration::Migrator::up(&db, None).await?;
    tracing::debug!("Database schema is up to date");
    Ok(db)
}
