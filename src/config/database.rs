//! Database configuration module.
//!
//! Handles `SQLite` connection setup and table creation using `SeaORM`. The
//! schema is generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the database always matches the
//! Rust struct definitions without manual SQL. Table creation is idempotent
//! (`IF NOT EXISTS`) so the bootstrap binary can be re-run safely.

use crate::entities::{Member, Organization, Session, Subscription};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/leansubs.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database resolved by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all ledger tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut member_table = schema.create_table_from_entity(Member);
    let mut session_table = schema.create_table_from_entity(Session);
    let mut subscription_table = schema.create_table_from_entity(Subscription);
    let mut organization_table = schema.create_table_from_entity(Organization);

    db.execute(builder.build(member_table.if_not_exists()))
        .await?;
    db.execute(builder.build(session_table.if_not_exists()))
        .await?;
    db.execute(builder.build(subscription_table.if_not_exists()))
        .await?;
    db.execute(builder.build(organization_table.if_not_exists()))
        .await?;

    Ok(())
}
