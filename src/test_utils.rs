//! Shared test utilities for `LeanSubs`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{member, organization, session, subscription},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a [`member::CreateMember`] input with sensible defaults.
///
/// # Defaults
/// * `membership_type`: "standard"
/// * `status`: "active"
/// * membership period: now until 30 days from now
#[must_use]
pub fn test_member_input(full_name: &str, email: &str, credits: i64) -> member::CreateMember {
    let now = chrono::Utc::now();
    member::CreateMember {
        full_name: full_name.to_string(),
        email: email.to_string(),
        phone: None,
        membership_type: "standard".to_string(),
        status: member::STATUS_ACTIVE.to_string(),
        start_date: now,
        end_date: now + chrono::Duration::days(30),
        credits,
        notes: None,
    }
}

/// Creates a test member with 10 starting credits.
pub async fn create_test_member(
    db: &DatabaseConnection,
    user_id: &str,
    full_name: &str,
    email: &str,
) -> Result<entities::member::Model> {
    member::create(db, user_id, test_member_input(full_name, email, 10)).await
}

/// Creates a test member with an explicit starting balance.
pub async fn create_member_with_credits(
    db: &DatabaseConnection,
    user_id: &str,
    full_name: &str,
    email: &str,
    credits: i64,
) -> Result<entities::member::Model> {
    member::create(db, user_id, test_member_input(full_name, email, credits)).await
}

/// Creates a test session starting now for the given member.
pub async fn create_test_session(
    db: &DatabaseConnection,
    user_id: &str,
    member_id: i64,
    credits_used: i64,
) -> Result<entities::session::Model> {
    session::create(
        db,
        user_id,
        session::CreateSession {
            member_id,
            start_time: chrono::Utc::now(),
            end_time: None,
            credits_used: Some(credits_used),
            notes: None,
        },
    )
    .await
}

/// Creates a test subscription payment for the given member.
pub async fn create_test_subscription(
    db: &DatabaseConnection,
    organization_id: i64,
    member_id: i64,
    amount: f64,
    credits: i64,
) -> Result<entities::subscription::Model> {
    subscription::create(
        db,
        organization_id,
        subscription::CreateSubscription {
            member_id,
            amount,
            credits,
            notes: None,
        },
    )
    .await
}

/// Creates a test organization with default settings.
pub async fn create_test_organization(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::organization::Model> {
    organization::create(
        db,
        organization::CreateOrganization {
            name: name.to_string(),
            currency: None,
            session_default_length_minutes: None,
        },
    )
    .await
}

/// Sets up a complete test environment with one member under the "owner"
/// account holding the given starting balance.
/// Returns (db, member) for common ledger test scenarios.
pub async fn setup_with_member(
    credits: i64,
) -> Result<(DatabaseConnection, entities::member::Model)> {
    let db = setup_test_db().await?;
    let member =
        create_member_with_credits(&db, "owner", "Alice Nguyen", "alice@example.com", credits)
            .await?;
    Ok((db, member))
}
