//! Member business logic - Handles all member-related operations.
//!
//! Provides functions for creating, retrieving, updating, and deleting member
//! records, plus the crate-internal credit adjustment the session and
//! subscription ledgers use. Email uniqueness is enforced per owning account
//! with a case-sensitive exact match. Deleting a member does not cascade to
//! sessions or subscriptions; their `member_id` is left dangling by design.

use crate::{
    entities::{Member, member},
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, Set, prelude::*};

/// Member status: membership currently active
pub const STATUS_ACTIVE: &str = "active";
/// Member status: membership period has ended
pub const STATUS_EXPIRED: &str = "expired";
/// Member status: membership was cancelled
pub const STATUS_CANCELLED: &str = "cancelled";
/// Member status: membership is temporarily paused
pub const STATUS_PAUSED: &str = "paused";

/// Input for creating a new member.
#[derive(Debug, Clone)]
pub struct CreateMember {
    /// Full display name (required, trimmed)
    pub full_name: String,
    /// Contact email, unique per owning account (required)
    pub email: String,
    /// Optional contact phone number
    pub phone: Option<String>,
    /// Membership plan identifier
    pub membership_type: String,
    /// Initial membership status
    pub status: String,
    /// Membership start date
    pub start_date: DateTimeUtc,
    /// Membership end date
    pub end_date: DateTimeUtc,
    /// Starting credit balance (must be non-negative)
    pub credits: i64,
    /// Free-text notes
    pub notes: Option<String>,
}

/// Partial update for an existing member. `None` fields are left unchanged.
///
/// The credit balance is deliberately absent: it only moves through
/// [`adjust_credits`], driven by the session and subscription ledgers.
#[derive(Debug, Clone, Default)]
pub struct UpdateMember {
    /// Id of the member to update
    pub id: i64,
    /// New full name
    pub full_name: Option<String>,
    /// New email (re-checked against the per-account uniqueness rule)
    pub email: Option<String>,
    /// New phone number
    pub phone: Option<String>,
    /// New membership plan
    pub membership_type: Option<String>,
    /// New membership status
    pub status: Option<String>,
    /// New membership start date
    pub start_date: Option<DateTimeUtc>,
    /// New membership end date
    pub end_date: Option<DateTimeUtc>,
    /// New notes
    pub notes: Option<String>,
}

/// Listing filters for [`get_all`]. All filters are optional and combined.
#[derive(Debug, Clone, Default)]
pub struct MemberFilters {
    /// Only members with this status
    pub status: Option<String>,
    /// Only members on this membership plan
    pub membership_type: Option<String>,
    /// Substring search over name and email (case-insensitive)
    pub search: Option<String>,
}

/// Per-status member counts for dashboard statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberStats {
    /// Total members for the account
    pub total: usize,
    /// Members with `"active"` status
    pub active: usize,
    /// Members with `"expired"` status
    pub expired: usize,
    /// Members with `"cancelled"` status
    pub cancelled: usize,
    /// Members with `"paused"` status
    pub paused: usize,
}

/// Retrieves all members for an account, newest first, with optional filters.
pub async fn get_all(
    db: &DatabaseConnection,
    user_id: &str,
    filters: &MemberFilters,
) -> Result<Vec<member::Model>> {
    let mut query = Member::find().filter(member::Column::UserId.eq(user_id));

    if let Some(status) = &filters.status {
        query = query.filter(member::Column::Status.eq(status.as_str()));
    }
    if let Some(membership_type) = &filters.membership_type {
        query = query.filter(member::Column::MembershipType.eq(membership_type.as_str()));
    }
    if let Some(search) = &filters.search {
        query = query.filter(
            Condition::any()
                .add(member::Column::FullName.contains(search.as_str()))
                .add(member::Column::Email.contains(search.as_str())),
        );
    }

    query
        .order_by_desc(member::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a member by its unique id, regardless of owning account.
pub async fn get_by_id<C>(db: &C, id: i64) -> Result<Option<member::Model>>
where
    C: ConnectionTrait,
{
    Member::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Finds a member by id scoped to an owning account.
///
/// Used wherever tenant isolation matters: a member belonging to a different
/// account is indistinguishable from a missing one.
pub async fn get_by_id_for_user<C>(
    db: &C,
    id: i64,
    user_id: &str,
) -> Result<Option<member::Model>>
where
    C: ConnectionTrait,
{
    Member::find_by_id(id)
        .filter(member::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new member under the given account.
///
/// Validates that name and email are non-empty and the starting balance is
/// non-negative, then enforces per-account email uniqueness (case-sensitive
/// exact match) before inserting.
pub async fn create(
    db: &DatabaseConnection,
    user_id: &str,
    input: CreateMember,
) -> Result<member::Model> {
    let full_name = input.full_name.trim().to_string();
    if full_name.is_empty() {
        return Err(Error::Validation {
            message: "Member name cannot be empty".to_string(),
        });
    }

    let email = input.email.trim().to_string();
    if email.is_empty() {
        return Err(Error::Validation {
            message: "Member email cannot be empty".to_string(),
        });
    }

    if input.credits < 0 {
        return Err(Error::Validation {
            message: format!("Starting credits cannot be negative (got {})", input.credits),
        });
    }

    let duplicate = Member::find()
        .filter(member::Column::UserId.eq(user_id))
        .filter(member::Column::Email.eq(email.as_str()))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(Error::DuplicateEmail { email });
    }

    let now = chrono::Utc::now();
    let model = member::ActiveModel {
        user_id: Set(user_id.to_string()),
        full_name: Set(full_name),
        email: Set(email),
        phone: Set(input.phone),
        membership_type: Set(input.membership_type),
        status: Set(input.status),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        credits: Set(input.credits),
        notes: Set(input.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Applies a partial update to an existing member.
///
/// A changed email is re-checked against the per-account uniqueness rule,
/// excluding the member itself. Fails with `MemberNotFound` if the id is
/// absent.
pub async fn update(db: &DatabaseConnection, input: UpdateMember) -> Result<member::Model> {
    let existing = Member::find_by_id(input.id)
        .one(db)
        .await?
        .ok_or(Error::MemberNotFound { id: input.id })?;

    if let Some(email) = &input.email
        && email != &existing.email
    {
        let duplicate = Member::find()
            .filter(member::Column::UserId.eq(existing.user_id.as_str()))
            .filter(member::Column::Email.eq(email.as_str()))
            .filter(member::Column::Id.ne(existing.id))
            .one(db)
            .await?;
        if duplicate.is_some() {
            return Err(Error::DuplicateEmail {
                email: email.clone(),
            });
        }
    }

    let mut model: member::ActiveModel = existing.into();
    if let Some(full_name) = input.full_name {
        model.full_name = Set(full_name);
    }
    if let Some(email) = input.email {
        model.email = Set(email);
    }
    if let Some(phone) = input.phone {
        model.phone = Set(Some(phone));
    }
    if let Some(membership_type) = input.membership_type {
        model.membership_type = Set(membership_type);
    }
    if let Some(status) = input.status {
        model.status = Set(status);
    }
    if let Some(start_date) = input.start_date {
        model.start_date = Set(start_date);
    }
    if let Some(end_date) = input.end_date {
        model.end_date = Set(end_date);
    }
    if let Some(notes) = input.notes {
        model.notes = Set(Some(notes));
    }
    model.updated_at = Set(chrono::Utc::now());

    let result = model.update(db).await?;
    Ok(result)
}

/// Deletes a member record.
///
/// Does NOT cascade: sessions and subscriptions referencing the member keep
/// their dangling `member_id` and degrade to "Unknown Member" in listings.
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<()> {
    let existing = Member::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::MemberNotFound { id })?;

    existing.delete(db).await?;
    Ok(())
}

/// Adjusts a member's credit balance by a relative delta.
///
/// Crate-internal: only the session and subscription ledgers call this, and
/// any floor checks happen in the caller before the adjustment. The update is
/// a single relative statement (`credits = credits + delta`) so it can run
/// safely inside the caller's transaction without a read-modify-write race.
pub(crate) async fn adjust_credits<C>(
    db: &C,
    member_id: i64,
    delta: i64,
) -> Result<member::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    Member::find_by_id(member_id)
        .one(db)
        .await?
        .ok_or(Error::MemberNotFound { id: member_id })?;

    Member::update_many()
        .col_expr(
            member::Column::Credits,
            Expr::col(member::Column::Credits).add(delta),
        )
        .col_expr(member::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(member::Column::Id.eq(member_id))
        .exec(db)
        .await?;

    Member::find_by_id(member_id)
        .one(db)
        .await?
        .ok_or(Error::MemberNotFound { id: member_id })
}

/// Computes per-status member counts for an account.
pub async fn get_stats(db: &DatabaseConnection, user_id: &str) -> Result<MemberStats> {
    let members = get_all(db, user_id, &MemberFilters::default()).await?;

    Ok(MemberStats {
        total: members.len(),
        active: members.iter().filter(|m| m.status == STATUS_ACTIVE).count(),
        expired: members
            .iter()
            .filter(|m| m.status == STATUS_EXPIRED)
            .count(),
        cancelled: members
            .iter()
            .filter(|m| m.status == STATUS_CANCELLED)
            .count(),
        paused: members.iter().filter(|m| m.status == STATUS_PAUSED).count(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_member_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // Empty name
        let result = create(&db, "owner", test_member_input("", "a@example.com", 0)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        // Whitespace-only name
        let result = create(&db, "owner", test_member_input("   ", "a@example.com", 0)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        // Empty email
        let result = create(&db, "owner", test_member_input("Alice", "", 0)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        // Negative starting credits
        let result = create(&db, "owner", test_member_input("Alice", "a@example.com", -1)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_member_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let member = create_test_member(&db, "owner", "Alice Nguyen", "alice@example.com").await?;

        assert_eq!(member.user_id, "owner");
        assert_eq!(member.full_name, "Alice Nguyen");
        assert_eq!(member.email, "alice@example.com");
        assert_eq!(member.credits, 10);
        assert_eq!(member.status, STATUS_ACTIVE);

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_same_account() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_member(&db, "owner", "Alice", "alice@example.com").await?;
        let result = create(
            &db,
            "owner",
            test_member_input("Another Alice", "alice@example.com", 0),
        )
        .await;

        assert!(matches!(result.unwrap_err(), Error::DuplicateEmail { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_same_email_different_accounts_both_succeed() -> Result<()> {
        let db = setup_test_db().await?;

        let first = create_test_member(&db, "owner-a", "Alice", "alice@example.com").await?;
        let second = create_test_member(&db, "owner-b", "Alice", "alice@example.com").await?;

        assert_ne!(first.id, second.id);
        assert_eq!(first.email, second.email);
        Ok(())
    }

    #[tokio::test]
    async fn test_email_uniqueness_is_case_sensitive() -> Result<()> {
        let db = setup_test_db().await?;

        // Exact-match comparison: a different casing is a different email.
        create_test_member(&db, "owner", "Alice", "Alice@example.com").await?;
        let result = create(&db, "owner", test_member_input("Alice", "alice@example.com", 0)).await;
        assert!(result.is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_member_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "owner", "Alice", "alice@example.com").await?;

        let updated = update(
            &db,
            UpdateMember {
                id: member.id,
                full_name: Some("Alice Tran".to_string()),
                status: Some(STATUS_PAUSED.to_string()),
                notes: Some("moved abroad".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.full_name, "Alice Tran");
        assert_eq!(updated.status, STATUS_PAUSED);
        assert_eq!(updated.notes, Some("moved abroad".to_string()));
        // Untouched fields survive the partial update
        assert_eq!(updated.email, "alice@example.com");
        assert_eq!(updated.credits, member.credits);
        assert!(updated.updated_at >= member.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_member_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update(
            &db,
            UpdateMember {
                id: 999,
                full_name: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;

        assert!(matches!(
            result.unwrap_err(),
            Error::MemberNotFound { id: 999 }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_email_duplicate_check() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_member(&db, "owner", "Alice", "alice@example.com").await?;
        let bob = create_test_member(&db, "owner", "Bob", "bob@example.com").await?;

        // Changing to a colliding email fails
        let result = update(
            &db,
            UpdateMember {
                id: bob.id,
                email: Some("alice@example.com".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::DuplicateEmail { .. }));

        // Re-submitting the member's own email is not a collision
        let unchanged = update(
            &db,
            UpdateMember {
                id: bob.id,
                email: Some("bob@example.com".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(unchanged.email, "bob@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_member() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "owner", "Alice", "alice@example.com").await?;

        delete(&db, member.id).await?;
        assert!(get_by_id(&db, member.id).await?.is_none());

        // Second delete fails
        let result = delete(&db, member.id).await;
        assert!(matches!(result.unwrap_err(), Error::MemberNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_filters() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_member(&db, "owner", "Alice Nguyen", "alice@example.com").await?;
        let bob = create_test_member(&db, "owner", "Bob Tran", "bob@example.com").await?;
        update(
            &db,
            UpdateMember {
                id: bob.id,
                status: Some(STATUS_EXPIRED.to_string()),
                ..Default::default()
            },
        )
        .await?;
        // A member under another account must never appear
        create_test_member(&db, "other", "Carol", "carol@example.com").await?;

        let all = get_all(&db, "owner", &MemberFilters::default()).await?;
        assert_eq!(all.len(), 2);

        let expired = get_all(
            &db,
            "owner",
            &MemberFilters {
                status: Some(STATUS_EXPIRED.to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id, bob.id);

        // Substring search over name/email, case-insensitive
        let hits = get_all(
            &db,
            "owner",
            &MemberFilters {
                search: Some("alice".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].full_name, "Alice Nguyen");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_stats() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_member(&db, "owner", "Alice", "alice@example.com").await?;
        create_test_member(&db, "owner", "Bob", "bob@example.com").await?;
        let carol = create_test_member(&db, "owner", "Carol", "carol@example.com").await?;
        update(
            &db,
            UpdateMember {
                id: carol.id,
                status: Some(STATUS_CANCELLED.to_string()),
                ..Default::default()
            },
        )
        .await?;

        let stats = get_stats(&db, "owner").await?;
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.expired, 0);
        assert_eq!(stats.paused, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_credits_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = adjust_credits(&db, 999, 5).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::MemberNotFound { id: 999 }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_credits_relative_delta() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "owner", "Alice", "alice@example.com").await?;
        assert_eq!(member.credits, 10);

        let after_debit = adjust_credits(&db, member.id, -4).await?;
        assert_eq!(after_debit.credits, 6);

        let after_grant = adjust_credits(&db, member.id, 10).await?;
        assert_eq!(after_grant.credits, 16);

        Ok(())
    }
}
