//! Session business logic - usage events that consume member credits.
//!
//! Creating a session debits the member's balance by `credits_used`, deleting
//! one refunds it, and changing `credits_used` on an update applies the
//! difference. Each of these pairs the session write with the member-credit
//! adjustment inside one database transaction so the ledgers cannot drift
//! apart. Sessions start out `"unverified"`; [`verify`] is the one-way gate
//! to `"verified"`.

use crate::{
    entities::{Member, Session, member, session},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;

/// Session status: recorded but not yet verified by the owner
pub const STATUS_UNVERIFIED: &str = "unverified";
/// Session status: confirmed by the owner
pub const STATUS_VERIFIED: &str = "verified";

/// Display name used when a session's member reference no longer resolves
pub const UNKNOWN_MEMBER_NAME: &str = "Unknown Member";

/// Input for recording a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    /// The member this session was held for
    pub member_id: i64,
    /// When the session started
    pub start_time: DateTimeUtc,
    /// When the session ended, if known
    pub end_time: Option<DateTimeUtc>,
    /// Credits to debit; defaults to 1 when unset, must be at least 1
    pub credits_used: Option<i64>,
    /// Free-text notes
    pub notes: Option<String>,
}

/// Partial update for an existing session. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateSession {
    /// Id of the session to update
    pub id: i64,
    /// New start time
    pub start_time: Option<DateTimeUtc>,
    /// New end time
    pub end_time: Option<DateTimeUtc>,
    /// New status (`"unverified"` or `"verified"`)
    pub status: Option<String>,
    /// New credit usage; the member's balance absorbs the difference
    pub credits_used: Option<i64>,
    /// New notes
    pub notes: Option<String>,
}

/// Listing filters for [`get_all`]. All filters are optional and combined.
#[derive(Debug, Clone, Default)]
pub struct SessionFilters {
    /// Only sessions for this member
    pub member_id: Option<i64>,
    /// Only sessions with this status
    pub status: Option<String>,
    /// Only sessions starting at or after this time
    pub start_date: Option<DateTimeUtc>,
    /// Only sessions starting at or before this time
    pub end_date: Option<DateTimeUtc>,
}

/// A session joined at read time to its member's display fields.
///
/// The join is computed per query, never persisted; a dangling `member_id`
/// degrades to [`UNKNOWN_MEMBER_NAME`] and an empty email.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionWithMember {
    /// The session record
    pub session: session::Model,
    /// The member's current full name, or the unknown-member fallback
    pub member_name: String,
    /// The member's current email, or empty if the member is gone
    pub member_email: String,
}

/// Aggregate session counts for dashboard statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    /// Total sessions for the account
    pub total: usize,
    /// Sessions still `"unverified"`
    pub unverified: usize,
    /// Sessions already `"verified"`
    pub verified: usize,
    /// Sum of `credits_used` across all sessions
    pub total_credits_used: i64,
}

/// Records a new session and debits the member's credits in one transaction.
///
/// The referenced member must exist under `user_id` and hold at least
/// `credits_used` credits; otherwise the operation fails with
/// `MemberNotFound` or `InsufficientCredits` (the latter carrying the
/// member's current balance). The session is persisted as `"unverified"`.
pub async fn create(
    db: &DatabaseConnection,
    user_id: &str,
    input: CreateSession,
) -> Result<session::Model> {
    if let Some(credits) = input.credits_used
        && credits < 1
    {
        return Err(Error::Validation {
            message: format!("Session must use at least 1 credit (got {credits})"),
        });
    }

    let txn = db.begin().await?;

    let member = crate::core::member::get_by_id_for_user(&txn, input.member_id, user_id)
        .await?
        .ok_or(Error::MemberNotFound {
            id: input.member_id,
        })?;

    let credits_to_use = input.credits_used.unwrap_or(1);
    if member.credits < credits_to_use {
        return Err(Error::InsufficientCredits {
            available: member.credits,
            requested: credits_to_use,
        });
    }

    let now = chrono::Utc::now();
    let model = session::ActiveModel {
        user_id: Set(user_id.to_string()),
        member_id: Set(input.member_id),
        start_time: Set(input.start_time),
        end_time: Set(input.end_time),
        status: Set(STATUS_UNVERIFIED.to_string()),
        credits_used: Set(credits_to_use),
        notes: Set(input.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = model.insert(&txn).await?;

    crate::core::member::adjust_credits(&txn, input.member_id, -credits_to_use).await?;

    txn.commit().await?;

    Ok(result)
}

/// Retrieves all sessions for an account, newest start time first, enriched
/// with member display fields and filtered as requested.
pub async fn get_all(
    db: &DatabaseConnection,
    user_id: &str,
    filters: &SessionFilters,
) -> Result<Vec<SessionWithMember>> {
    let mut query = Session::find().filter(session::Column::UserId.eq(user_id));

    if let Some(member_id) = filters.member_id {
        query = query.filter(session::Column::MemberId.eq(member_id));
    }
    if let Some(status) = &filters.status {
        query = query.filter(session::Column::Status.eq(status.as_str()));
    }
    if let Some(start_date) = filters.start_date {
        query = query.filter(session::Column::StartTime.gte(start_date));
    }
    if let Some(end_date) = filters.end_date {
        query = query.filter(session::Column::StartTime.lte(end_date));
    }

    let sessions = query
        .order_by_desc(session::Column::StartTime)
        .all(db)
        .await?;

    let members: HashMap<i64, member::Model> = Member::find()
        .filter(member::Column::UserId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();

    Ok(sessions
        .into_iter()
        .map(|s| {
            let (member_name, member_email) = members.get(&s.member_id).map_or_else(
                || (UNKNOWN_MEMBER_NAME.to_string(), String::new()),
                |m| (m.full_name.clone(), m.email.clone()),
            );
            SessionWithMember {
                session: s,
                member_name,
                member_email,
            }
        })
        .collect())
}

/// Finds a session by id scoped to an owning account.
pub async fn get_by_id(
    db: &DatabaseConnection,
    id: i64,
    user_id: &str,
) -> Result<Option<session::Model>> {
    Session::find_by_id(id)
        .filter(session::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all sessions for a specific member of an account.
pub async fn get_by_member(
    db: &DatabaseConnection,
    member_id: i64,
    user_id: &str,
) -> Result<Vec<SessionWithMember>> {
    get_all(
        db,
        user_id,
        &SessionFilters {
            member_id: Some(member_id),
            ..Default::default()
        },
    )
    .await
}

/// Applies a partial update to a session.
///
/// When `credits_used` changes from `c` to `c'`, the member's balance absorbs
/// `-(c' - c)` in the same transaction: raising usage debits further,
/// lowering it refunds the difference. No balance floor is re-checked here
/// (only creation checks it), and a member that no longer exists is tolerated
/// with no adjustment.
pub async fn update(
    db: &DatabaseConnection,
    user_id: &str,
    input: UpdateSession,
) -> Result<session::Model> {
    if let Some(status) = &input.status
        && status != STATUS_UNVERIFIED
        && status != STATUS_VERIFIED
    {
        return Err(Error::Validation {
            message: format!("Unknown session status '{status}'"),
        });
    }

    let txn = db.begin().await?;

    let existing = Session::find_by_id(input.id)
        .filter(session::Column::UserId.eq(user_id))
        .one(&txn)
        .await?
        .ok_or(Error::SessionNotFound { id: input.id })?;

    if let Some(new_credits) = input.credits_used {
        let delta = new_credits - existing.credits_used;
        if delta != 0 {
            let member = Member::find_by_id(existing.member_id).one(&txn).await?;
            if member.is_some() {
                crate::core::member::adjust_credits(&txn, existing.member_id, -delta).await?;
            }
        }
    }

    let mut model: session::ActiveModel = existing.into();
    if let Some(start_time) = input.start_time {
        model.start_time = Set(start_time);
    }
    if let Some(end_time) = input.end_time {
        model.end_time = Set(Some(end_time));
    }
    if let Some(status) = input.status {
        model.status = Set(status);
    }
    if let Some(credits_used) = input.credits_used {
        model.credits_used = Set(credits_used);
    }
    if let Some(notes) = input.notes {
        model.notes = Set(Some(notes));
    }
    model.updated_at = Set(chrono::Utc::now());

    let result = model.update(&txn).await?;

    txn.commit().await?;

    Ok(result)
}

/// Marks a session as verified. Sugar for an [`update`] that only sets the
/// status; nothing in the crate transitions a session back.
pub async fn verify(db: &DatabaseConnection, id: i64, user_id: &str) -> Result<session::Model> {
    update(
        db,
        user_id,
        UpdateSession {
            id,
            status: Some(STATUS_VERIFIED.to_string()),
            ..Default::default()
        },
    )
    .await
}

/// Deletes a session and refunds its full `credits_used` to the member in one
/// transaction.
///
/// The refund uses the session's current `credits_used`, so a session updated
/// after creation refunds the latest value. A member that no longer exists is
/// tolerated (nothing to refund to). Deleting the same session twice fails
/// with `SessionNotFound` on the second attempt.
pub async fn delete(db: &DatabaseConnection, id: i64, user_id: &str) -> Result<()> {
    let txn = db.begin().await?;

    let existing = Session::find_by_id(id)
        .filter(session::Column::UserId.eq(user_id))
        .one(&txn)
        .await?
        .ok_or(Error::SessionNotFound { id })?;

    let member = Member::find_by_id(existing.member_id).one(&txn).await?;
    if member.is_some() {
        crate::core::member::adjust_credits(&txn, existing.member_id, existing.credits_used)
            .await?;
    }

    existing.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

/// Computes aggregate session counts for an account.
pub async fn get_stats(db: &DatabaseConnection, user_id: &str) -> Result<SessionStats> {
    let sessions = Session::find()
        .filter(session::Column::UserId.eq(user_id))
        .all(db)
        .await?;

    Ok(SessionStats {
        total: sessions.len(),
        unverified: sessions
            .iter()
            .filter(|s| s.status == STATUS_UNVERIFIED)
            .count(),
        verified: sessions
            .iter()
            .filter(|s| s.status == STATUS_VERIFIED)
            .count(),
        total_credits_used: sessions.iter().map(|s| s.credits_used).sum(),
    })
}
