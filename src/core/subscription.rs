//! Subscription business logic - payment events that grant member credits.
//!
//! Creating a subscription records the payment with a snapshot of the
//! member's name and credits the member's balance in one transaction.
//! Deleting one removes the payment record only: once granted, credits stay
//! with the member. Callers that want a confirmation step (the surrounding
//! application re-authenticates before deleting) enforce it themselves; it is
//! not a ledger-level rule.

use crate::{
    entities::{Subscription, subscription},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Input for recording a new subscription payment.
#[derive(Debug, Clone)]
pub struct CreateSubscription {
    /// The member who paid
    pub member_id: i64,
    /// Payment amount in the organization's currency (must be positive)
    pub amount: f64,
    /// Credits granted by this payment (must be positive)
    pub credits: i64,
    /// Free-text notes
    pub notes: Option<String>,
}

/// Aggregate subscription totals for dashboard statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionStats {
    /// Number of subscriptions for the organization
    pub total: usize,
    /// Sum of payment amounts
    pub total_amount: f64,
    /// Sum of credits granted
    pub total_credits: i64,
}

/// Records a payment and grants its credits to the member in one transaction.
///
/// The member must exist (`MemberNotFound` otherwise); amount and credits
/// must both be positive. The member's name is denormalized onto the record
/// at this moment and never refreshed, so a later rename does not rewrite
/// payment history. There is no upper bound on the resulting balance.
pub async fn create(
    db: &DatabaseConnection,
    organization_id: i64,
    input: CreateSubscription,
) -> Result<subscription::Model> {
    if input.amount <= 0.0 || !input.amount.is_finite() {
        return Err(Error::Validation {
            message: format!("Subscription amount must be positive (got {})", input.amount),
        });
    }
    if input.credits < 1 {
        return Err(Error::Validation {
            message: format!("Subscription credits must be positive (got {})", input.credits),
        });
    }

    let txn = db.begin().await?;

    let member = crate::core::member::get_by_id(&txn, input.member_id)
        .await?
        .ok_or(Error::MemberNotFound {
            id: input.member_id,
        })?;

    let model = subscription::ActiveModel {
        organization_id: Set(organization_id),
        member_id: Set(input.member_id),
        member_name: Set(member.full_name.clone()),
        amount: Set(input.amount),
        credits: Set(input.credits),
        notes: Set(input.notes),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = model.insert(&txn).await?;

    crate::core::member::adjust_credits(&txn, input.member_id, input.credits).await?;

    txn.commit().await?;

    Ok(result)
}

/// Retrieves all subscriptions for an organization, newest first.
pub async fn get_all(
    db: &DatabaseConnection,
    organization_id: i64,
) -> Result<Vec<subscription::Model>> {
    Subscription::find()
        .filter(subscription::Column::OrganizationId.eq(organization_id))
        .order_by_desc(subscription::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all subscriptions for a specific member, newest first.
pub async fn get_by_member(
    db: &DatabaseConnection,
    member_id: i64,
) -> Result<Vec<subscription::Model>> {
    Subscription::find()
        .filter(subscription::Column::MemberId.eq(member_id))
        .order_by_desc(subscription::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a subscription by its unique id.
pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<subscription::Model>> {
    Subscription::find_by_id(id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Deletes a subscription record without reversing its credit grant.
///
/// Fails with `SubscriptionNotFound` when the id does not exist or belongs to
/// a different organization; the two cases are indistinguishable to the
/// caller. The member's balance is intentionally left untouched: the payment
/// record and the credit grant are decoupled once granted.
pub async fn delete(db: &DatabaseConnection, id: i64, organization_id: i64) -> Result<()> {
    let existing = Subscription::find_by_id(id)
        .filter(subscription::Column::OrganizationId.eq(organization_id))
        .one(db)
        .await?
        .ok_or(Error::SubscriptionNotFound { id })?;

    existing.delete(db).await?;
    Ok(())
}

/// Computes aggregate payment totals for an organization.
pub async fn get_stats(
    db: &DatabaseConnection,
    organization_id: i64,
) -> Result<SubscriptionStats> {
    let subscriptions = get_all(db, organization_id).await?;

    Ok(SubscriptionStats {
        total: subscriptions.len(),
        total_amount: subscriptions.iter().map(|s| s.amount).sum(),
        total_credits: subscriptions.iter().map(|s| s.credits).sum(),
    })
}
