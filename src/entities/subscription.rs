//! Subscription entity - A recorded payment that grants member credits.
//!
//! The member's name is denormalized at creation time and never refreshed;
//! deleting a subscription removes the payment record but does not reverse
//! the credit grant.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Subscription database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    /// Unique identifier for the subscription
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning organization id
    pub organization_id: i64,
    /// Soft reference to the member who paid; may dangle after a member delete
    pub member_id: i64,
    /// Snapshot of the member's name when the payment was recorded
    pub member_name: String,
    /// Payment amount in the organization's currency
    pub amount: f64,
    /// Credits granted to the member by this payment
    pub credits: i64,
    /// Free-text notes
    pub notes: Option<String>,
    /// When the payment was recorded
    pub created_at: DateTimeUtc,
}

/// `member_id` is a soft reference, so no relations are declared.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
