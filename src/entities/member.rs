//! Member entity - A person with a membership and a prepaid credit balance.
//!
//! Each member belongs to one business-owner account (`user_id`), carries
//! membership details, and holds the `credits` balance that sessions debit
//! and subscriptions credit.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Member database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    /// Unique identifier for the member
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning business-owner account id (external identity collaborator)
    pub user_id: String,
    /// Member's full display name
    pub full_name: String,
    /// Contact email, unique per owning account
    pub email: String,
    /// Optional contact phone number
    pub phone: Option<String>,
    /// Membership plan: `"basic"`, `"standard"`, `"premium"` or their
    /// `"-annual"` variants
    pub membership_type: String,
    /// Membership status: `"active"`, `"expired"`, `"cancelled"`, `"paused"`
    pub status: String,
    /// When the membership starts
    pub start_date: DateTimeUtc,
    /// When the membership ends
    pub end_date: DateTimeUtc,
    /// Prepaid credit balance, debited by sessions and granted by
    /// subscriptions. Intended to stay non-negative; checked at session
    /// creation only.
    pub credits: i64,
    /// Free-text notes
    pub notes: Option<String>,
    /// When the record was created
    pub created_at: DateTimeUtc,
    /// When the record was last modified
    pub updated_at: DateTimeUtc,
}

/// Members are referenced by sessions and subscriptions through soft
/// `member_id` columns only, so no relations are declared.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
