//! Session entity - A recorded usage event that consumes member credits.
//!
//! Sessions start out `"unverified"` and can be verified once; creating one
//! debits `credits_used` from the referenced member, deleting one refunds it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Session database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    /// Unique identifier for the session
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning business-owner account id
    pub user_id: String,
    /// Soft reference to the member this session was held for; may dangle
    /// after a member delete
    pub member_id: i64,
    /// When the session started
    pub start_time: DateTimeUtc,
    /// When the session ended, if recorded
    pub end_time: Option<DateTimeUtc>,
    /// Verification status: `"unverified"` or `"verified"`
    pub status: String,
    /// Credits debited from the member for this session (at least 1)
    pub credits_used: i64,
    /// Free-text notes
    pub notes: Option<String>,
    /// When the record was created
    pub created_at: DateTimeUtc,
    /// When the record was last modified
    pub updated_at: DateTimeUtc,
}

/// `member_id` is a soft reference, so no relations are declared.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
