//! Organization entity - The tenant owning subscriptions and their settings.
//!
//! Consumed read-only by the ledgers for currency formatting and default
//! session durations.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Organization database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    /// Unique identifier for the organization
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the business
    pub name: String,
    /// ISO currency code used for payment amounts (e.g. `"VND"`, `"USD"`)
    pub currency: String,
    /// Default length of a session in minutes
    pub session_default_length_minutes: i32,
    /// When the record was created
    pub created_at: DateTimeUtc,
    /// When the record was last modified
    pub updated_at: DateTimeUtc,
}

/// Organizations own subscriptions through a plain `organization_id` column
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
