//! Unified error types and result handling.
//!
//! Every ledger operation reports failure through [`Error`]; the variants map
//! one-to-one onto the business rules (not-found per record type, duplicate
//! email, insufficient credits, validation). Infrastructure failures are
//! wrapped transparently.

use thiserror::Error;

/// Unified error type for all ledger and infrastructure failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the configuration problem
        message: String,
    },

    /// Invalid input rejected before touching the database
    #[error("Validation error: {message}")]
    Validation {
        /// Which field or rule was violated
        message: String,
    },

    /// Member id absent or not owned by the calling account
    #[error("Member {id} not found")]
    MemberNotFound {
        /// The member id that failed to resolve
        id: i64,
    },

    /// Session id absent or not owned by the calling account
    #[error("Session {id} not found")]
    SessionNotFound {
        /// The session id that failed to resolve
        id: i64,
    },

    /// Subscription id absent or not owned by the calling organization.
    /// Ownership mismatch and absence are deliberately collapsed into one
    /// message so callers cannot probe other tenants' records.
    #[error("Subscription {id} not found or you do not have permission to delete it")]
    SubscriptionNotFound {
        /// The subscription id that failed to resolve
        id: i64,
    },

    /// Organization id absent
    #[error("Organization {id} not found")]
    OrganizationNotFound {
        /// The organization id that failed to resolve
        id: i64,
    },

    /// Another member under the same owning account already uses this email
    #[error("A member with email '{email}' already exists")]
    DuplicateEmail {
        /// The conflicting email address
        email: String,
    },

    /// Member balance cannot cover the requested session credits. The message
    /// carries the current balance so the caller can surface it inline.
    #[error(
        "Insufficient credits. Member has {available} credit(s) available, {requested} requested"
    )]
    InsufficientCredits {
        /// The member's current credit balance
        available: i64,
        /// Credits the rejected operation asked for
        requested: i64,
    },

    /// Database error from SeaORM
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
