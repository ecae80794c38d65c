//! Core business logic - framework-agnostic ledger operations.
//!
//! Each submodule owns one record type and the balance-affecting side effects
//! of its lifecycle: sessions debit member credits, subscriptions grant them,
//! and the member ledger holds the balance itself. Operations that touch both
//! a ledger record and a member balance run inside one database transaction.

/// Member ledger - member records and their credit balance
pub mod member;
/// Organization directory - tenant records and display settings
pub mod organization;
/// Session ledger - usage events that consume credits
pub mod session;
/// Subscription ledger - payment events that grant credits
pub mod subscription;
