//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.
//!
//! Member references on sessions and subscriptions are soft: no SQL foreign
//! keys are declared, deletes do not cascade, and orphaned `member_id` values
//! are tolerated (they render as "Unknown Member" at read time).

pub mod member;
pub mod organization;
pub mod session;
pub mod subscription;

// Re-export specific types to avoid conflicts
pub use member::{Column as MemberColumn, Entity as Member, Model as MemberModel};
pub use organization::{
    Column as OrganizationColumn, Entity as Organization, Model as OrganizationModel,
};
pub use session::{Column as SessionColumn, Entity as Session, Model as SessionModel};
pub use subscription::{
    Column as SubscriptionColumn, Entity as Subscription, Model as SubscriptionModel,
};
