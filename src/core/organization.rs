//! Organization directory - tenant records and display settings.
//!
//! External collaborator to the ledger core: the ledgers consume it read-only
//! for currency formatting and default session durations.

use crate::{
    entities::{Organization, organization},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Default currency code for new organizations
pub const DEFAULT_CURRENCY: &str = "VND";
/// Default session length in minutes for new organizations
pub const DEFAULT_SESSION_LENGTH_MINUTES: i32 = 60;

/// Currencies displayed without decimal places
const ZERO_DECIMAL_CURRENCIES: [&str; 3] = ["VND", "JPY", "KRW"];

/// Input for creating a new organization.
#[derive(Debug, Clone)]
pub struct CreateOrganization {
    /// Display name of the business
    pub name: String,
    /// ISO currency code; defaults to [`DEFAULT_CURRENCY`] when unset
    pub currency: Option<String>,
    /// Default session length in minutes; defaults to
    /// [`DEFAULT_SESSION_LENGTH_MINUTES`] when unset
    pub session_default_length_minutes: Option<i32>,
}

/// Partial settings update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateOrganizationSettings {
    /// New currency code
    pub currency: Option<String>,
    /// New default session length in minutes
    pub session_default_length_minutes: Option<i32>,
}

/// Creates a new organization with default settings where unspecified.
pub async fn create(
    db: &DatabaseConnection,
    input: CreateOrganization,
) -> Result<organization::Model> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Organization name cannot be empty".to_string(),
        });
    }

    let now = chrono::Utc::now();
    let model = organization::ActiveModel {
        name: Set(name),
        currency: Set(input
            .currency
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())),
        session_default_length_minutes: Set(input
            .session_default_length_minutes
            .unwrap_or(DEFAULT_SESSION_LENGTH_MINUTES)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Finds an organization by its unique id.
pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<organization::Model>> {
    Organization::find_by_id(id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Counts all organizations; used by the bootstrap to decide whether seeding
/// is needed.
pub async fn count(db: &DatabaseConnection) -> Result<u64> {
    Organization::find().count(db).await.map_err(Into::into)
}

/// Renames an organization. Fails with `OrganizationNotFound` if absent.
pub async fn update(
    db: &DatabaseConnection,
    id: i64,
    name: String,
) -> Result<organization::Model> {
    let existing = Organization::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::OrganizationNotFound { id })?;

    let mut model: organization::ActiveModel = existing.into();
    model.name = Set(name);
    model.updated_at = Set(chrono::Utc::now());

    let result = model.update(db).await?;
    Ok(result)
}

/// Applies a partial settings update. Fails with `OrganizationNotFound` if
/// absent.
pub async fn update_settings(
    db: &DatabaseConnection,
    id: i64,
    input: UpdateOrganizationSettings,
) -> Result<organization::Model> {
    let existing = Organization::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::OrganizationNotFound { id })?;

    let mut model: organization::ActiveModel = existing.into();
    if let Some(currency) = input.currency {
        model.currency = Set(currency);
    }
    if let Some(minutes) = input.session_default_length_minutes {
        model.session_default_length_minutes = Set(minutes);
    }
    model.updated_at = Set(chrono::Utc::now());

    let result = model.update(db).await?;
    Ok(result)
}

/// Formats a payment amount for display in the organization's currency.
///
/// Zero-decimal currencies (VND, JPY, KRW) render without a fractional part;
/// everything else gets two decimal places.
#[must_use]
pub fn format_amount(amount: f64, currency: &str) -> String {
    if ZERO_DECIMAL_CURRENCIES.contains(&currency) {
        format!("{amount:.0} {currency}")
    } else {
        format!("{amount:.2} {currency}")
    }
}
