//! Bootstrap binary: prepares the database and seeds the organization
//! directory from config.toml on first run.

use dotenvy::dotenv;
use leansubs::config;
use leansubs::core::organization;
use leansubs::errors::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Tracing first so everything below can log
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Non-fatal: env vars can be set externally
    dotenv().ok();

    let database_url = config::database::get_database_url();
    info!(%database_url, "Connecting to database");

    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!("Database schema ready");

    if organization::count(&db).await? == 0 {
        match config::organization::load_default_config() {
            Ok(seed) => {
                let org = organization::create(
                    &db,
                    organization::CreateOrganization {
                        name: seed.organization.name,
                        currency: seed.organization.currency,
                        session_default_length_minutes: seed
                            .organization
                            .session_default_length_minutes,
                    },
                )
                .await?;
                info!(id = org.id, name = %org.name, "Seeded organization from config.toml");
            }
            Err(e) => {
                warn!("No seed organization created: {e}");
            }
        }
    } else {
        info!("Organization directory already populated, skipping seed");
    }

    Ok(())
}
