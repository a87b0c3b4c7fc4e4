use carbon_config::Config;
use carbon_di::Provide;
use carbon_email_contracts::EmailService;
use carbon_persistence_contracts::Database;
use tracing::{info, warn};

use crate::{
    database, email,
    environment::{
        types::{Email, RestServer},
        ConfigProvider, Provider,
    },
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to database");
    let database = database::connect(&config.database).await?;
    database.ping().await?;

    info!("Applying pending migrations");
    let applied = database.run_migrations(None).await?;
    for name in &applied {
        info!("Applied {name}");
    }
    if applied.is_empty() {
        info!("No migrations pending");
    }

    let email = connect_email(&config).await?;
    if config.contact.admin_email.is_none() {
        warn!("No admin email configured, contact notifications are disabled");
    }

    let config_provider = ConfigProvider::new(&config);
    let mut provider = Provider::new(config_provider, database, email);
    let server: RestServer = provider.provide();
    info!("Starting http server on {}", config.http.address);
    server.serve().await
}

/// Notifications are best-effort, so an unreachable smtp server only produces
/// a warning.
async fn connect_email(config: &Config) -> anyhow::Result<Option<Email>> {
    let Some(email_config) = &config.email else {
        warn!("No smtp server configured, contact notifications are disabled");
        return Ok(None);
    };

    info!("Connecting to smtp server");
    let email = email::connect(email_config)?;
    if let Err(err) = email.ping().await {
        warn!("Smtp server is not reachable: {err:#}");
    }

    Ok(Some(email))
}
