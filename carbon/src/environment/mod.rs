use std::sync::Arc;

use carbon_api_rest::{RealIpConfig, RestServerConfig};
use carbon_config::Config;
use carbon_core_contact_impl::notification::ContactNotificationConfig;
use carbon_di::provider;
use types::{Database, Email};

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        database: Database,
        email: Option<Email>,
        ..config: ConfigProvider {
            RestServerConfig,
            ContactNotificationConfig,
        }
    }
}

impl Provider {
    /// `email` is `None` if no smtp server is configured.
    pub fn new(config: ConfigProvider, database: Database, email: Option<Email>) -> Self {
        Self {
            _cache: Default::default(),
            database,
            email,
            config,
        }
    }
}

provider! {
    /// Services that only depend on the configuration
    pub ConfigProvider {
        rest_server_config: RestServerConfig,
        contact_notification_config: ContactNotificationConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        let rest_server_config = RestServerConfig {
            addr: config.http.address,
            real_ip_config: config.http.real_ip.as_ref().map(|real_ip| {
                Arc::new(RealIpConfig {
                    header: real_ip.header.clone(),
                    set_from: real_ip.set_from,
                })
            }),
        };

        let contact_notification_config = ContactNotificationConfig {
            recipient: config.contact.admin_email.clone().map(Arc::new),
        };

        Self {
            _cache: Default::default(),
            rest_server_config,
            contact_notification_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use carbon_config::{DEFAULT_CONFIG_PATH, DEV_CONFIG_PATH};
    use carbon_di::Provide;
    use carbon_persistence_postgres::PostgresDatabase;
    use types::RestServer;

    use super::*;

    fn dev_config() -> Config {
        carbon_config::load(&[DEFAULT_CONFIG_PATH, DEV_CONFIG_PATH]).unwrap()
    }

    #[tokio::test]
    async fn provide_rest_server() {
        let config = dev_config();
        let email_config = config.email.as_ref().unwrap();
        let email = crate::email::connect(email_config).unwrap();

        let mut provider = Provider::new(
            ConfigProvider::new(&config),
            PostgresDatabase::dummy(),
            Some(email),
        );
        let _: RestServer = provider.provide();
    }

    #[tokio::test]
    async fn provide_rest_server_without_email() {
        let config = dev_config();

        let mut provider =
            Provider::new(ConfigProvider::new(&config), PostgresDatabase::dummy(), None);
        let _: RestServer = provider.provide();
    }

    #[test]
    fn notification_recipient_from_config() {
        let config = dev_config();

        let mut provider = ConfigProvider::new(&config);
        let notification_config: ContactNotificationConfig = provider.provide();

        assert_eq!(
            notification_config.recipient.as_deref(),
            config.contact.admin_email.as_ref()
        );
    }
}
