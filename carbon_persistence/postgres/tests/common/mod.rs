use carbon_config::{DEFAULT_CONFIG_PATH, DEV_CONFIG_PATH};
use carbon_persistence_contracts::{Database, Transaction};
use carbon_persistence_postgres::{
    contact::PostgresContactSubmissionRepository, PostgresDatabase, PostgresDatabaseConfig,
};

pub type Db = PostgresDatabase;

/// Returns a freshly migrated database containing the demo records.
pub async fn setup() -> Db {
    let db = setup_clean().await;

    db.run_migrations(None).await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    carbon_demo::create(&mut txn, PostgresContactSubmissionRepository)
        .await
        .unwrap();
    txn.commit().await.unwrap();

    db
}

/// Returns an empty database without any tables.
pub async fn setup_clean() -> Db {
    let config = carbon_config::load(&[DEFAULT_CONFIG_PATH, DEV_CONFIG_PATH]).unwrap();

    let db = Db::connect(&PostgresDatabaseConfig {
        url: config.database.url,
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        acquire_timeout: config.database.acquire_timeout.into(),
        idle_timeout: config.database.idle_timeout.map(Into::into),
        max_lifetime: config.database.max_lifetime.map(Into::into),
    })
    .await
    .unwrap();

    db.reset().await.unwrap();
    db
}
