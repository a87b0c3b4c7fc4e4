use carbon_config::Config;
use carbon_persistence_contracts::{Database, Transaction};
use carbon_persistence_postgres::{
    contact::PostgresContactSubmissionRepository, MigrationStatus, PostgresDatabase,
};
use clap::Subcommand;

use crate::database;

#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// List all pending and applied migrations
    #[command(aliases(["status", "s", "l"]))]
    List,
    /// Apply pending migrations
    #[command(aliases(["u"]))]
    Up {
        /// Only apply the next `n` migrations
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Revert applied migrations
    #[command(aliases(["d"]))]
    Down {
        /// Number of migrations to revert
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
        #[arg(long, required = true)]
        force: bool,
    },
    /// Drop all tables and data
    Reset {
        #[arg(long, required = true)]
        force: bool,
    },
    /// Reset the database and insert the demo submissions
    Demo {
        #[arg(long, required = true)]
        force: bool,
    },
}

impl MigrateCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let db = database::connect(&config.database).await?;
        match self {
            Self::List => list(db).await,
            Self::Up { count } => up(db, count).await,
            Self::Down { count, force: _ } => down(db, count).await,
            Self::Reset { force: _ } => reset(db).await,
            Self::Demo { force: _ } => demo(db).await,
        }
    }
}

async fn list(db: PostgresDatabase) -> anyhow::Result<()> {
    for MigrationStatus { migration, applied } in db.list_migrations().await? {
        let status = if applied { "applied" } else { "pending" };
        println!("[{status}] {}", migration.name);
    }

    Ok(())
}

async fn up(db: PostgresDatabase, count: Option<usize>) -> anyhow::Result<()> {
    print_migrations(&db.run_migrations(count).await?, "applied");
    Ok(())
}

async fn down(db: PostgresDatabase, count: usize) -> anyhow::Result<()> {
    print_migrations(&db.revert_migrations(Some(count)).await?, "reverted");
    Ok(())
}

async fn reset(db: PostgresDatabase) -> anyhow::Result<()> {
    db.reset().await?;
    println!("Database has been reset");
    Ok(())
}

async fn demo(db: PostgresDatabase) -> anyhow::Result<()> {
    reset(db.clone()).await?;
    up(db.clone(), None).await?;

    let mut txn = db.begin_transaction().await?;
    carbon_demo::create(&mut txn, PostgresContactSubmissionRepository).await?;
    txn.commit().await?;
    println!("Demo dataset has been created");

    Ok(())
}

fn print_migrations(names: &[&str], action: &str) {
    if names.is_empty() {
        println!("No migrations have been {action}.");
    }
    for name in names {
        println!("[{action}] {name}");
    }
}
