use std::time::Duration;

use anyhow::{anyhow, Context};
use bb8::Pool;
use bb8_postgres::{
    tokio_postgres::{self, NoTls},
    PostgresConnectionManager,
};
use carbon_persistence_contracts::{Database, Transaction};
use carbon_utils::trace_instrument;
use ouroboros::self_referencing;
use tracing::trace;

pub use migrations::{Migration, MigrationStatus, MIGRATIONS};

pub mod contact;
mod migrations;

type PgManager = PostgresConnectionManager<NoTls>;
type PgPooledConnection = bb8::PooledConnection<'static, PgManager>;
type PgTransaction<'a> = tokio_postgres::Transaction<'a>;

#[derive(Debug, Clone)]
pub struct PostgresDatabase {
    pool: Pool<PgManager>,
}

#[derive(Debug)]
pub struct PostgresDatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl PostgresDatabase {
    /// Creates the connection pool and opens `min_connections` connections.
    pub async fn connect(config: &PostgresDatabaseConfig) -> anyhow::Result<Self> {
        let manager = PgManager::new(
            config.url.parse().context("Failed to parse database url")?,
            NoTls,
        );

        let pool = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(config.min_connections)
            .connection_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .build(manager)
            .await
            .context("Failed to create database connection pool")?;

        Ok(Self { pool })
    }

    /// A pool that never connects, for wiring tests.
    #[cfg(feature = "dummy")]
    pub fn dummy() -> Self {
        let manager = PgManager::new(tokio_postgres::Config::new(), NoTls);
        Self {
            pool: Pool::builder().build_unchecked(manager),
        }
    }

    /// Drops every table, including the migration bookkeeping.
    pub async fn reset(&self) -> anyhow::Result<()> {
        self.execute("drop schema public cascade; create schema public;")
            .await
            .context("Failed to drop and recreate schema public")
    }

    /// Executes one or more statements outside of a transaction.
    pub async fn execute(&self, query: &str) -> anyhow::Result<()> {
        self.pool
            .get()
            .await
            .context("Failed to acquire database connection")?
            .batch_execute(query)
            .await
            .context("Failed to execute query")
    }

    async fn connection(&self) -> anyhow::Result<bb8::PooledConnection<'_, PgManager>> {
        self.pool
            .get()
            .await
            .context("Failed to acquire database connection")
    }
}

impl Database for PostgresDatabase {
    type Transaction = PostgresTransaction;

    async fn begin_transaction(&self) -> anyhow::Result<Self::Transaction> {
        trace!("begin transaction");

        let conn = self
            .pool
            .get_owned()
            .await
            .context("Failed to acquire database connection")?;

        PostgresTransactionAsyncSendTryBuilder {
            conn,
            txn_builder: |conn| Box::pin(async move { conn.transaction().await.map(Some) }),
        }
        .try_build()
        .await
        .context("Failed to begin transaction")
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        let row = self
            .connection()
            .await?
            .query_one("select 1", &[])
            .await
            .context("Failed to ping database")?;

        match row.get::<_, i32>(0) {
            1 => Ok(()),
            res => Err(anyhow!("Expected a result of 1, got {res} instead")),
        }
    }
}

/// A pooled connection together with the transaction running on it.
///
/// The transaction is `None` only after it has been consumed by
/// [`Transaction::commit`] or [`Transaction::rollback`].
#[self_referencing]
pub struct PostgresTransaction {
    conn: PgPooledConnection,
    #[borrows(mut conn)]
    #[covariant]
    txn: Option<PgTransaction<'this>>,
}

impl PostgresTransaction {
    fn txn(&self) -> &PgTransaction<'_> {
        self.borrow_txn()
            .as_ref()
            .expect("transaction is only taken when it is consumed")
    }
}

impl Transaction for PostgresTransaction {
    async fn commit(mut self) -> anyhow::Result<()> {
        trace!("commit transaction");

        self.with_txn_mut(|txn| txn.take())
            .ok_or_else(|| anyhow!("Transaction has already been finished"))?
            .commit()
            .await
            .context("Failed to commit transaction")
    }

    async fn rollback(mut self) -> anyhow::Result<()> {
        trace!("rollback transaction");

        self.with_txn_mut(|txn| txn.take())
            .ok_or_else(|| anyhow!("Transaction has already been finished"))?
            .rollback()
            .await
            .context("Failed to rollback transaction")
    }
}

/// Declares the column list constants of a table: `<NAME>_CNT`, `<NAME>_COLS`
/// (qualified with the alias, for selects) and `<NAME>_COL_NAMES` (for
/// inserts).
macro_rules! columns {
    ($vis:vis $ident:ident as $alias:literal: $fst:literal $(, $col:literal)* $(,)?) => {
        ::paste::paste! {
            $vis const [< $ident:snake:upper _CNT >]: usize = [ $fst $(, $col)* ].len();
            $vis const [< $ident:snake:upper _COLS >]: &str = ::core::concat!( '"', $alias, "\".\"", $fst, '"' $(, ", \"" , $alias, "\".\"", $col, '"' )* );
            $vis const [< $ident:snake:upper _COL_NAMES >]: &str = ::core::concat!( '"', $fst, '"' $(, ", \"", $col, '"' )* );
        }
    };
}
use columns;

/// Returns `$a, $b, ...` for the given parameter indices.
fn arg_indices(indices: impl IntoIterator<Item = usize>) -> String {
    indices
        .into_iter()
        .map(|idx| format!("${idx}"))
        .collect::<Vec<_>>()
        .join(", ")
}
