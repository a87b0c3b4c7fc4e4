use std::collections::HashSet;

use anyhow::Context;
use bb8_postgres::tokio_postgres::Client;

use crate::PostgresDatabase;

#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub name: &'static str,
    pub up: &'static str,
    pub down: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct MigrationStatus {
    pub migration: Migration,
    pub applied: bool,
}

/// All migrations in the order they are applied. Generated by `build.rs`
/// from the files in `migrations/`.
pub const MIGRATIONS: &[Migration] = include!(env!("MIGRATIONS"));

impl PostgresDatabase {
    pub async fn list_migrations(&self) -> anyhow::Result<Vec<MigrationStatus>> {
        let conn = self.connection().await?;
        migration_status(&conn).await
    }

    /// Applies up to `cnt` pending migrations (all of them if `None`) and
    /// returns the names of the applied ones.
    pub async fn run_migrations(&self, cnt: Option<usize>) -> anyhow::Result<Vec<&'static str>> {
        let mut conn = self.connection().await?;
        let pending = migration_status(&conn)
            .await?
            .into_iter()
            .filter(|status| !status.applied)
            .map(|status| status.migration)
            .take(cnt.unwrap_or(usize::MAX));

        let mut applied = Vec::new();
        for migration in pending {
            let txn = conn
                .transaction()
                .await
                .context("Failed to begin transaction")?;
            txn.batch_execute(migration.up)
                .await
                .with_context(|| format!("Failed to run migration {}", migration.name))?;
            txn.execute(
                "insert into _migrations (name) values ($1)",
                &[&migration.name],
            )
            .await
            .with_context(|| format!("Failed to mark migration {} as applied", migration.name))?;
            txn.commit().await.context("Failed to commit transaction")?;
            applied.push(migration.name);
        }

        Ok(applied)
    }

    /// Reverts up to `cnt` applied migrations (all of them if `None`), newest
    /// first, and returns the names of the reverted ones.
    pub async fn revert_migrations(
        &self,
        cnt: Option<usize>,
    ) -> anyhow::Result<Vec<&'static str>> {
        let mut conn = self.connection().await?;
        let applied = migration_status(&conn)
            .await?
            .into_iter()
            .rev()
            .filter(|status| status.applied)
            .map(|status| status.migration)
            .take(cnt.unwrap_or(usize::MAX));

        let mut reverted = Vec::new();
        for migration in applied {
            let txn = conn
                .transaction()
                .await
                .context("Failed to begin transaction")?;
            txn.batch_execute(migration.down)
                .await
                .with_context(|| format!("Failed to revert migration {}", migration.name))?;
            txn.execute("delete from _migrations where name=$1", &[&migration.name])
                .await
                .with_context(|| {
                    format!("Failed to mark migration {} as reverted", migration.name)
                })?;
            txn.commit().await.context("Failed to commit transaction")?;
            reverted.push(migration.name);
        }

        Ok(reverted)
    }
}

async fn migration_status(conn: &Client) -> anyhow::Result<Vec<MigrationStatus>> {
    conn.batch_execute("create table if not exists _migrations (name text primary key);")
        .await
        .context("Failed to create migrations table")?;

    let applied = conn
        .query("select name from _migrations", &[])
        .await
        .context("Failed to list migrations")?
        .into_iter()
        .map(|row| row.get(0))
        .collect::<HashSet<String>>();

    Ok(MIGRATIONS
        .iter()
        .map(|&migration| MigrationStatus {
            migration,
            applied: applied.contains(migration.name),
        })
        .collect())
}
