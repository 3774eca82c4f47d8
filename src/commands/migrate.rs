//! Migrate command - schema management outside the server lifecycle.

use sea_orm::DbErr;

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(failed("connect to database"))?;

    tracing::info!(action = ?args.action, "Migration command started");

    match args.action {
        MigrateAction::Up => {
            db.run_migrations()
                .await
                .map_err(failed("apply pending migrations"))?;
            seed_roles(&db).await?;
        }
        MigrateAction::Down => {
            db.rollback_migration()
                .await
                .map_err(failed("roll back migration"))?;
            tracing::info!("Rolled back the most recent migration");
        }
        MigrateAction::Status => {
            let status = db
                .migration_status()
                .await
                .map_err(failed("read migration status"))?;
            for line in status_report(&status) {
                println!("{}", line);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping every table before reapplying migrations");
            db.fresh_migrations()
                .await
                .map_err(failed("rebuild schema"))?;
            seed_roles(&db).await?;
        }
    }

    Ok(())
}

/// Populate lookup tables after a schema change.
async fn seed_roles(db: &Database) -> AppResult<()> {
    let inserted = db.seed().await?;
    tracing::info!(roles_inserted = inserted, "Schema is up to date");
    Ok(())
}

fn failed(step: &'static str) -> impl Fn(DbErr) -> AppError {
    move |e| AppError::internal(format!("Failed to {}: {}", step, e))
}

/// One aligned line per migration, followed by a pending count.
fn status_report(status: &[(String, bool)]) -> Vec<String> {
    let width = status.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let pending = status.iter().filter(|(_, applied)| !applied).count();

    status
        .iter()
        .map(|(name, applied)| {
            let state = if *applied { "applied" } else { "pending" };
            format!("{:<width$}  {}", name, state, width = width)
        })
        .chain(std::iter::once(format!(
            "{} of {} migrations pending",
            pending,
            status.len()
        )))
        .collect()
}
