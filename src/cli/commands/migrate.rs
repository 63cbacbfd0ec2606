use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::{DatabaseManager, PgLogStore};

pub async fn handle(store: &PgLogStore, output_format: OutputFormat) -> anyhow::Result<()> {
    DatabaseManager::migrate(store.pool()).await?;
    output_success(&output_format, "Migrations applied", None)
}
