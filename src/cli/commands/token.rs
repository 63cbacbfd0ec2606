use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::OutputFormat;
use crate::config;
use crate::database::PgLogStore;

pub async fn handle(username: &str, store: &PgLogStore, output_format: OutputFormat) -> anyhow::Result<()> {
    let user = store
        .find_user_by_username(username)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User '{}' not found", username))?;

    let token = generate_jwt(&Claims::new(user.id, &user.username))?;
    let expires_in_hours = config::config().security.jwt_expiry_hours;

    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "token": token,
                    "user": { "id": user.id, "username": user.username },
                    "expires_in_hours": expires_in_hours,
                }))?
            );
        }
        // Bare token so it can be captured with $(logbook token alice)
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
