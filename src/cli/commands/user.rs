use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_empty_collection, output_success};
use crate::cli::OutputFormat;
use crate::database::PgLogStore;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Register a new user")]
    Add {
        #[arg(help = "Username (must be unique)")]
        username: String,
    },

    #[command(about = "List registered users")]
    List,
}

pub async fn handle(cmd: UserCommands, store: &PgLogStore, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Add { username } => {
            let username = username.trim();
            if username.is_empty() {
                anyhow::bail!("Username cannot be empty");
            }

            let user = store.create_user(username).await?;
            output_success(
                &output_format,
                &format!("Created user '{}' ({})", user.username, user.id),
                Some(json!({ "user": user })),
            )
        }
        UserCommands::List => {
            let users = store.list_users().await?;
            if users.is_empty() {
                return output_empty_collection(&output_format, "users", "No users registered");
            }

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "users": users }))?);
                }
                OutputFormat::Text => {
                    for user in users {
                        println!("{}  {}  {}", user.id, user.username, user.created_at.format("%Y-%m-%d"));
                    }
                }
            }
            Ok(())
        }
    }
}
