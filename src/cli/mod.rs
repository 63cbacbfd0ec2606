pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::database::{DatabaseManager, PgLogStore};

#[derive(Parser)]
#[command(name = "logbook")]
#[command(about = "Logbook CLI - database and credential management for the Logbook API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply database migrations")]
    Migrate,

    #[command(about = "User management")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Issue a bearer token for an existing user")]
    Token {
        #[arg(help = "Username")]
        username: String,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let pool = DatabaseManager::connect().await?;
    let store = PgLogStore::new(pool.clone());

    let result = match cli.command {
        Commands::Migrate => commands::migrate::handle(&store, output_format).await,
        Commands::User { cmd } => commands::user::handle(cmd, &store, output_format).await,
        Commands::Token { username } => commands::token::handle(&username, &store, output_format).await,
    };

    DatabaseManager::close(pool).await;
    result
}
