// FICHIER : src-server/tools/jsonapi-cli/src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use jsonapi::utils::{init_logging, AppConfig};

#[derive(Parser, Debug)]
#[command(name = "jsonapi-cli", about = "CLI d'administration du serveur JSON", version)]
struct Cli {
    /// Dossier de données (surcharge JSONAPI_DATA_DIR et la configuration)
    #[arg(long, env = "JSONAPI_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Affiche les routes configurées et leurs fichiers
    Routes,
    /// Crée le dossier de données et les fichiers manquants ("[]")
    Init,
    /// Vérifie strictement chaque fichier de collection
    Check,
    /// Affiche tous les records d'une ressource : <route>
    List { route: String },
    /// Affiche un record : <route> <id>
    Get { route: String, id: String },
}

fn build_config(data_dir: Option<PathBuf>) -> Result<AppConfig> {
    let mut config = AppConfig::load()?;
    // La sortie standard porte le JSON affiché : seuls les avertissements sont journalisés
    if std::env::var_os("JSONAPI_LOG_LEVEL").is_none() {
        config.log_level = "warn".to_string();
    }
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = build_config(cli.data_dir)?;
    init_logging(&config);
    tracing::debug!(data_dir = ?config.data_dir, "Configuration chargée");

    match cli.command {
        Commands::Routes => commands::collections::routes(&config),
        Commands::Init => commands::collections::init(&config).await,
        Commands::Check => commands::collections::check(&config).await,
        Commands::List { route } => commands::collections::list(&config, &route).await,
        Commands::Get { route, id } => commands::collections::get(&config, &route, &id).await,
    }
}
