// FICHIER : src-server/src/main.rs

use jsonapi::api;
use jsonapi::utils::{init_logging, AppConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = AppConfig::init() {
        eprintln!("❌ Erreur fatale de configuration : {}", e);
        std::process::exit(1);
    }
    let config = AppConfig::get();
    init_logging(config);

    if let Err(e) = api::serve(config).await {
        tracing::error!("❌ Arrêt du serveur : {}", e);
        std::process::exit(1);
    }
}
