// FICHIER : src-server/tools/jsonapi-cli/src/commands/collections.rs

use anyhow::{anyhow, bail, Context, Result};
use jsonapi::json_db::{self, collections::CollectionHandler};
use jsonapi::utils::{fs, AppConfig};

// --- HELPERS ---

fn handler_for(config: &AppConfig, route: &str) -> Result<CollectionHandler> {
    let (registry, handlers) = json_db::bootstrap(config)?;
    let route = route.trim_end_matches('/');
    handlers
        .into_iter()
        .find(|h| h.descriptor().route == route)
        .ok_or_else(|| {
            anyhow!(
                "Route inconnue : {} (disponibles : {})",
                route,
                registry.routes().join(", ")
            )
        })
}

// --- COMMANDES ---

pub fn routes(config: &AppConfig) -> Result<()> {
    let (registry, _) = json_db::bootstrap(config)?;
    for descriptor in registry.iter() {
        println!(
            "{:<24} {:<12} {}",
            descriptor.route,
            descriptor.label,
            descriptor.location.display()
        );
    }
    Ok(())
}

pub async fn init(config: &AppConfig) -> Result<()> {
    let (registry, _) = json_db::bootstrap(config)?;
    fs::ensure_dir(&config.data_dir).await?;

    for descriptor in registry.iter() {
        if fs::exists(&descriptor.location).await {
            println!("= {} (déjà présent)", descriptor.location.display());
            continue;
        }
        fs::write_atomic(&descriptor.location, b"[]")
            .await
            .with_context(|| format!("Création de {:?} impossible", descriptor.location))?;
        println!("+ {}", descriptor.location.display());
    }
    Ok(())
}

pub async fn check(config: &AppConfig) -> Result<()> {
    let (_, handlers) = json_db::bootstrap(config)?;
    let mut failures = 0;

    for handler in &handlers {
        let route = &handler.descriptor().route;
        match handler.inspect().await {
            Ok(collection) => println!("✅ {} : {} record(s)", route, collection.len()),
            Err(e) => {
                failures += 1;
                eprintln!("❌ {} : {}", route, e);
            }
        }
    }

    if failures > 0 {
        bail!("{} collection(s) corrompue(s)", failures);
    }
    Ok(())
}

pub async fn list(config: &AppConfig, route: &str) -> Result<()> {
    let handler = handler_for(config, route)?;
    let collection = handler.inspect().await?;
    println!("{}", serde_json::to_string_pretty(&collection)?);
    Ok(())
}

pub async fn get(config: &AppConfig, route: &str, id: &str) -> Result<()> {
    let handler = handler_for(config, route)?;
    let record = handler.get(id).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_init_creates_empty_collections() {
        let dir = tempdir().unwrap();
        let config = AppConfig::with_data_dir(dir.path().join("data"));

        init(&config).await.unwrap();
        for name in ["users", "posts", "comments", "products"] {
            let raw = std::fs::read_to_string(config.data_dir.join(format!("{name}.json"))).unwrap();
            assert_eq!(raw, "[]");
        }
        check(&config).await.unwrap();
    }

    #[tokio::test]
    async fn test_check_reports_corruption() {
        let dir = tempdir().unwrap();
        let config = AppConfig::with_data_dir(dir.path());
        std::fs::write(dir.path().join("posts.json"), "{oops").unwrap();

        assert!(check(&config).await.is_err());
        assert!(list(&config, "/api/posts").await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let dir = tempdir().unwrap();
        let config = AppConfig::with_data_dir(dir.path());

        let err = handler_for(&config, "/api/nothing").unwrap_err();
        assert!(err.to_string().contains("/api/users"));
        assert!(handler_for(&config, "/api/users/").is_ok());
    }
}
