// FICHIER : src-server/src/json_db/registry.rs

//! Table statique route -> fichier de collection, construite une fois au démarrage.

use crate::utils::config::{AppConfig, ResourceConfig};
use crate::utils::error::{AppError, Result};
use std::collections::HashSet;
use std::path::PathBuf;

/// Description immuable d'une ressource servie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub route: String,
    pub location: PathBuf,
    /// Libellé singulier, utilisé seulement dans les messages "not found"
    pub label: String,
}

impl ResourceDescriptor {
    /// Route d'un record : `/api/users/{id}`.
    pub fn item_route(&self) -> String {
        format!("{}/{{id}}", self.route)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    entries: Vec<ResourceDescriptor>,
}

impl ResourceRegistry {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(config.resources.len());

        for resource in &config.resources {
            validate(resource)?;
            if !seen.insert(resource.route.as_str()) {
                return Err(AppError::Config(format!(
                    "Route déclarée deux fois : {}",
                    resource.route
                )));
            }
            let label = resource
                .label
                .clone()
                .unwrap_or_else(|| singular_label(&resource.route));
            entries.push(ResourceDescriptor {
                route: resource.route.clone(),
                location: config.resolve_file(&resource.file),
                label,
            });
        }

        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.entries.iter()
    }

    pub fn routes(&self) -> Vec<&str> {
        self.entries.iter().map(|d| d.route.as_str()).collect()
    }

    pub fn get(&self, route: &str) -> Option<&ResourceDescriptor> {
        let route = route.trim_end_matches('/');
        self.entries.iter().find(|d| d.route == route)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Dernier segment de la route privé d'un `s` final ("users" -> "user").
/// Heuristique naïve : purement cosmétique.
pub fn singular_label(route: &str) -> String {
    let segment = route.rsplit('/').next().unwrap_or(route);
    segment
        .strip_suffix('s')
        .filter(|s| !s.is_empty())
        .unwrap_or(segment)
        .to_string()
}

fn validate(resource: &ResourceConfig) -> Result<()> {
    let route = resource.route.as_str();
    let invalid = |reason: &str| {
        Err(AppError::Config(format!(
            "Route invalide {:?} : {}",
            route, reason
        )))
    };

    if !route.starts_with('/') {
        return invalid("doit commencer par '/'");
    }
    if route == "/" {
        return invalid("la racine est réservée au document de découverte");
    }
    if route.ends_with('/') {
        return invalid("ne doit pas finir par '/'");
    }
    if route.contains(['{', '}', '*', ':']) {
        return invalid("caractères de motif interdits");
    }
    if resource.file.as_os_str().is_empty() {
        return invalid("fichier de collection manquant");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_singular_label_heuristic() {
        assert_eq!(singular_label("/api/users"), "user");
        assert_eq!(singular_label("/api/products"), "product");
        assert_eq!(singular_label("/api/data"), "data");
        assert_eq!(singular_label("/api/s"), "s");
    }

    #[test]
    fn test_default_registry() {
        let config = AppConfig::with_data_dir("/srv/data");
        let registry = ResourceRegistry::from_config(&config).unwrap();

        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.routes(),
            vec!["/api/users", "/api/posts", "/api/comments", "/api/products"]
        );

        let comments = registry.get("/api/comments/").unwrap();
        assert_eq!(comments.label, "comment");
        assert_eq!(comments.location, Path::new("/srv/data/comments.json"));
        assert_eq!(comments.item_route(), "/api/comments/{id}");
    }

    #[test]
    fn test_label_override_and_absolute_file() {
        let mut config = AppConfig::with_data_dir("/srv/data");
        config.resources = vec![ResourceConfig {
            route: "/api/people".to_string(),
            file: PathBuf::from("/var/lib/people.json"),
            label: Some("person".to_string()),
        }];

        let registry = ResourceRegistry::from_config(&config).unwrap();
        let people = registry.get("/api/people").unwrap();
        assert_eq!(people.label, "person");
        assert_eq!(people.location, Path::new("/var/lib/people.json"));
    }

    #[test]
    fn test_invalid_routes_rejected() {
        for route in ["api/users", "/", "/api/users/", "/api/{id}", "/api/:id"] {
            let mut config = AppConfig::default();
            config.resources = vec![ResourceConfig::new(route, "x.json")];
            assert!(
                matches!(
                    ResourceRegistry::from_config(&config),
                    Err(AppError::Config(_))
                ),
                "{} devrait être rejetée",
                route
            );
        }
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let mut config = AppConfig::default();
        config
            .resources
            .push(ResourceConfig::new("/api/users", "users2.json"));
        assert!(matches!(
            ResourceRegistry::from_config(&config),
            Err(AppError::Config(_))
        ));
    }
}
