// FICHIER : src-server/src/utils/config.rs

use crate::utils::env;
use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Singleton global pour la configuration (binaires uniquement)
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Variables d'environnement reconnues
pub const ENV_CONFIG_FILE: &str = "JSONAPI_CONFIG";
pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "HOST";
pub const ENV_DATA_DIR: &str = "JSONAPI_DATA_DIR";
pub const ENV_LOG_DIR: &str = "JSONAPI_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "JSONAPI_LOG_LEVEL";

/// Collections servies par défaut : (route, fichier)
const DEFAULT_RESOURCES: &[(&str, &str)] = &[
    ("/api/users", "users.json"),
    ("/api/posts", "posts.json"),
    ("/api/comments", "comments.json"),
    ("/api/products", "products.json"),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub resources: Vec<ResourceConfig>,
}

/// Une entrée de la table route -> fichier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceConfig {
    pub route: String,
    pub file: PathBuf,
    /// Surcharge du libellé singulier dérivé de la route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ResourceConfig {
    pub fn new(route: &str, file: impl Into<PathBuf>) -> Self {
        Self {
            route: route.to_string(),
            file: file.into(),
            label: None,
        }
    }
}

/// Forme du fichier de configuration : tous les champs sont optionnels.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    host: Option<String>,
    port: Option<u16>,
    data_dir: Option<PathBuf>,
    log_level: Option<String>,
    log_dir: Option<PathBuf>,
    resources: Option<Vec<ResourceConfig>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
            resources: DEFAULT_RESOURCES
                .iter()
                .map(|(route, file)| ResourceConfig::new(route, *file))
                .collect(),
        }
    }
}

impl AppConfig {
    /// Initialise le singleton (défauts -> fichier -> environnement).
    pub fn init() -> Result<()> {
        if CONFIG.get().is_some() {
            return Ok(());
        }
        let config = Self::load()?;
        if CONFIG.set(config).is_err() {
            return Err(AppError::Config(
                "La configuration est déjà initialisée".to_string(),
            ));
        }
        Ok(())
    }

    pub fn get() -> &'static AppConfig {
        CONFIG
            .get()
            .expect("❌ AppConfig non initialisé ! Appelez AppConfig::init() au démarrage.")
    }

    /// Construit la configuration sans toucher au singleton.
    pub fn load() -> Result<Self> {
        let mut config = match env::get_optional(ENV_CONFIG_FILE) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Défauts surchargés par un fichier JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "Lecture impossible du fichier de configuration {:?} : {}",
                path, e
            ))
        })?;
        let file: ConfigFile = serde_json::from_str(&content).map_err(|e| {
            AppError::Config(format!(
                "Fichier de configuration {:?} invalide : {}",
                path, e
            ))
        })?;

        let mut config = Self::default();
        if let Some(host) = file.host {
            config.host = host;
        }
        if let Some(port) = file.port {
            config.port = port;
        }
        if let Some(data_dir) = file.data_dir {
            config.data_dir = data_dir;
        }
        if let Some(level) = file.log_level {
            config.log_level = level;
        }
        if file.log_dir.is_some() {
            config.log_dir = file.log_dir;
        }
        if let Some(resources) = file.resources {
            config.resources = resources;
        }
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(port) = env::get_parsed_optional::<u16>(ENV_PORT)? {
            self.port = port;
        }
        if let Some(host) = env::get_optional(ENV_HOST) {
            self.host = host;
        }
        if let Some(dir) = env::get_optional(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env::get_optional(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = env::get_optional(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        Ok(())
    }

    /// Emplacement physique d'un fichier de collection.
    /// Les chemins absolus sont conservés tels quels.
    pub fn resolve_file(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configuration minimale pointant vers `data_dir` (tests, outils).
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }
}

// --- TESTS UNITAIRES ---
