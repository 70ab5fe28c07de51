// FICHIER : src-server/src/utils/mod.rs

// =========================================================================
//  Foundation Layer : config, erreurs, logs, I/O disque
// =========================================================================

pub mod config;
pub mod env;
pub mod error;
pub mod fs;
pub mod logger;

// --> Config & Erreurs
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use logger::init_logging;

/// **Le Prélude** : À utiliser via `use crate::utils::prelude::*;`
pub mod prelude {
    pub use super::config::AppConfig;
    pub use super::error::{AppError, Result};
    pub use serde_json::{json, Map, Value};
    pub use tracing::{debug, error, info, instrument, warn};
}
