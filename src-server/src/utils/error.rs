// FICHIER : src-server/src/utils/error.rs

use std::io;
use std::path::PathBuf;

// --- RE-EXPORTS ANYHOW ---
// Les primitives bas niveau (fs) attachent du contexte avec anyhow
pub use anyhow::{anyhow, Context};
// On renomme le Result de anyhow pour ne pas qu'il écrase le nôtre
pub use anyhow::Result as AnyResult;

/// Type de résultat standard du serveur.
pub type Result<T> = std::result::Result<T, AppError>;

/// Enumération centrale des erreurs de l'application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] io::Error),

    /// Porte le libellé singulier de la ressource (ex: "user").
    #[error("{0} not found")]
    NotFound(String),

    #[error("Échec de sauvegarde de {path:?} : {source:#}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// Fichier de collection illisible ou invalide.
    #[error("Collection corrompue {path:?} : {reason}")]
    Corruption { path: PathBuf, reason: String },

    #[error("Requête invalide : {0}")]
    BadRequest(String),

    #[error("Erreur Base de Données : {0}")]
    Database(String),
}

impl AppError {
    pub fn persistence(path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        AppError::Persistence {
            path: path.into(),
            source,
        }
    }
}
