// FICHIER : src-server/src/utils/fs.rs

use crate::utils::error::{AnyResult, Context};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::instrument;

/// Fichier temporaire voisin utilisé par l'écriture atomique : `users.json` -> `users.json.tmp`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Crée récursivement un répertoire s'il n'existe pas.
pub async fn ensure_dir(path: &Path) -> AnyResult<()> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        fs::create_dir_all(path)
            .await
            .with_context(|| format!("Création du dossier {:?} impossible", path))?;
    }
    Ok(())
}

/// `false` aussi quand l'existence ne peut pas être vérifiée (l'erreur est journalisée).
pub async fn exists(path: &Path) -> bool {
    match fs::try_exists(path).await {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("⚠️ Existence de {:?} invérifiable : {}", path, e);
            false
        }
    }
}

// --- ÉCRITURE ATOMIQUE ---

/// Écriture atomique sécurisée (write -> sync -> rename).
/// En cas d'échec, la cible garde son contenu précédent et le temporaire est supprimé.
#[instrument(skip(content, path), fields(path = ?path))]
pub async fn write_atomic(path: &Path, content: &[u8]) -> AnyResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent).await?;
    }

    let tmp_path = temp_path_for(path);
    if let Err(e) = write_and_sync(&tmp_path, content).await {
        discard_temp(&tmp_path).await;
        return Err(e);
    }

    if let Err(e) = fs::rename(&tmp_path, path).await {
        discard_temp(&tmp_path).await;
        return Err(e).with_context(|| format!("Renommage {:?} -> {:?} impossible", tmp_path, path));
    }
    Ok(())
}

async fn write_and_sync(tmp_path: &Path, content: &[u8]) -> AnyResult<()> {
    let mut file = fs::File::create(tmp_path)
        .await
        .with_context(|| format!("Création du fichier temporaire {:?} impossible", tmp_path))?;
    file.write_all(content)
        .await
        .with_context(|| format!("Écriture dans {:?} impossible", tmp_path))?;
    // On force l'écriture physique sur le disque avant le rename
    file.sync_all()
        .await
        .with_context(|| format!("fsync de {:?} impossible", tmp_path))?;
    Ok(())
}

async fn discard_temp(tmp_path: &Path) {
    // Le temporaire peut ne pas exister (échec de création), ou être un dossier
    if fs::metadata(tmp_path).await.map(|m| m.is_file()).unwrap_or(false) {
        if let Err(e) = fs::remove_file(tmp_path).await {
            tracing::warn!("Nettoyage du temporaire {:?} impossible : {}", tmp_path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_temp_path_keeps_extension() {
        assert_eq!(
            temp_path_for(Path::new("/data/users.json")),
            PathBuf::from("/data/users.json.tmp")
        );
    }

    #[tokio::test]
    async fn test_exists_under_a_file_is_false() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("users.json");
        fs::write(&file_path, b"[]").await.unwrap();

        assert!(exists(&file_path).await);
        assert!(!exists(&file_path.join("enfant.json")).await);
        assert!(fs::try_exists(file_path.join("enfant.json")).await.is_err());
    }

    #[tokio::test]
    async fn test_atomic_write_creates_parents() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nested/deeper/test.json");

        write_atomic(&file_path, b"[]").await.unwrap();

        let content = fs::read_to_string(&file_path).await.unwrap();
        assert_eq!(content, "[]");
        assert!(!exists(&temp_path_for(&file_path)).await);
    }

    #[tokio::test]
    async fn test_atomic_write_failure_keeps_previous_content() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("products.json");
        fs::write(&file_path, b"[{\"id\":1}]").await.unwrap();

        // Un dossier à la place du temporaire rend la création impossible
        fs::create_dir(temp_path_for(&file_path)).await.unwrap();

        let res = write_atomic(&file_path, b"[]").await;
        assert!(res.is_err());

        let content = fs::read_to_string(&file_path).await.unwrap();
        assert_eq!(content, "[{\"id\":1}]");
    }
}
