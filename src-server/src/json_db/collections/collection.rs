// FICHIER : src-server/src/json_db/collections/collection.rs

//! Primitives collections : records, normalisation des identifiants, allocation.
//! Pas d'I/O ici, uniquement des transformations en mémoire.

use crate::utils::error::{AppError, Result};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Champ identifiant obligatoire de chaque record.
pub const ID_FIELD: &str = "id";

/// Un objet JSON ; seul `id` est contraint.
pub type Record = Map<String, Value>;

/// Contenu complet d'un fichier de collection (tableau JSON).
pub type Collection = Vec<Record>;

/// Normalise un identifiant reçu sous forme textuelle (segment d'URL).
/// "3", " 3 " et "3.0" donnent 3 ; tout le reste est rejeté.
pub fn parse_id(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i64>() {
        return Some(id);
    }
    raw.parse::<f64>().ok().and_then(integral_f64)
}

/// Normalise un identifiant stocké (nombre ou chaîne numérique).
pub fn normalize_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral_f64)),
        Value::String(s) => parse_id(s),
        _ => None,
    }
}

fn integral_f64(f: f64) -> Option<i64> {
    // Bornes exclusives : i64::MAX n'est pas représentable exactement en f64
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

pub fn record_id(record: &Record) -> Option<i64> {
    record.get(ID_FIELD).and_then(normalize_id)
}

/// Position du record dont l'id vaut `id` après normalisation.
pub fn find_index(collection: &[Record], id: i64) -> Option<usize> {
    collection
        .iter()
        .position(|record| record_id(record) == Some(id))
}

/// Prochain identifiant : 1 si aucun id, sinon max + 1.
pub fn next_id(collection: &[Record]) -> Result<i64> {
    match collection.iter().filter_map(record_id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            AppError::Database(format!("Espace d'identifiants épuisé (max = {})", max))
        }),
    }
}

/// Construit `{id, ...body}` : l'id fourni gagne toujours sur celui du corps.
pub fn build_record(id: i64, body: Record) -> Record {
    let mut record = Map::with_capacity(body.len() + 1);
    record.insert(ID_FIELD.to_string(), Value::from(id));
    for (key, value) in body {
        if key != ID_FIELD {
            record.insert(key, value);
        }
    }
    record
}

/// Premier identifiant présent deux fois, s'il existe.
pub fn find_duplicate_id(collection: &[Record]) -> Option<i64> {
    let mut seen = HashSet::with_capacity(collection.len());
    collection
        .iter()
        .filter_map(record_id)
        .find(|id| !seen.insert(*id))
}
