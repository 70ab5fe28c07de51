// FICHIER : src-server/src/lib.rs

pub mod api;
pub mod json_db;
pub mod utils;
