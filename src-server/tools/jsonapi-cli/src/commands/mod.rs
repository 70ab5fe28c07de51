// FICHIER : src-server/tools/jsonapi-cli/src/commands/mod.rs

pub mod collections;
