//! Collections JSON : un fichier = un tableau de records

pub mod collection;
pub mod handler;

pub use collection::{Collection, Record};
pub use handler::CollectionHandler;
