//! Sérialisation des cycles lecture-modification-écriture

pub mod lock_manager;

pub use lock_manager::LockManager;
