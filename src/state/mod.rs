/// Image cache state
///
/// This module handles everything that is persisted:
/// - The SQLite record store and its queries (library.rs)
/// - Shared record types (data.rs)
/// - Deterministic cache file names (naming.rs)
/// - Content hashing of downloaded images (hash.rs)

pub mod data;
pub mod hash;
pub mod library;
pub mod naming;
