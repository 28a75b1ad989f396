//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite and in-memory content stores
//! - Random: `RandomPort` adapters over `rand`
//! - Content: built-in content modules
//! - Config: Application configuration
//! - Testing: deterministic random doubles

pub mod config;
pub mod content;
pub mod persistence;
pub mod random;
#[cfg(test)]
pub mod testing;
