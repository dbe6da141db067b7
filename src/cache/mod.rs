//! Cache module - Manages the on-disk translation cache
//!
//! Provides:
//! - Structured cache keys with a stable on-disk encoding
//! - Write-through JSON cache storage

pub mod key;
pub mod store;

pub use key::CacheKey;
pub use store::{CacheError, CacheStore};
