//! Cache
//!
//! Este módulo contiene la memorización de resúmenes del dashboard.

pub mod summary_cache;

pub use summary_cache::{CacheStats, SummaryCache};
