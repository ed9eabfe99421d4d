//! Cache de resúmenes del dashboard
//!
//! Memoriza `DashboardSummary` por checksum MD5 del snapshot serializado,
//! el período y la fecha. Un cambio cualquiera en la colección produce
//! otro checksum, así que no hace falta invalidar a mano.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::config::environment::TrackerConfig;
use crate::models::analytics::{DashboardSummary, SummaryPeriod};
use crate::models::refuel::RefuelRecord;
use crate::services::summary_service::SummaryService;
use crate::utils::errors::TrackerResult;

/// Estadísticas del cache
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries_evicted: u64,
}

#[derive(Debug, Clone)]
struct CachedSummary {
    summary: DashboardSummary,
    inserted_seq: u64,
}

#[derive(Serialize)]
struct SummaryKey<'a> {
    records: &'a [RefuelRecord],
    period: SummaryPeriod,
    today: NaiveDate,
    recent_limit: usize,
}

pub struct SummaryCache {
    entries: HashMap<String, CachedSummary>,
    capacity: usize,
    next_seq: u64,
    stats: CacheStats,
}

impl SummaryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            next_seq: 0,
            stats: CacheStats::default(),
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.summary_cache_capacity)
    }

    /// Devolver el resumen memorizado o calcularlo con `service`
    pub fn get_or_compute(
        &mut self,
        service: &SummaryService,
        records: &[RefuelRecord],
        period: SummaryPeriod,
        today: NaiveDate,
    ) -> TrackerResult<DashboardSummary> {
        let key = calculate_checksum(&SummaryKey {
            records,
            period,
            today,
            recent_limit: service.config().recent_refuels_limit,
        })?;

        if let Some(cached) = self.entries.get(&key) {
            self.stats.hits += 1;
            debug!("Cache hit para resumen {} ({})", period, key);
            return Ok(cached.summary.clone());
        }

        self.stats.misses += 1;
        debug!("Cache miss para resumen {} ({})", period, key);

        let summary = service.summarize(records, period, today);
        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        self.entries.insert(
            key,
            CachedSummary {
                summary: summary.clone(),
                inserted_seq: self.next_seq,
            },
        );
        self.next_seq += 1;

        Ok(summary)
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn evict_oldest(&mut self) {
        let oldest_key = self
            .entries
            .iter()
            .min_by_key(|(_, cached)| cached.inserted_seq)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest_key {
            self.entries.remove(&key);
            self.stats.entries_evicted += 1;
            debug!("Resumen expulsado del cache: {}", key);
        }
    }
}

fn calculate_checksum<T: Serialize>(value: &T) -> TrackerResult<String> {
    let json = serde_json::to_string(value)?;
    Ok(format!("{:x}", md5::compute(json.as_bytes())))
}
