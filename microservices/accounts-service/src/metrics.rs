//! Lookup metrics

use bankline_telemetry::{Counter, Histogram, HistogramSummary};
use serde::Serialize;
use std::time::Instant;

#[derive(Clone)]
pub struct LookupMetrics {
    by_number: Counter,
    by_owner: Counter,
    not_found: Counter,
    store_errors: Counter,
    latency_ms: Histogram,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub by_number: u64,
    pub by_owner: u64,
    pub not_found: u64,
    pub store_errors: u64,
    pub latency_ms: HistogramSummary,
}

impl LookupMetrics {
    pub fn new() -> Self {
        Self {
            by_number: Counter::new("accounts_lookup_by_number_total"),
            by_owner: Counter::new("accounts_lookup_by_owner_total"),
            not_found: Counter::new("accounts_not_found_total"),
            store_errors: Counter::new("accounts_store_errors_total"),
            latency_ms: Histogram::new("accounts_lookup_latency_ms"),
        }
    }

    pub fn by_number(&self) {
        self.by_number.inc();
    }

    pub fn by_owner(&self) {
        self.by_owner.inc();
    }

    pub fn not_found(&self) {
        self.not_found.inc();
    }

    pub fn store_error(&self) {
        self.store_errors.inc();
    }

    pub fn observe(&self, started: Instant) {
        self.latency_ms.record(started.elapsed().as_secs_f64() * 1000.0);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            by_number: self.by_number.get(),
            by_owner: self.by_owner.get(),
            not_found: self.not_found.get(),
            store_errors: self.store_errors.get(),
            latency_ms: self.latency_ms.summary(),
        }
    }
}

impl Default for LookupMetrics {
    fn default() -> Self {
        Self::new()
    }
}
