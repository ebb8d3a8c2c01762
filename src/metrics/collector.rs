// src/metrics/collector.rs
use crate::analyzer::Status;
use anyhow::{Context, Result};
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::Instant;

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<MetricsCollector>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(MetricsCollector::new(&registry)?);
        
        Ok(Self {
            registry,
            collector,
        })
    }
    
    pub fn collector(&self) -> Arc<MetricsCollector> {
        self.collector.clone()
    }
    
    /// Text exposition of everything recorded so far.
    pub fn gather(&self) -> Result<Vec<u8>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .context("Failed to encode metrics")?;
        Ok(buffer)
    }
}

pub struct MetricsCollector {
    pub checks_total: IntCounterVec,
    pub check_duration_seconds: Histogram,
    pub checks_in_flight: IntGauge,
    pub dispatches_total: IntCounterVec,
}

impl MetricsCollector {
    pub fn new(registry: &Registry) -> Result<Self> {
        let checks_total = IntCounterVec::new(
            Opts::new("log_checks_total", "Total number of completed log checks"),
            &["status"],
        )?;
        registry.register(Box::new(checks_total.clone()))?;
        
        let check_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "log_check_duration_seconds",
            "Duration of a single log check in seconds",
        ))?;
        registry.register(Box::new(check_duration_seconds.clone()))?;
        
        let checks_in_flight =
            IntGauge::new("log_checks_in_flight", "Log checks currently running")?;
        registry.register(Box::new(checks_in_flight.clone()))?;
        
        let dispatches_total = IntCounterVec::new(
            Opts::new("log_dispatches_total", "Total number of dispatch runs"),
            &["filter"],
        )?;
        registry.register(Box::new(dispatches_total.clone()))?;
        
        Ok(Self {
            checks_total,
            check_duration_seconds,
            checks_in_flight,
            dispatches_total,
        })
    }
    
    pub fn record_dispatch(&self, filter: Option<Status>) {
        let label = filter.map_or("none", |status| status.as_str());
        self.dispatches_total.with_label_values(&[label]).inc();
    }
    
    pub fn check_started(&self) {
        self.checks_in_flight.inc();
    }
    
    pub fn check_finished(&self, status: Status, duration: std::time::Duration) {
        self.checks_in_flight.dec();
        self.checks_total
            .with_label_values(&[status.as_str()])
            .inc();
        self.check_duration_seconds.observe(duration.as_secs_f64());
    }
    
    /// A check task that died before reporting counts as failed.
    pub fn check_aborted(&self) {
        self.checks_in_flight.dec();
        self.checks_total
            .with_label_values(&[Status::Failed.as_str()])
            .inc();
    }
}

// Helper for timing operations
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
    
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}
