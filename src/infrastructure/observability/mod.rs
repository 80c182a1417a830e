//! Observability infrastructure - Prometheus metrics

mod config;
mod metrics;

pub use config::MetricsConfig;
pub use metrics::{
    create_metrics_router, init_metrics, record_answer, record_cache_insert, record_cache_lookup,
    record_http_request, record_research, LookupOutcome, PrometheusMetrics,
};
