//! Observability infrastructure - Metrics

mod metrics;

pub use metrics::{
    create_metrics_router, init_metrics, record_http_request, record_predict_request,
    PredictOutcome, PrometheusMetrics,
};
