//! Prometheus metrics for the due-post scanner and publish jobs
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};
use std::time::Duration;

/// Total due-post scan ticks (success/error)
static SCAN_RUNS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "publisher_scan_runs_total",
        "Total number of due-post scan ticks (success/error)",
        &["status"]
    )
    .expect("failed to register publisher_scan_runs_total")
});

/// Duration of due-post scan ticks
static SCAN_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "publisher_scan_duration_seconds",
        "Duration of due-post scan ticks",
        vec![0.001, 0.01, 0.1, 0.5, 1.0, 5.0, 10.0]
    )
    .expect("failed to register publisher_scan_duration_seconds")
});

/// Total publish jobs triggered by the scanner
static DUE_POSTS_TRIGGERED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "publisher_due_posts_triggered_total",
        "Total publish jobs triggered by the due-post scanner"
    )
    .expect("failed to register publisher_due_posts_triggered_total")
});

/// Publish job outcomes (published/failed/critical/skipped)
static PUBLISH_JOBS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "publisher_publish_jobs_total",
        "Total publish job executions by outcome",
        &["outcome"]
    )
    .expect("failed to register publisher_publish_jobs_total")
});

/// Duration of publish job executions
static PUBLISH_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "publisher_publish_duration_seconds",
        "Duration of publish job executions",
        vec![0.001, 0.01, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0]
    )
    .expect("failed to register publisher_publish_duration_seconds")
});

/// Per-platform publish call results
static PLATFORM_PUBLISH_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "publisher_platform_publish_total",
        "Per-platform publish call results",
        &["platform", "status"]
    )
    .expect("failed to register publisher_platform_publish_total")
});

/// Record a scan tick completion
pub fn record_scan_run(status: &str) {
    SCAN_RUNS_TOTAL.with_label_values(&[status]).inc();
}

/// Record scan tick duration
pub fn record_scan_duration(duration: Duration) {
    SCAN_DURATION_SECONDS.observe(duration.as_secs_f64());
}

/// Record publish jobs triggered by one scan tick
pub fn record_due_posts_triggered(count: u64) {
    DUE_POSTS_TRIGGERED_TOTAL.inc_by(count);
}

/// Record a publish job outcome
pub fn record_publish_job(outcome: &str) {
    PUBLISH_JOBS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Record publish job duration
pub fn record_publish_duration(duration: Duration) {
    PUBLISH_DURATION_SECONDS.observe(duration.as_secs_f64());
}

/// Record one per-platform publish call result
pub fn record_platform_publish(platform: &str, success: bool) {
    let status = if success { "success" } else { "failed" };
    PLATFORM_PUBLISH_TOTAL
        .with_label_values(&[platform, status])
        .inc();
}
