//! Due-Post Scanner Background Job
//!
//! Periodically finds posts whose schedule time has arrived and are still
//! in scheduled status, and enqueues one publish job per post. The scanner
//! only reads and enqueues; post state is mutated exclusively by the
//! publish job, so overlapping ticks are tolerated.
use crate::db::post_repo;
use crate::error::Result;
use crate::metrics;
use crate::queue::{JobKind, JobQueue};
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Run the scanner loop forever at the given interval
pub async fn run_scheduler(db: PgPool, queue: Arc<dyn JobQueue>, interval: Duration) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Starting due-post scheduler loop"
    );

    loop {
        sleep(interval).await;

        let tick_start = Instant::now();
        let summary = check_due_posts(&db, queue.as_ref()).await;
        metrics::record_scan_duration(tick_start.elapsed());

        tracing::info!(
            duration_ms = tick_start.elapsed().as_millis() as u64,
            %summary,
            "Scheduler tick completed"
        );
    }
}

/// One scan tick
///
/// Returns a human-readable summary. Failures are logged and folded into
/// the summary string; nothing escapes to crash the periodic trigger, and
/// the scanner never mutates post state.
pub async fn check_due_posts(db: &PgPool, queue: &dyn JobQueue) -> String {
    tracing::info!("Checking for scheduled posts ready to be published");

    match scan_and_enqueue(db, queue).await {
        Ok(summary) => {
            metrics::record_scan_run("success");
            summary
        }
        Err(e) => {
            metrics::record_scan_run("error");
            tracing::error!(error = %e, "Due-post scan failed");
            format!("Error: {}", e)
        }
    }
}

async fn scan_and_enqueue(db: &PgPool, queue: &dyn JobQueue) -> Result<String> {
    let now_utc = Utc::now();
    let due_posts = post_repo::find_due_posts(db, now_utc).await?;

    if due_posts.is_empty() {
        tracing::info!("No posts are due for publishing");
        return Ok("No posts due.".to_string());
    }

    tracing::info!(count = due_posts.len(), "Found posts ready for publishing");

    for post in &due_posts {
        tracing::info!(
            post_id = post.id,
            schedule_time = ?post.schedule_time,
            "Triggering publish job"
        );
        queue.enqueue(JobKind::PublishPost, post.id)?;
    }

    metrics::record_due_posts_triggered(due_posts.len() as u64);
    Ok(format!(
        "Triggered publishing for {} posts.",
        due_posts.len()
    ))
}
