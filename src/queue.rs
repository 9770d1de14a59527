/// Job dispatch seam
///
/// The external broker and its delivery guarantees are out of scope; this
/// module defines the `enqueue(kind, argument)` interface the scanner speaks
/// and an in-process implementation backed by an unbounded channel, drained
/// by a background worker.
use crate::error::{AppError, Result};
use crate::services::PublishService;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Named units of work this service dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    PublishPost,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::PublishPost => "publish_post",
        }
    }
}

/// One queued unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedJob {
    pub kind: JobKind,
    pub post_id: i64,
}

/// Fire-and-forget job dispatch
///
/// Callers never learn about job completion through this interface; outcomes
/// land on the post row itself.
pub trait JobQueue: Send + Sync {
    fn enqueue(&self, kind: JobKind, post_id: i64) -> Result<()>;
}

/// In-process queue over an unbounded channel
#[derive(Clone)]
pub struct InMemoryJobQueue {
    tx: mpsc::UnboundedSender<QueuedJob>,
}

impl InMemoryJobQueue {
    /// Create the queue and the receiver its worker drains
    pub fn new() -> (Self, mpsc::UnboundedReceiver<QueuedJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl JobQueue for InMemoryJobQueue {
    fn enqueue(&self, kind: JobKind, post_id: i64) -> Result<()> {
        self.tx.send(QueuedJob { kind, post_id }).map_err(|e| {
            AppError::Internal(format!("Failed to enqueue {} job: {}", kind.as_str(), e))
        })
    }
}

/// Background worker that drains the queue and runs publish jobs
///
/// Each job is spawned as its own task: jobs for different posts may run
/// concurrently, and one post's job owns its row for the duration of its
/// single commit. Runs until the queue side is dropped. Job status lines
/// are logged, never inspected for control flow.
pub async fn run_publish_worker(
    mut rx: mpsc::UnboundedReceiver<QueuedJob>,
    service: Arc<PublishService>,
) {
    tracing::info!("Publish worker started");

    while let Some(job) = rx.recv().await {
        match job.kind {
            JobKind::PublishPost => {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    let summary = service.publish_post(job.post_id).await;
                    tracing::info!(post_id = job.post_id, %summary, "Publish job finished");
                });
            }
        }
    }

    tracing::info!("Publish worker stopped: queue closed");
}
