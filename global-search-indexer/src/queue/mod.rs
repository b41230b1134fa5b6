//! Job queue abstraction.
//!
//! The pipeline only produces [`IndexJobData`] payloads and defines the job
//! handler signature; retry, backoff, and persistence are the queue
//! implementation's responsibility. The in-memory queue provided here offers
//! none of those, but its single worker guarantees that indexing jobs run
//! one at a time.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use global_search_shared::IndexJobData;

use crate::errors::{IndexError, QueueError};

/// Processing function invoked by the queue worker for each job.
pub type JobHandler =
    Arc<dyn Fn(IndexJobData) -> BoxFuture<'static, Result<(), IndexError>> + Send + Sync>;

/// Producer side of a job queue.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Enqueue a job for background processing.
    async fn add(&self, job: IndexJobData) -> Result<(), QueueError>;
}

/// In-memory job queue backed by a tokio channel and one worker task.
///
/// Jobs are processed serially in enqueue order. A failing job is logged and
/// dropped; the worker moves on to the next one.
pub struct InMemoryJobQueue {
    name: String,
    sender: mpsc::Sender<IndexJobData>,
}

/// Handle to the queue's worker task.
pub struct QueueWorker {
    handle: JoinHandle<()>,
    shutdown_tx: broadcast::Sender<()>,
}

impl InMemoryJobQueue {
    /// Create a queue and spawn its worker.
    pub fn start(
        name: impl Into<String>,
        capacity: usize,
        handler: JobHandler,
    ) -> (Self, QueueWorker) {
        let name = name.into();
        let (sender, mut receiver) = mpsc::channel::<IndexJobData>(capacity);
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);

        let worker_name = name.clone();
        let handle = tokio::spawn(async move {
            info!(queue = %worker_name, "Queue worker started");
            loop {
                tokio::select! {
                    job = receiver.recv() => {
                        match job {
                            Some(job) => {
                                let entity_name = job.entity_name.clone();
                                debug!(queue = %worker_name, entity_name = %entity_name, "Processing job");
                                if let Err(e) = handler(job).await {
                                    warn!(
                                        queue = %worker_name,
                                        entity_name = %entity_name,
                                        error = %e,
                                        "Job failed"
                                    );
                                }
                            }
                            None => break,
                        }
                    }
                    _ = shutdown_rx.recv() => break,
                }
            }
            info!(queue = %worker_name, "Queue worker stopped");
        });

        (
            Self { name, sender },
            QueueWorker {
                handle,
                shutdown_tx,
            },
        )
    }

    /// The queue's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl JobQueue for InMemoryJobQueue {
    async fn add(&self, job: IndexJobData) -> Result<(), QueueError> {
        self.sender
            .send(job)
            .await
            .map_err(|_| QueueError::closed(self.name.clone()))
    }
}

impl QueueWorker {
    /// Signal the worker to stop after its current job. Jobs still queued
    /// are abandoned; drop the queue handles instead to drain them.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Wait for the worker to finish. The worker exits once all queue
    /// handles are dropped and the channel drains, or when shut down.
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}
