//! Scheduled indexing task.
//!
//! A single recurring trigger that enqueues a full reindex each period. The
//! task only produces queue entries; overlap between a tick and a previous
//! run still draining is tolerated because jobs serialize on the queue's
//! single worker.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, instrument};

use global_search_shared::RequestContext;

use crate::errors::IndexError;
use crate::service::SearchIndexService;

/// Configuration for the scheduled indexing task.
#[derive(Debug, Clone)]
pub struct TaskConfig {
    /// Time between reindex runs. Default: daily.
    pub period: Duration,
    /// Context captured for each run.
    pub ctx: RequestContext,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(24 * 60 * 60),
            ctx: RequestContext::default(),
        }
    }
}

/// Recurring trigger for full reindex runs.
pub struct ScheduledIndexTask {
    service: Arc<SearchIndexService>,
    config: TaskConfig,
    shutdown_tx: broadcast::Sender<()>,
}

impl ScheduledIndexTask {
    pub fn new(service: Arc<SearchIndexService>, config: TaskConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            service,
            config,
            shutdown_tx,
        }
    }

    /// Run the task until a shutdown signal arrives.
    ///
    /// The first tick fires immediately, so a full reindex is enqueued on
    /// startup. Ticks missed while the process is busy are skipped rather
    /// than bursted.
    #[instrument(skip(self), fields(period_secs = self.config.period.as_secs()))]
    pub async fn run(&self) -> Result<(), IndexError> {
        info!("Starting scheduled index task");

        let mut ticker = interval(self.config.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.service.enqueue_reindex(&self.config.ctx).await {
                        Ok(job_count) => {
                            info!(job_count, "Scheduled reindex enqueued");
                        }
                        Err(e) => {
                            error!(error = %e, "Failed to enqueue scheduled reindex");
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    let _ = self.shutdown_tx.send(());
                    break;
                }
                _ = shutdown_rx.recv() => {
                    info!("Scheduled index task stopping");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Trigger a graceful shutdown.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}
