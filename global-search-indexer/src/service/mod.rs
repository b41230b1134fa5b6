//! Search index service.
//!
//! Produces indexing jobs (one per registered entity type) and defines the
//! processing function the queue worker runs for each of them.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use global_search_repository::EntityRegistry;
use global_search_shared::{IndexJobData, RequestContext};

use crate::errors::IndexError;
use crate::processor::DataProcessor;
use crate::queue::{JobHandler, JobQueue};

/// Enqueues indexing work onto the job queue.
pub struct SearchIndexService {
    registry: Arc<EntityRegistry>,
    queue: Arc<dyn JobQueue>,
}

impl SearchIndexService {
    pub fn new(registry: Arc<EntityRegistry>, queue: Arc<dyn JobQueue>) -> Self {
        Self { registry, queue }
    }

    /// Enqueue one indexing job per registered entity type.
    ///
    /// Returns the number of jobs enqueued.
    #[instrument(skip(self, ctx), fields(channel = %ctx.channel_code))]
    pub async fn enqueue_reindex(&self, ctx: &RequestContext) -> Result<usize, IndexError> {
        let serialized = ctx.serialize();
        let mut enqueued = 0;

        for entry in self.registry.entries() {
            self.queue
                .add(IndexJobData::new(
                    entry.metadata.name.clone(),
                    serialized.clone(),
                ))
                .await?;
            enqueued += 1;
        }

        info!(job_count = enqueued, "Enqueued reindex jobs");
        Ok(enqueued)
    }

    /// Build the queue's processing function.
    ///
    /// The handler restores the request context from the payload and runs
    /// the processor over the named entity type.
    pub fn job_handler(processor: Arc<DataProcessor>) -> JobHandler {
        Arc::new(move |job: IndexJobData| {
            let processor = processor.clone();
            Box::pin(async move {
                let ctx = RequestContext::from_serialized(&job.ctx);
                debug!(
                    entity_name = %job.entity_name,
                    channel = %ctx.channel_code,
                    "Starting index job"
                );
                let processed = processor.process_entity(&job.entity_name).await?;
                info!(
                    entity_name = %job.entity_name,
                    processed,
                    "Index job complete"
                );
                Ok(())
            })
        })
    }
}
