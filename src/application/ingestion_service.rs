use std::sync::Arc;
use tracing::{info, debug, error};
use crate::{
    config::IngestorConfig,
    domain::{
        error::IngestionError,
        models::InvocationResult,
        ports::{WeatherFetcher, RecordPublisher},
    },
};

pub struct IngestionService {
    fetcher: Arc<dyn WeatherFetcher>,
    publisher: Arc<dyn RecordPublisher>,
}

impl IngestionService {
    pub fn new(fetcher: Arc<dyn WeatherFetcher>, publisher: Arc<dyn RecordPublisher>) -> Self {
        Self { fetcher, publisher }
    }

    /// One full invocation: load configuration, fetch, publish. Every error is
    /// folded into `InvocationResult::Failure`.
    pub async fn invoke<F>(&self, load_config: F) -> InvocationResult
    where
        F: FnOnce() -> Result<IngestorConfig, IngestionError>,
    {
        let outcome = match load_config() {
            Ok(config) => self.run(&config).await,
            Err(e) => {
                error!("Failed to load configuration: {}", e);
                Err(e)
            }
        };

        match outcome {
            Ok(()) => InvocationResult::Success,
            Err(e) => InvocationResult::Failure { message: e.to_string() },
        }
    }

    pub async fn run(&self, config: &IngestorConfig) -> Result<(), IngestionError> {
        info!("Starting weather ingestion for location {} into stream {}",
            config.location(), config.stream_name);

        // Step 1: Fetch the current reading
        debug!("Step 1: Fetching realtime weather from {}", config.api_url);
        let reading = self.fetcher.fetch_reading(config).await
            .map_err(|e| {
                error!("Failed to fetch weather reading: {}", e);
                e
            })?;
        info!("Fetched weather reading: {}", reading.document());

        // Step 2: Forward it unchanged
        debug!("Step 2: Publishing reading to stream {}", config.stream_name);
        let receipt = self.publisher.publish(&config.stream_name, &reading).await
            .map_err(|e| {
                error!("Failed to publish reading to {}: {}", config.stream_name, e);
                e
            })?;

        info!("✅ Published reading to {} - shard: {}, sequence: {}",
            config.stream_name, receipt.shard_id, receipt.sequence_number);
        Ok(())
    }
}
