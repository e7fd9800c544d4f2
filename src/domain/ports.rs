use async_trait::async_trait;
use crate::{
    config::IngestorConfig,
    domain::{error::IngestionError, models::{PublishReceipt, WeatherReading}},
};

#[async_trait]
pub trait WeatherFetcher: Send + Sync {
    async fn fetch_reading(&self, config: &IngestorConfig) -> Result<WeatherReading, IngestionError>;
}

#[async_trait]
pub trait RecordPublisher: Send + Sync {
    async fn publish(&self, stream_name: &str, reading: &WeatherReading) -> Result<PublishReceipt, IngestionError>;
}
