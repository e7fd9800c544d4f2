use async_trait::async_trait;
use aws_sdk_kinesis::{error::DisplayErrorContext, primitives::Blob, Client};
use tracing::debug;
use crate::domain::{
    error::IngestionError,
    models::{PublishReceipt, WeatherReading},
    ports::RecordPublisher,
};

/// Every record goes out under this key, so all readings land on one shard.
pub const PARTITION_KEY: &str = "partition_key";

pub struct KinesisRecordPublisher {
    client: Client,
}

impl KinesisRecordPublisher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordPublisher for KinesisRecordPublisher {
    async fn publish(&self, stream_name: &str, reading: &WeatherReading) -> Result<PublishReceipt, IngestionError> {
        let payload = reading.to_payload();
        debug!("Putting {} byte record on stream {}", payload.len(), stream_name);

        let output = self.client
            .put_record()
            .stream_name(stream_name)
            .data(Blob::new(payload.into_bytes()))
            .partition_key(PARTITION_KEY)
            .send()
            .await
            .map_err(|e| IngestionError::Publish(DisplayErrorContext(&e).to_string()))?;

        Ok(PublishReceipt {
            shard_id: output.shard_id().to_string(),
            sequence_number: output.sequence_number().to_string(),
        })
    }
}
