use std::sync::Arc;
use lambda_runtime::LambdaEvent;
use serde_json::Value;
use tracing::{info, debug, error};
use crate::{
    application::ingestion_service::IngestionService,
    config::IngestorConfig,
    domain::models::InvocationResponse,
    infrastructure::{kinesis::KinesisRecordPublisher, tomorrow::TomorrowWeatherFetcher},
};

/// Long-lived clients, built once per execution environment and shared by
/// every invocation it serves.
pub struct LambdaService {
    service: IngestionService,
}

impl LambdaService {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        debug!("Initializing Lambda service");

        debug!("Loading AWS configuration");
        let mut aws_config_builder = aws_config::defaults(aws_config::BehaviorVersion::latest());

        // Configure endpoint for LocalStack if AWS_ENDPOINT_URL is set
        if let Ok(endpoint_url) = std::env::var("AWS_ENDPOINT_URL") {
            info!("Using custom AWS endpoint: {}", endpoint_url);
            aws_config_builder = aws_config_builder.endpoint_url(&endpoint_url);
        }

        let aws_config = aws_config_builder.load().await;
        debug!("AWS region: {:?}", aws_config.region());

        let kinesis_client = aws_sdk_kinesis::Client::new(&aws_config);
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| {
                error!("Failed to build HTTP client: {}", e);
                e
            })?;
        debug!("Kinesis and HTTP clients initialized");

        let fetcher = Arc::new(TomorrowWeatherFetcher::new(http_client));
        let publisher = Arc::new(KinesisRecordPublisher::new(kinesis_client));

        debug!("Lambda service initialization complete");
        Ok(Self { service: IngestionService::new(fetcher, publisher) })
    }

    /// Runtime entry point. The event payload carries nothing this function
    /// uses; failures are reported through the response, never as an error.
    pub async fn handle(&self, event: LambdaEvent<Value>) -> Result<InvocationResponse, lambda_runtime::Error> {
        debug!("Invocation {} received", event.context.request_id);
        Ok(self.invoke_once().await)
    }

    pub async fn invoke_once(&self) -> InvocationResponse {
        let result = self.service.invoke(IngestorConfig::from_env).await;
        if result.is_success() {
            info!("Invocation succeeded");
        } else {
            error!("Invocation failed: {:?}", result);
        }
        result.into_response()
    }
}
