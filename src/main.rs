use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{info, debug};
use tracing_subscriber::EnvFilter;
use weather_ingestion::lambda_service::LambdaService;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("weather_ingestion=info".parse().unwrap())
            .add_directive("aws_sdk_kinesis=warn".parse().unwrap())
            .add_directive("aws_config=warn".parse().unwrap()))
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .init();

    info!("Starting weather ingestion function");
    debug!("Environment variables: LATITUDE={}, LONGITUDE={}, KINESIS_NAME={}",
        std::env::var("LATITUDE").unwrap_or_else(|_| "not set".to_string()),
        std::env::var("LONGITUDE").unwrap_or_else(|_| "not set".to_string()),
        std::env::var("KINESIS_NAME").unwrap_or_else(|_| "not set".to_string())
    );

    let service = LambdaService::new().await?;
    info!("Lambda service initialized successfully");

    // Outside the Lambda runtime, run a single invocation and print the result.
    if std::env::var("AWS_LAMBDA_RUNTIME_API").is_err() {
        info!("No Lambda runtime API detected, running one local invocation");
        let response = service.invoke_once().await;
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    let service = &service;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        service.handle(event).await
    }))
    .await
}
