use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, Url};
use tracing::{debug, warn, error};
use crate::{
    config::IngestorConfig,
    domain::{error::IngestionError, models::WeatherReading, ports::WeatherFetcher},
};

pub const REALTIME_PATH: &str = "/v4/weather/realtime";

/// Fetches realtime conditions from the Tomorrow.io weather API.
pub struct TomorrowWeatherFetcher {
    client: Client,
}

impl TomorrowWeatherFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn realtime_url(config: &IngestorConfig) -> Result<Url, IngestionError> {
        let mut url = Url::parse(&format!("{}{}", config.api_url, REALTIME_PATH))
            .map_err(|e| IngestionError::Config(format!("invalid weather API url '{}': {}", config.api_url, e)))?;
        // Built by hand so the comma in `location` goes out literally.
        url.set_query(Some(&format!("location={}&apikey={}", config.location(), config.api_key)));
        Ok(url)
    }
}

#[async_trait]
impl WeatherFetcher for TomorrowWeatherFetcher {
    async fn fetch_reading(&self, config: &IngestorConfig) -> Result<WeatherReading, IngestionError> {
        let url = Self::realtime_url(config)?;
        debug!("Requesting realtime weather for location {}", config.location());

        let response = self.client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                // The url carries the api key; keep it out of logs and results.
                let e = e.without_url();
                error!("Weather API request failed: {}", e);
                IngestionError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            // The body is decoded regardless of status.
            warn!("Weather API responded with status {}", status);
        }

        let body = response.bytes().await
            .map_err(|e| IngestionError::Transport(e.without_url().to_string()))?;
        debug!("Received {} bytes from weather API", body.len());

        let document: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| {
                error!("Weather API body is not valid JSON: {}", e);
                IngestionError::Decode(e.to_string())
            })?;

        Ok(WeatherReading::new(document))
    }
}
