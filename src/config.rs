use std::fmt;
use tracing::debug;
use crate::domain::error::IngestionError;

pub const LATITUDE_VAR: &str = "LATITUDE";
pub const LONGITUDE_VAR: &str = "LONGITUDE";
pub const API_KEY_VAR: &str = "TOMORROW_API_KEY";
pub const STREAM_NAME_VAR: &str = "KINESIS_NAME";
pub const API_URL_VAR: &str = "TOMORROW_API_URL";

pub const DEFAULT_API_URL: &str = "https://api.tomorrow.io";

/// Values needed for a single invocation. Loaded fresh on every run and never
/// mutated afterwards.
pub struct IngestorConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub api_key: String,
    pub stream_name: String,
    pub api_url: String,
}

impl IngestorConfig {
    pub fn from_env() -> Result<Self, IngestionError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IngestionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let latitude = parse_coordinate(&lookup, LATITUDE_VAR)?;
        let longitude = parse_coordinate(&lookup, LONGITUDE_VAR)?;
        let api_key = required(&lookup, API_KEY_VAR)?;
        let stream_name = required(&lookup, STREAM_NAME_VAR)?;
        let api_url = lookup(API_URL_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        debug!("Loaded configuration - location: {},{}, stream: {}, api: {}",
            latitude, longitude, stream_name, api_url);

        Ok(Self { latitude, longitude, api_key, stream_name, api_url })
    }

    /// `<lat>,<lon>` as the provider expects it in the `location` parameter.
    pub fn location(&self) -> String {
        format!("{},{}", render_coordinate(self.latitude), render_coordinate(self.longitude))
    }
}

impl fmt::Debug for IngestorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestorConfig")
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("api_key", &"<redacted>")
            .field("stream_name", &self.stream_name)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Shortest round-trip form, always with a fractional part or an exponent,
/// and a sign plus at least two digits in the exponent (`10.0`, `1e-05`).
fn render_coordinate(value: f64) -> String {
    let rendered = format!("{:?}", value);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => rendered,
    }
}

fn required<F>(lookup: &F, name: &str) -> Result<String, IngestionError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(IngestionError::Config(format!("{} is empty", name))),
        None => Err(IngestionError::Config(format!("{} is not set", name))),
    }
}

fn parse_coordinate<F>(lookup: &F, name: &str) -> Result<f64, IngestionError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = required(lookup, name)?;
    let value: f64 = raw.trim().parse()
        .map_err(|e| IngestionError::Config(format!("{} must be a number, got '{}': {}", name, raw, e)))?;

    if !value.is_finite() {
        return Err(IngestionError::Config(format!("{} must be finite, got '{}'", name, raw)));
    }

    Ok(value)
}
