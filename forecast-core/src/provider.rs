use async_trait::async_trait;
use std::fmt::Debug;

use crate::{FetchError, WeatherReport};

pub mod weatherapi;

pub use weatherapi::WeatherApiClient;

/// One request/response cycle against a weather provider.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    /// Fetch current conditions and the 5-day forecast for `city`.
    async fn fetch(&self, city: &str) -> Result<WeatherReport, FetchError>;
}
