use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::ClientConfig,
    error::FetchError,
    model::{Condition, CurrentConditions, ForecastDay, WeatherReport},
};

use super::WeatherFetcher;

const FORECAST_DAYS: &str = "5";

/// WeatherAPI.com client for the `forecast.json` endpoint.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    config: ClientConfig,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config, http: Client::new() }
    }
}

#[async_trait]
impl WeatherFetcher for WeatherApiClient {
    async fn fetch(&self, city: &str) -> Result<WeatherReport, FetchError> {
        let url = format!("{}/forecast.json", self.config.base_url);
        debug!(%url, city, "requesting forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("q", city),
                ("days", FORECAST_DAYS),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "forecast response received");

        parse_forecast(&body).map_err(|err| match err {
            FetchError::Transport(msg) if !status.is_success() => FetchError::Transport(format!(
                "status {status}: {msg} (body: {})",
                truncate_body(&body)
            )),
            other => other,
        })
    }
}

/// Decode a `forecast.json` body; an `error` payload wins over everything else.
pub(crate) fn parse_forecast(body: &str) -> Result<WeatherReport, FetchError> {
    let parsed: WaEnvelope = serde_json::from_str(body)?;

    if let Some(error) = parsed.error {
        return Err(FetchError::Provider(error.message));
    }

    let (Some(location), Some(current), Some(forecast)) =
        (parsed.location, parsed.current, parsed.forecast)
    else {
        return Err(FetchError::Transport(
            "response is missing location, current or forecast data".to_string(),
        ));
    };

    Ok(WeatherReport {
        location: location.name,
        current: CurrentConditions {
            temp_c: current.temp_c,
            feelslike_c: current.feelslike_c,
            humidity: current.humidity,
            wind_kph: current.wind_kph,
            vis_km: current.vis_km,
            condition: current.condition.into(),
        },
        forecast: forecast
            .forecastday
            .into_iter()
            .map(|d| ForecastDay {
                date: d.date,
                avgtemp_c: d.day.avgtemp_c,
                condition: d.day.condition.into(),
            })
            .collect(),
    })
}

#[derive(Debug, Deserialize)]
struct WaEnvelope {
    error: Option<WaError>,
    location: Option<WaLocation>,
    current: Option<WaCurrent>,
    forecast: Option<WaForecast>,
}

#[derive(Debug, Deserialize)]
struct WaError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    code: u32,
}

impl From<WaCondition> for Condition {
    fn from(c: WaCondition) -> Self {
        Condition { text: c.text, icon: c.icon, code: c.code }
    }
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    wind_kph: f64,
    vis_km: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    avgtemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
