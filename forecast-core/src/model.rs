use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Provider-supplied short text/icon pair describing the sky.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    /// Usually protocol-relative, e.g. `//cdn.weatherapi.com/weather/64x64/day/116.png`.
    pub icon: String,
    pub code: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub humidity: u8,
    pub wind_kph: f64,
    pub vis_km: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub avgtemp_c: f64,
    pub condition: Condition,
}

/// Result of one successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Canonical location name as resolved by the provider.
    pub location: String,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
}
