//! Display strings derived from fetched weather.

use chrono::NaiveDate;

use crate::model::{CurrentConditions, ForecastDay};

/// One labelled value in the current-conditions grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoItem {
    pub kind: InfoKind,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoKind {
    Temperature,
    Humidity,
    WindSpeed,
    Visibility,
}

impl InfoKind {
    pub fn glyph(self) -> &'static str {
        match self {
            InfoKind::Temperature => "🌡",
            InfoKind::Humidity => "💧",
            InfoKind::WindSpeed => "🚀",
            InfoKind::Visibility => "👁",
        }
    }
}

/// `21.3` -> `21.3°C`, `20.0` -> `20°C`.
pub fn format_temp(celsius: f64) -> String {
    format!("{celsius}°C")
}

pub fn feels_like(current: &CurrentConditions) -> String {
    format!("Feels like: {}", format_temp(current.feelslike_c))
}

pub fn info_items(current: &CurrentConditions) -> [InfoItem; 4] {
    [
        InfoItem {
            kind: InfoKind::Temperature,
            label: "Temperature",
            value: format_temp(current.temp_c),
        },
        InfoItem {
            kind: InfoKind::Humidity,
            label: "Humidity",
            value: format!("{}%", current.humidity),
        },
        InfoItem {
            kind: InfoKind::WindSpeed,
            label: "Wind Speed",
            value: format!("{} km/h", current.wind_kph),
        },
        InfoItem {
            kind: InfoKind::Visibility,
            label: "Visibility",
            value: format!("{} km", current.vis_km),
        },
    ]
}

/// Provider icons come protocol-relative (`//cdn...`); give them a scheme.
pub fn icon_url(icon: &str) -> String {
    if icon.starts_with("http://") || icon.starts_with("https://") {
        icon.to_string()
    } else {
        format!("https:{icon}")
    }
}

/// `2024-03-04` -> `04-03`.
pub fn day_month(date: NaiveDate) -> String {
    date.format("%d-%m").to_string()
}

/// `2024-03-04` -> `Mon`.
pub fn weekday(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Everything one cell of the forecast strip shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCell {
    pub day_month: String,
    pub weekday: String,
    pub icon_url: String,
    pub temperature: String,
    pub condition: String,
}

impl From<&ForecastDay> for ForecastCell {
    fn from(day: &ForecastDay) -> Self {
        Self {
            day_month: day_month(day.date),
            weekday: weekday(day.date),
            icon_url: icon_url(&day.condition.icon),
            temperature: format_temp(day.avgtemp_c),
            condition: day.condition.text.clone(),
        }
    }
}

/// Terminal stand-in for the provider's condition bitmap.
pub fn condition_glyph(text: &str) -> &'static str {
    let lower = text.to_lowercase();

    if lower.contains("thunder") {
        "⛈"
    } else if lower.contains("snow") || lower.contains("sleet") || lower.contains("blizzard") {
        "❄"
    } else if lower.contains("rain") || lower.contains("drizzle") || lower.contains("shower") {
        "🌧"
    } else if lower.contains("fog") || lower.contains("mist") {
        "🌫"
    } else if lower.contains("partly") {
        "⛅"
    } else if lower.contains("cloud") || lower.contains("overcast") {
        "☁"
    } else if lower.contains("sunny") || lower.contains("clear") {
        "☀"
    } else {
        "·"
    }
}
