//! Core library for the `forecast` weather viewer.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com fetcher behind the `WeatherFetcher` trait
//! - Shared domain models and display helpers
//! - The view state machine driven by the terminal front end
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod describe;
pub mod display;
pub mod error;
pub mod model;
pub mod provider;
pub mod view;

pub use config::{ClientConfig, Config};
pub use describe::generate_description;
pub use error::FetchError;
pub use model::{Condition, CurrentConditions, ForecastDay, WeatherReport};
pub use provider::{WeatherApiClient, WeatherFetcher};
pub use view::{Phase, Screen, ViewState};
