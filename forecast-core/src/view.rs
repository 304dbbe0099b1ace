//! View state for the single weather screen.
//!
//! The screen is either `Idle` (showing whatever it last fetched, or nothing) or
//! `Loading` (one fetch in flight). Fetch results are written back with
//! [`ViewState::settle`], which always returns the view to `Idle`.

use tracing::{info, warn};

use crate::{
    describe::generate_description,
    error::FetchError,
    model::{CurrentConditions, ForecastDay, WeatherReport},
    provider::WeatherFetcher,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// A fetch for `query` is in flight.
    Loading { query: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    city: String,
    search: String,
    phase: Phase,
    current: Option<CurrentConditions>,
    forecast: Vec<ForecastDay>,
}

/// What the screen should draw right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen<'a> {
    /// Spinner only; prior data stays in state but is hidden.
    Loading,
    Ready { current: Option<&'a CurrentConditions>, forecast: &'a [ForecastDay] },
}

impl ViewState {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            search: String::new(),
            phase: Phase::Idle,
            current: None,
            forecast: Vec::new(),
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    pub fn current(&self) -> Option<&CurrentConditions> {
        self.current.as_ref()
    }

    pub fn forecast(&self) -> &[ForecastDay] {
        &self.forecast
    }

    pub fn screen(&self) -> Screen<'_> {
        match self.phase {
            Phase::Loading { .. } => Screen::Loading,
            Phase::Idle => Screen::Ready { current: self.current.as_ref(), forecast: &self.forecast },
        }
    }

    /// Canned summary of the current conditions, once there are any.
    pub fn description(&self) -> Option<String> {
        self.current.as_ref().map(|c| generate_description(c.temp_c, &c.condition.text))
    }

    /// Initial load for the active city. Returns the query to fetch.
    pub fn mount(&mut self) -> Option<String> {
        let city = self.city.clone();
        self.begin_fetch(city)
    }

    pub fn edit_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Start a fetch for the trimmed search text and clear the field.
    ///
    /// Blank text, or a fetch already in flight, leaves everything unchanged and
    /// returns `None`.
    pub fn submit_search(&mut self) -> Option<String> {
        let query = self.search.trim().to_string();
        if query.is_empty() || self.is_loading() {
            return None;
        }

        self.search.clear();
        self.begin_fetch(query)
    }

    fn begin_fetch(&mut self, query: String) -> Option<String> {
        if self.is_loading() {
            return None;
        }
        self.phase = Phase::Loading { query: query.clone() };
        Some(query)
    }

    /// Write a finished fetch back into the view and return to `Idle`.
    ///
    /// Failures are logged and otherwise ignored, so prior data survives.
    pub fn settle(&mut self, result: Result<WeatherReport, FetchError>) {
        let query = match &self.phase {
            Phase::Loading { query } => query.clone(),
            Phase::Idle => String::new(),
        };

        match result {
            Ok(report) => {
                info!(
                    query = %query,
                    location = %report.location,
                    days = report.forecast.len(),
                    "weather updated"
                );
                self.city = report.location;
                self.current = Some(report.current);
                self.forecast = report.forecast;
            }
            Err(err) => warn!(query = %query, error = %err, "weather fetch failed"),
        }

        self.phase = Phase::Idle;
    }

    /// Run `query` to completion against `fetcher` and settle the result.
    ///
    /// For sequential callers that can hold the view across the request. The
    /// interactive screen instead fetches on a spawned task and calls
    /// [`ViewState::settle`] when the result arrives, so it can keep drawing.
    pub async fn fetch_with<F>(&mut self, fetcher: &F, query: &str)
    where
        F: WeatherFetcher + ?Sized,
    {
        let result = fetcher.fetch(query).await;
        self.settle(result);
    }
}
