//! OpenWeatherMap current-weather client

use serde::Deserialize;

use crate::state::WeatherSnapshot;

const API_BASE: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Build the query URL for a city search
pub fn city_url(api_key: &str, city: &str) -> String {
    format!(
        "{API_BASE}?q={}&units=metric&appid={api_key}",
        urlencoding::encode(city)
    )
}

/// Build the query URL for a coordinate pair
pub fn coords_url(api_key: &str, lat: f64, lon: f64) -> String {
    format!("{API_BASE}?lat={lat}&lon={lon}&units=metric&appid={api_key}")
}

// ============================================================================
// Response shape
// ============================================================================

/// Current-weather response from OpenWeatherMap (simplified)
#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    main: MainReading,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReading {
    temp: f32,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

/// Fetch error type
#[derive(Debug)]
pub enum FetchError {
    Request(reqwest::Error),
    Status(reqwest::StatusCode),
    MissingConditions,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Request(e) => write!(f, "Failed to fetch weather data: {}", e),
            FetchError::Status(code) => {
                write!(f, "Failed to fetch weather data (HTTP {}).", code.as_u16())
            }
            FetchError::MissingConditions => {
                write!(f, "Weather response contained no conditions.")
            }
        }
    }
}

impl std::error::Error for FetchError {}

fn snapshot_from_response(data: CurrentResponse) -> Result<WeatherSnapshot, FetchError> {
    let condition = data
        .weather
        .into_iter()
        .next()
        .ok_or(FetchError::MissingConditions)?;
    Ok(WeatherSnapshot {
        location_name: data.name,
        temperature_c: data.main.temp,
        description: condition.description,
        icon_id: condition.icon,
    })
}

/// Perform one request/response cycle against a prepared weather URL
pub async fn fetch_current(url: &str) -> Result<WeatherSnapshot, FetchError> {
    let response = reqwest::get(url).await.map_err(FetchError::Request)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let data: CurrentResponse = response.json().await.map_err(FetchError::Request)?;
    snapshot_from_response(data)
}
