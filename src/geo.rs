//! Device position lookup
//!
//! Terminals have no positioning capability of their own, so the device
//! position is resolved through an IP geolocation service. Failures classify
//! onto the same taxonomy a platform positioning API reports.

use std::time::Duration;

use serde::Deserialize;

const GEO_ENDPOINT: &str = "http://ip-api.com/json/?fields=status,lat,lon";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// A resolved device position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Position lookup error type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeoError {
    PermissionDenied,
    Unavailable,
    Timeout,
    Unsupported,
    Unknown,
}

impl GeoError {
    /// Map a positioning error code onto a variant:
    /// 1 permission denied, 2 position unavailable, 3 timeout.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => GeoError::PermissionDenied,
            2 => GeoError::Unavailable,
            3 => GeoError::Timeout,
            _ => GeoError::Unknown,
        }
    }
}

impl std::fmt::Display for GeoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            GeoError::PermissionDenied => "Permission to access location was denied.",
            GeoError::Unavailable => "Location information is unavailable.",
            GeoError::Timeout => "The request to get location timed out.",
            GeoError::Unsupported => "Geolocation is not supported on this system.",
            GeoError::Unknown => "An unknown error occurred.",
        };
        write!(f, "{}", message)
    }
}

impl std::error::Error for GeoError {}

/// IP geolocation response (ip-api.com)
#[derive(Debug, Deserialize)]
struct LookupResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

fn position_from_lookup(data: LookupResponse) -> Result<Position, GeoError> {
    if data.status != "success" {
        return Err(GeoError::Unavailable);
    }
    match (data.lat, data.lon) {
        (Some(latitude), Some(longitude)) => Ok(Position {
            latitude,
            longitude,
        }),
        _ => Err(GeoError::Unknown),
    }
}

fn classify_transport(error: reqwest::Error) -> GeoError {
    if error.is_timeout() {
        GeoError::Timeout
    } else if error.is_connect() {
        GeoError::Unavailable
    } else {
        GeoError::Unknown
    }
}

/// Resolve the current device position
pub async fn current_position() -> Result<Position, GeoError> {
    let client = reqwest::Client::builder()
        .timeout(LOOKUP_TIMEOUT)
        .build()
        .map_err(|_| GeoError::Unsupported)?;

    let response = client
        .get(GEO_ENDPOINT)
        .send()
        .await
        .map_err(classify_transport)?;

    let status = response.status();
    if status == reqwest::StatusCode::FORBIDDEN {
        return Err(GeoError::PermissionDenied);
    }
    if !status.is_success() {
        return Err(GeoError::Unavailable);
    }

    let data: LookupResponse = response.json().await.map_err(|_| GeoError::Unknown)?;
    position_from_lookup(data)
}
