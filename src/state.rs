//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// Current conditions from the OpenWeatherMap current-weather endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    /// `name` - resolved location name
    pub location_name: String,
    /// `main.temp` - metric; the service is the source of truth for units
    pub temperature_c: f32,
    /// `weather[0].description`
    pub description: String,
    /// `weather[0].icon` - provider icon id, e.g. "01d"
    pub icon_id: String,
}

/// Spinner frame advance interval while a request is in flight.
pub const SPINNER_TICK_MS: u64 = 120;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// City text for the next submit (also the last submitted query)
    #[debug(section = "Query", label = "City")]
    pub city: String,

    /// Weather lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Weather", label = "Data", debug_fmt)]
    pub weather: DataResource<WeatherSnapshot>,

    /// Id of the newest trigger; completions carrying an older one are dropped
    #[debug(section = "Weather", label = "Generation")]
    pub generation: u64,

    /// OpenWeatherMap API key, injected at startup
    #[debug(skip)]
    pub api_key: String,

    /// Spinner frame counter, advances only while loading
    #[debug(skip)]
    pub tick_count: u32,

    // --- Search overlay (skipped) ---
    /// Whether the search overlay is open
    #[debug(skip)]
    pub search_mode: bool,

    /// Text currently typed into the search overlay
    #[debug(skip)]
    pub search_query: String,
}

impl AppState {
    /// Create state with the given initial city text and API key
    pub fn new(city: String, api_key: String) -> Self {
        Self {
            city,
            weather: DataResource::Empty,
            generation: 0,
            api_key,
            tick_count: 0,
            search_mode: false,
            search_query: String::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("Palermo".into(), String::new())
    }
}
