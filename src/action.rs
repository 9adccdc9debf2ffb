//! Actions - user triggers and async completions

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WeatherSnapshot;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Weather category =====
    /// Intent: fetch current conditions for a city (search submit or refresh)
    WeatherFetchCity(String),

    /// Result: snapshot parsed from a successful response
    WeatherDidLoad {
        generation: u64,
        snapshot: WeatherSnapshot,
    },

    /// Result: the request failed (non-OK status, transport or parse error)
    WeatherDidError { generation: u64, message: String },

    // ===== Locate category =====
    /// Intent: resolve the device position, then fetch (user triggered)
    LocateRequest,

    /// Intent: startup position probe; failures stay silent
    LocateQuietly,

    /// Result: position resolved
    LocateDidResolve {
        generation: u64,
        latitude: f64,
        longitude: f64,
    },

    /// Result: position lookup failed; `quiet` completions are dropped
    LocateDidError {
        generation: u64,
        quiet: bool,
        message: String,
    },

    // ===== Search category =====
    /// Open the city search overlay
    SearchOpen,

    /// Close the search overlay (cancel)
    SearchClose,

    /// Search text changed
    SearchInput(String),

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
