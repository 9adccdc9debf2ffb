//! Tests using EffectStoreTestHarness
//!
//! These exercise the full trigger → effect → completion cycle the way the
//! running app drives it, without the terminal or the network.

use tui_dispatch::testing::*;
use tui_dispatch::{DataResource, NumericComponentId};
use weatherdash::{
    action::Action,
    components::{Component, WeatherDisplay, WeatherDisplayProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, WeatherSnapshot},
};

/// Helper to create mock weather data
fn mock_snapshot() -> WeatherSnapshot {
    WeatherSnapshot {
        location_name: "Palermo".into(),
        temperature_c: 21.4,
        description: "clear sky".into(),
        icon_id: "01d".into(),
    }
}

/// Helper to create state with weather loaded
fn state_with_weather() -> AppState {
    AppState {
        weather: DataResource::Loaded(mock_snapshot()),
        ..Default::default()
    }
}

// ============================================================================
// Fetch flow
// ============================================================================

#[test]
fn test_city_fetch_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Trigger fetch - should set loading and emit the effect
    harness.dispatch_collect(Action::WeatherFetchCity("Palermo".into()));
    harness.assert_state(|s| s.weather.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchWeather { generation: 1, .. }));

    // Simulate async completion
    harness.complete_action(Action::WeatherDidLoad {
        generation: 1,
        snapshot: mock_snapshot(),
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1, "Should have processed 1 action");
    assert_eq!(changed, 1, "Action should have changed state");

    harness.assert_state(|s| s.weather.is_loaded());
    harness.assert_state(|s| s.weather.data().unwrap().description == "clear sky");
}

#[test]
fn test_fetch_error_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::WeatherFetchCity("Palermo".into()));
    harness.assert_state(|s| s.weather.is_loading());

    harness.complete_action(Action::WeatherDidError {
        generation: 1,
        message: "Failed to fetch weather data (HTTP 500).".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.weather.is_failed());
    harness.assert_state(|s| s.weather.error() == Some("Failed to fetch weather data (HTTP 500)."));
}

#[test]
fn test_new_trigger_clears_previous_result() {
    let mut harness = EffectStoreTestHarness::new(state_with_weather(), reducer);

    harness.assert_state(|s| s.weather.is_loaded());

    harness.dispatch_collect(Action::WeatherFetchCity("Kyiv".into()));

    // Prior snapshot is discarded, not retained stale
    harness.assert_state(|s| s.weather.is_loading());
    harness.assert_state(|s| s.weather.data().is_none());
}

// ============================================================================
// Superseded requests
// ============================================================================

#[test]
fn test_slow_city_response_cannot_overwrite_newer_locate() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // City search goes out (generation 1), then the user asks for the
    // device position (generation 2) before the city response lands.
    harness.dispatch_collect(Action::WeatherFetchCity("Palermo".into()));
    harness.dispatch_collect(Action::LocateRequest);
    harness.assert_state(|s| s.generation == 2);

    harness.dispatch_collect(Action::LocateDidResolve {
        generation: 2,
        latitude: 50.45,
        longitude: 30.52,
    });
    harness.dispatch_collect(Action::WeatherDidLoad {
        generation: 2,
        snapshot: WeatherSnapshot {
            location_name: "Kyiv".into(),
            temperature_c: 7.0,
            description: "overcast clouds".into(),
            icon_id: "04d".into(),
        },
    });

    // The slow city response arrives last and must be dropped
    harness.dispatch_collect(Action::WeatherDidLoad {
        generation: 1,
        snapshot: mock_snapshot(),
    });

    harness.assert_state(|s| s.weather.data().unwrap().location_name == "Kyiv");
}

// ============================================================================
// Locate flow
// ============================================================================

#[test]
fn test_locate_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LocateRequest);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::Locate { quiet: false, .. }));

    // Position resolution alone is not a visible loading state
    harness.assert_state(|s| !s.weather.is_loading());

    harness.dispatch_collect(Action::LocateDidResolve {
        generation: 1,
        latitude: 38.1157,
        longitude: 13.3615,
    });
    harness.assert_state(|s| s.weather.is_loading());

    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| {
        matches!(e, Effect::FetchWeather { url, .. } if url.contains("lat=38.1157"))
    });
}

#[test]
fn test_locate_failure_shows_mapped_message() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LocateRequest);
    harness.complete_action(Action::LocateDidError {
        generation: 1,
        quiet: false,
        message: "Permission to access location was denied.".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.weather.error() == Some("Permission to access location was denied."));
}

#[test]
fn test_startup_probe_failure_is_invisible() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LocateQuietly);
    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::Locate { quiet: true, .. }));

    harness.complete_action(Action::LocateDidError {
        generation: 1,
        quiet: true,
        message: "Location information is unavailable.".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.weather.is_empty());
    harness.assert_state(|s| s.weather.error().is_none());
}

// ============================================================================
// Component + store integration
// ============================================================================

#[test]
fn test_keyboard_triggers_fetch() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = WeatherDisplay;

    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::WeatherFetchCity("Palermo".into()));

    harness.dispatch_collect(Action::WeatherFetchCity("Palermo".into()));
    harness.assert_state(|s| s.weather.is_loading());

    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::FetchWeather { .. }));
}

#[test]
fn test_search_submit_triggers_fetch_and_closes_overlay() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchOpen);
    harness.assert_state(|s| s.search_mode);

    harness.dispatch_collect(Action::SearchInput("London".into()));
    harness.assert_state(|s| s.search_query == "London");

    harness.dispatch_collect(Action::WeatherFetchCity("London".into()));
    harness.assert_state(|s| !s.search_mode);
    harness.assert_state(|s| s.city == "London");

    let effects = harness.drain_effects();
    effects
        .effects_first_matches(|e| matches!(e, Effect::FetchWeather { url, .. } if url.contains("q=London")));
}

// ============================================================================
// Render checks through the harness
// ============================================================================

#[test]
fn test_render_loading_state() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = WeatherDisplay;

    harness.dispatch_collect(Action::WeatherFetchCity("Palermo".into()));

    let output = harness.render_plain(60, 20, |frame, area, state| {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(
        output.contains("Loading"),
        "Loading indicator should be visible in output:\n{}",
        output
    );
}

#[test]
fn test_render_result_after_load() {
    let mut harness = EffectStoreTestHarness::new(state_with_weather(), reducer);
    let mut component = WeatherDisplay;

    let output = harness.render_plain(60, 20, |frame, area, state| {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(
        output.contains("Palermo"),
        "Location name should be visible in output:\n{}",
        output
    );
    assert!(
        output.contains("21.4\u{b0}C"),
        "Temperature should be visible in output:\n{}",
        output
    );
}
