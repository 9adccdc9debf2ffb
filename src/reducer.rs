//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::api;
use crate::effect::Effect;
use crate::state::AppState;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather actions =====
        Action::WeatherFetchCity(city) => {
            let city = city.trim().to_string();
            if city.is_empty() {
                return DispatchResult::unchanged();
            }
            state.city = city.clone();
            state.generation += 1;
            state.weather = DataResource::Loading;
            state.tick_count = 0;
            state.search_mode = false;
            state.search_query.clear();
            let url = api::city_url(&state.api_key, &city);
            DispatchResult::changed_with(Effect::FetchWeather {
                generation: state.generation,
                url,
            })
        }

        Action::WeatherDidLoad {
            generation,
            snapshot,
        } => {
            if generation != state.generation {
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Loaded(snapshot);
            DispatchResult::changed()
        }

        Action::WeatherDidError {
            generation,
            message,
        } => {
            if generation != state.generation {
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Failed(message);
            DispatchResult::changed()
        }

        // ===== Locate actions =====
        Action::LocateRequest => {
            state.generation += 1;
            DispatchResult::changed_with(Effect::Locate {
                generation: state.generation,
                quiet: false,
            })
        }

        Action::LocateQuietly => {
            state.generation += 1;
            DispatchResult::changed_with(Effect::Locate {
                generation: state.generation,
                quiet: true,
            })
        }

        Action::LocateDidResolve {
            generation,
            latitude,
            longitude,
        } => {
            if generation != state.generation {
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Loading;
            state.tick_count = 0;
            let url = api::coords_url(&state.api_key, latitude, longitude);
            DispatchResult::changed_with(Effect::FetchWeather { generation, url })
        }

        Action::LocateDidError {
            generation,
            quiet,
            message,
        } => {
            if quiet || generation != state.generation {
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Failed(message);
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchOpen => {
            state.search_mode = true;
            state.search_query.clear();
            DispatchResult::changed()
        }

        Action::SearchClose => {
            state.search_mode = false;
            state.search_query.clear();
            DispatchResult::changed()
        }

        Action::SearchInput(query) => {
            state.search_query = query;
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.weather.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}
