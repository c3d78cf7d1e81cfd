//! Weather Provider Adapters.
//!
//! - `OpenMeteoProvider` - Open-Meteo daily forecast API
//! - `StubWeatherProvider` - Fixed forecast or injected failure for testing

mod open_meteo;
mod stub;

pub use open_meteo::{OpenMeteoConfig, OpenMeteoProvider};
pub use stub::StubWeatherProvider;
