//! Core library for the `clima` weather lookup client.
//!
//! This crate defines:
//! - Weather codes and their display descriptors
//! - Geocoding and forecast collaborators (Open-Meteo)
//! - Persistence of the last searched city
//! - The observable query state and the lookup flow that drives it
//! - Configuration
//!
//! It is used by `clima-cli`, but any front end can own a [`WeatherApp`]
//! and render its [`QueryState`].

pub mod code;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod state;
pub mod storage;

pub use code::{WeatherCode, WeatherDescriptor};
pub use config::Config;
pub use error::{ErrorKind, LookupError, StorageError};
pub use lookup::WeatherApp;
pub use model::{CurrentConditions, Place, WeatherResult};
pub use provider::{ForecastProvider, Geocoder, OpenMeteoClient};
pub use state::{DisplayMode, QueryState};
pub use storage::{FileStore, KeyValueStore, LAST_CITY_KEY, MemoryStore};
