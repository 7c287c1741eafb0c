use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::LookupError,
    model::{CurrentConditions, Place},
};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Resolves free text to candidate places.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// An empty list means nothing matched.
    async fn search(&self, name: &str) -> Result<Vec<Place>, LookupError>;
}

/// Reports current conditions for a coordinate.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn current(&self, latitude: f64, longitude: f64)
    -> Result<CurrentConditions, LookupError>;
}
