//! The search-and-render flow.
//!
//! [`WeatherApp`] owns the collaborators and the observable [`QueryState`].
//! A lookup geocodes the query, fetches current conditions for the first
//! match, publishes the result (or an error message) and remembers the query
//! for the next start.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::Config,
    error::LookupError,
    model::WeatherResult,
    provider::{ForecastProvider, Geocoder, OpenMeteoClient},
    state::QueryState,
    storage::{FileStore, KeyValueStore, LAST_CITY_KEY},
};

#[derive(Debug)]
pub struct WeatherApp {
    geocoder: Arc<dyn Geocoder>,
    forecast: Arc<dyn ForecastProvider>,
    store: Arc<dyn KeyValueStore>,
    state: watch::Sender<QueryState>,
    /// Ticket of the most recently started lookup.
    latest: AtomicU64,
}

impl WeatherApp {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        forecast: Arc<dyn ForecastProvider>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let (state, _) = watch::channel(QueryState::default());
        Self {
            geocoder,
            forecast,
            store,
            state,
            latest: AtomicU64::new(0),
        }
    }

    /// Open-Meteo for both calls, file-backed storage.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = Arc::new(FileStore::new(config.store_file_path()?));
        Self::with_store(config, store)
    }

    /// Open-Meteo for both calls, caller-chosen storage.
    pub fn with_store(config: &Config, store: Arc<dyn KeyValueStore>) -> anyhow::Result<Self> {
        let client = Arc::new(OpenMeteoClient::from_config(config)?);
        Ok(Self::new(client.clone(), client, store))
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> QueryState {
        self.state.borrow().clone()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| s.input = text);
    }

    /// Look up whatever is in the search field.
    pub async fn submit(&self) {
        let input = self.state.borrow().input.clone();
        self.lookup(&input).await;
    }

    /// Re-run the last successful search, if one was stored.
    ///
    /// Storage failures are logged and otherwise ignored.
    pub async fn startup(&self) {
        match self.store.get(LAST_CITY_KEY).await {
            Ok(Some(city)) if !city.trim().is_empty() => {
                info!(%city, "restoring last city");
                self.lookup(&city).await;
            }
            Ok(_) => debug!("no last city stored"),
            Err(e) => warn!(error = %e, "could not read last city"),
        }
    }

    /// Resolve `query` and publish its current weather.
    ///
    /// Blank queries leave the state untouched. When lookups overlap, only
    /// the most recently started one is published and persisted.
    #[instrument(skip(self))]
    pub async fn lookup(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(QueryState::begin_lookup);

        let outcome = self.fetch(query).await;

        if self.latest.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "a newer lookup started, dropping this outcome");
            return;
        }

        match outcome {
            Ok(result) => {
                info!(
                    location = %result.location_label,
                    temperature_c = result.temperature_c,
                    code = result.code.code(),
                    "weather published"
                );
                self.state.send_modify(|s| s.publish_result(result));

                if let Err(e) = self.store.set(LAST_CITY_KEY, query).await {
                    warn!(error = %e, "could not persist last city");
                }
            }
            Err(err) => {
                warn!(error = %err, kind = ?err.kind(), "lookup failed");
                let message = err.user_message();
                self.state.send_modify(|s| s.publish_error(message));
            }
        }
    }

    async fn fetch(&self, query: &str) -> Result<WeatherResult, LookupError> {
        let place = self
            .geocoder
            .search(query)
            .await?
            .into_iter()
            .next()
            .ok_or(LookupError::NotFound)?;

        if place.name.trim().is_empty() {
            return Err(LookupError::Malformed(
                "geocoding returned a place without a name".to_string(),
            ));
        }

        let current = self.forecast.current(place.latitude, place.longitude).await?;
        Ok(WeatherResult::from_lookup(&place, &current))
    }
}
