use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{error, info, warn};

use crate::{
    error::LookupError,
    provider::{CurrentConditions, Geocoder},
    query::SearchQuery,
    view::{SUCCESS_MESSAGE, Status, ViewState, ViewSurface, WeatherDisplay, in_progress_message},
};

/// Drives one city lookup at a time into a [`ViewState`].
///
/// Hosts forward their submit, reset and text-changed events to
/// [`submit_search`](Self::submit_search), [`reset_search`](Self::reset_search)
/// and [`on_input_changed`](Self::on_input_changed). Failures never reach the
/// caller; they end up on the status line.
///
/// Every accepted submission and every reset starts a new generation. A lookup
/// that resumes after its generation was superseded is dropped without
/// touching the view.
#[derive(Debug)]
pub struct WeatherLookupController<G, W, S> {
    geocoder: G,
    conditions: W,
    surface: S,
    language: String,
    view: Mutex<ViewState>,
    generation: AtomicU64,
}

impl<G, W, S> WeatherLookupController<G, W, S>
where
    G: Geocoder,
    W: CurrentConditions,
    S: ViewSurface,
{
    pub fn new(geocoder: G, conditions: W, surface: S, language: impl Into<String>) -> Self {
        Self {
            geocoder,
            conditions,
            surface,
            language: language.into(),
            view: Mutex::new(ViewState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> ViewState {
        self.view.lock().clone()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Look up `raw_city` and render the outcome.
    pub async fn submit_search(&self, raw_city: &str) {
        let query = match SearchQuery::parse(raw_city) {
            Ok(query) => query,
            Err(err) => {
                // result panel stays as it was
                self.update(|view| view.status = Status::error(err.status_message()));
                return;
            }
        };

        let generation = self.update(|view| {
            view.status = Status::info(in_progress_message(query.as_str()));
            view.clear_result();
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        });

        let outcome = self.lookup(&query).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            warn!(city = %query, "discarding superseded lookup");
            return;
        }

        match outcome {
            Ok(shown) => {
                info!(city = %shown.city, "lookup succeeded");
                self.update_if_current(generation, |view| {
                    view.result = Some(shown);
                    view.status = Status::info(SUCCESS_MESSAGE);
                });
            }
            Err(err) => {
                if let LookupError::Unexpected(_) = &err {
                    error!(city = %query, error = %err, "lookup failed unexpectedly");
                }
                self.update_if_current(generation, |view| {
                    view.status = Status::error(err.status_message());
                });
            }
        }
    }

    /// Clear input, status and result. No network activity.
    pub fn reset_search(&self) {
        self.update(|view| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            view.input.clear();
            view.clear_status();
            view.clear_result();
        });
    }

    /// Record the new input text and drop any stale status message.
    pub fn on_input_changed(&self, text: &str) {
        self.update(|view| {
            view.input = text.to_string();
            if !view.status.is_empty() {
                view.clear_status();
            }
        });
    }

    /// Geocode, then fetch conditions for the first candidate.
    async fn lookup(&self, query: &SearchQuery) -> Result<WeatherDisplay, LookupError> {
        let place = self
            .geocoder
            .geocode(query)
            .await?
            .ok_or_else(|| LookupError::CityNotFound(query.to_string()))?;

        let observation = self
            .conditions
            .current(&place)
            .await?
            .ok_or(LookupError::NoWeatherData)?;

        Ok(WeatherDisplay::project(&place, &observation, &self.language))
    }

    /// Mutate and render under one lock.
    fn update<R>(&self, mutate: impl FnOnce(&mut ViewState) -> R) -> R {
        let mut view = self.view.lock();
        let out = mutate(&mut view);
        self.surface.render(&view);
        out
    }

    /// Like [`update`](Self::update), unless `generation` has been superseded.
    fn update_if_current(&self, generation: u64, mutate: impl FnOnce(&mut ViewState)) {
        let mut view = self.view.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            return;
        }
        mutate(&mut view);
        self.surface.render(&view);
    }
}
