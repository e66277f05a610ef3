//! Application state shared by the handlers.

use std::sync::Arc;

use cinebus_core::{CityModel, Screening};

/// Built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<CityModel>,
    /// Billboard sorted by start time
    pub screenings: Arc<Vec<Screening>>,
}

impl AppState {
    pub fn new(model: CityModel, screenings: Vec<Screening>) -> Self {
        Self {
            model: Arc::new(model),
            screenings: Arc::new(screenings),
        }
    }
}
