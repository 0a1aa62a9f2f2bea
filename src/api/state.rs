//! Application state shared by the handlers

use std::sync::Arc;

use crate::infrastructure::services::PredictionService;

/// Read-only state cloned into every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub prediction_service: Arc<PredictionService>,
    pub banner: Arc<str>,
}

impl AppState {
    pub fn new(prediction_service: PredictionService, banner: impl Into<Arc<str>>) -> Self {
        Self {
            prediction_service: Arc::new(prediction_service),
            banner: banner.into(),
        }
    }
}
