//! Prediction service - CSV upload to per-row predictions

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{
    engineer_features, ArtifactStore, ClassCatalog, DomainError, InferencePipeline,
    ObservationTable, PredictionResult,
};

/// Prediction service shared by the HTTP handlers and the CLI
#[derive(Debug, Clone)]
pub struct PredictionService {
    store: Arc<ArtifactStore>,
}

impl PredictionService {
    /// Create a new PredictionService over loaded artifacts
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }

    pub fn catalog(&self) -> &ClassCatalog {
        self.store.catalog()
    }

    /// Parse an uploaded table, check its columns and classify every row.
    ///
    /// Returns `DomainError::MissingColumns` before any inference when a
    /// required column is absent.
    pub fn predict_csv(&self, data: &[u8]) -> Result<Vec<PredictionResult>, DomainError> {
        let table = ObservationTable::from_csv(data)?;

        let missing = table.missing_columns();
        if !missing.is_empty() {
            warn!(missing = ?missing, "Upload is missing required columns");
            return Err(DomainError::missing_columns(missing));
        }

        let rows = table.raw_rows()?;
        debug!(rows = rows.len(), "Parsed observation table");

        let features = engineer_features(&rows);
        InferencePipeline::new(&self.store).run(&features)
    }
}
