//! `POST /predict`

use std::time::Instant;

use axum::{extract::State, Json};
use tracing::{error, info};

use super::state::AppState;
use super::types::{ApiError, CsvUpload, PredictResponse};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_predict_request, PredictOutcome};

/// Classify every row of the uploaded CSV table
pub async fn predict(
    State(state): State<AppState>,
    upload: Result<CsvUpload, ApiError>,
) -> Result<Json<PredictResponse>, ApiError> {
    let start = Instant::now();

    let upload = match upload {
        Ok(upload) => upload,
        Err(e) => {
            record_predict_request(PredictOutcome::InvalidUpload, 0, start.elapsed());
            return Err(e);
        }
    };

    match state.prediction_service.predict_csv(&upload.data) {
        Ok(results) => {
            info!(
                file_name = ?upload.file_name,
                rows = results.len(),
                "Prediction completed"
            );
            record_predict_request(PredictOutcome::Success, results.len(), start.elapsed());

            Ok(Json(PredictResponse::results(results)))
        }
        Err(e @ DomainError::MissingColumns { .. }) => {
            record_predict_request(PredictOutcome::MissingColumns, 0, start.elapsed());

            Ok(Json(PredictResponse::error(e.to_string())))
        }
        Err(e @ DomainError::Parse { .. }) => {
            record_predict_request(PredictOutcome::InvalidUpload, 0, start.elapsed());

            Err(e.into())
        }
        Err(e) => {
            error!(error = %e, "Prediction failed");
            record_predict_request(PredictOutcome::Failed, 0, start.elapsed());

            Err(e.into())
        }
    }
}
