use serde::Serialize;

use crate::domain::PredictionResult;

/// Body of a `/predict` response
///
/// A missing-columns outcome is reported as `{"error": "..."}` with a 200
/// status; every other failure goes through `ApiError`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Results { results: Vec<PredictionResult> },
    Error { error: String },
}

impl PredictResponse {
    pub fn results(results: Vec<PredictionResult>) -> Self {
        Self::Results { results }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }
}

/// Body of `GET /`
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_shape() {
        let json = serde_json::to_string(&PredictResponse::error("Missing columns: ['koi_teq']"))
            .unwrap();
        assert_eq!(json, r#"{"error":"Missing columns: ['koi_teq']"}"#);
    }

    #[test]
    fn test_empty_results_shape() {
        let json = serde_json::to_string(&PredictResponse::results(Vec::new())).unwrap();
        assert_eq!(json, r#"{"results":[]}"#);
    }
}
