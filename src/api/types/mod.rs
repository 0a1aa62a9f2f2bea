//! Request and response types for the HTTP API

pub mod error;
pub mod prediction;
pub mod upload;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use prediction::{PredictResponse, RootResponse};
pub use upload::{CsvUpload, FILE_FIELD};
