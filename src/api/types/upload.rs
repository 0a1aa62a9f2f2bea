//! Multipart extractor for the uploaded observation table

use axum::extract::{multipart::MultipartError, FromRequest, Multipart, Request};
use bytes::Bytes;
use tracing::debug;

use super::error::{ApiError, ApiErrorType};

/// Name of the multipart field carrying the CSV table
pub const FILE_FIELD: &str = "file";

/// Contents of the `file` field of a multipart form
///
/// Rejections are returned in the API error envelope. A body that is not a
/// multipart form, or a form without a `file` field, is a 422.
#[derive(Debug, Clone)]
pub struct CsvUpload {
    pub file_name: Option<String>,
    pub data: Bytes,
}

impl<S> FromRequest<S> for CsvUpload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await.map_err(|rejection| {
            ApiError::unprocessable(rejection.body_text())
                .with_param(FILE_FIELD)
                .with_code("invalid_multipart")
        })?;

        while let Some(field) = multipart.next_field().await.map_err(field_error)? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            let file_name = field.file_name().map(str::to_string);
            let data = field.bytes().await.map_err(field_error)?;
            debug!(file_name = ?file_name, bytes = data.len(), "Received upload");

            return Ok(Self { file_name, data });
        }

        Err(ApiError::unprocessable("Field required")
            .with_param(FILE_FIELD)
            .with_code("missing_field"))
    }
}

fn field_error(err: MultipartError) -> ApiError {
    ApiError::new(err.status(), ApiErrorType::InvalidRequestError, err.body_text())
        .with_param(FILE_FIELD)
}
