/* src/server/adapter/axum/src/error.rs */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_engine::ErrorBody;
use folio_server::FolioError;
use tracing::error;

/// Newtype wrapper to implement `IntoResponse` for `FolioError`.
/// Required because Rust's orphan rule prevents `impl IntoResponse for FolioError`
/// when both types are foreign to this crate.
pub(crate) struct AxumError(pub FolioError);

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    let err = self.0;
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
      error!(code = err.code(), message = err.message(), "request failed");
    }
    (status, axum::Json(ErrorBody::new(err.code(), err.message()))).into_response()
  }
}

impl From<FolioError> for AxumError {
  fn from(err: FolioError) -> Self {
    Self(err)
  }
}
