/* src/server/adapter/axum/src/handler/shell.rs */

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use folio_server::{FolioError, error_page};

use super::AppState;
use crate::error::AxumError;

pub(super) async fn handle_shell(State(state): State<Arc<AppState>>) -> Html<String> {
  Html(state.shell.html().to_string())
}

/// JSON for unknown API routes, an HTML page for everything else.
pub(super) async fn handle_not_found(uri: Uri) -> Response {
  let path = uri.path();
  if path == "/api" || path.starts_with("/api/") {
    return AxumError(FolioError::not_found(format!("No route for {path}"))).into_response();
  }
  let body = error_page(404, "Not Found", &format!("No page at {path}"));
  (StatusCode::NOT_FOUND, Html(body)).into_response()
}
