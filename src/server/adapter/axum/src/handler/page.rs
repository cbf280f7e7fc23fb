/* src/server/adapter/axum/src/handler/page.rs */

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;

use super::{AppState, json_ok};
use crate::error::AxumError;

#[derive(Deserialize)]
pub(super) struct PageQuery {
  name: Option<String>,
}

pub(super) async fn handle_page(
  State(state): State<Arc<AppState>>,
  Query(query): Query<PageQuery>,
) -> Result<Response, AxumError> {
  let record = state.api.get_page(query.name.as_deref()).await?;
  Ok(json_ok(record))
}

/// Bulk preload: every page composed in parallel.
pub(super) async fn handle_pages(
  State(state): State<Arc<AppState>>,
) -> Result<Response, AxumError> {
  Ok(json_ok(state.api.get_all_pages().await?))
}
