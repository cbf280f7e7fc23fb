/* src/server/adapter/axum/src/handler/content.rs */

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Path, Request, State};
use axum::response::Response;
use tracing::debug;

use super::{AppState, json_ok};
use crate::error::AxumError;

const UNKNOWN_CLIENT: &str = "unknown";

pub(super) async fn handle_blog_list(State(state): State<Arc<AppState>>) -> Response {
  json_ok(state.api.list_blog_posts().await)
}

pub(super) async fn handle_blog_post(
  State(state): State<Arc<AppState>>,
  Path(slug): Path<String>,
) -> Result<Response, AxumError> {
  Ok(json_ok(state.api.get_blog_post(&slug).await?))
}

pub(super) async fn handle_project_list(State(state): State<Arc<AppState>>) -> Response {
  json_ok(state.api.list_projects().await)
}

pub(super) async fn handle_project(
  State(state): State<Arc<AppState>>,
  Path(slug): Path<String>,
) -> Result<Response, AxumError> {
  Ok(json_ok(state.api.get_project(&slug).await?))
}

pub(super) async fn handle_record_view(
  State(state): State<Arc<AppState>>,
  Path(slug): Path<String>,
  req: Request,
) -> Result<Response, AxumError> {
  let client = client_identity(&req);
  let result = state.api.record_view(&slug, &client).await?;
  debug!(slug, client, counted = result.counted, views = result.views, "view recorded");
  Ok(json_ok(result))
}

pub(super) async fn handle_view_totals(State(state): State<Arc<AppState>>) -> Response {
  json_ok(state.api.view_totals().await)
}

/// First `X-Forwarded-For` hop, else the peer address, else `unknown`.
fn client_identity(req: &Request) -> String {
  let forwarded = req
    .headers()
    .get("x-forwarded-for")
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.split(',').next())
    .map(str::trim)
    .filter(|v| !v.is_empty());
  if let Some(ip) = forwarded {
    return ip.to_string();
  }
  req
    .extensions()
    .get::<ConnectInfo<SocketAddr>>()
    .map(|ConnectInfo(addr)| addr.ip().to_string())
    .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
