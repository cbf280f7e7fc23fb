/* src/server/adapter/axum/src/handler/mod.rs */

mod content;
mod page;
mod shell;

use std::sync::Arc;

use axum::Router;
use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, get_service, post};
use folio_server::{ContentApi, FolioParts, Shell};
use serde::Serialize;
use tower_http::services::ServeDir;

pub(crate) struct AppState {
  pub api: ContentApi,
  pub shell: Shell,
}

/// Client routes that all answer with the shell document.
const SHELL_ROUTES: [&str; 7] =
  ["/", "/home", "/about", "/blog", "/blog/{slug}", "/projects", "/projects/{slug}"];

pub(crate) fn build_router(parts: FolioParts) -> Router {
  let state = Arc::new(AppState { api: parts.api, shell: parts.shell });

  let mut router = Router::new()
    .route("/api/page", get(page::handle_page))
    .route("/api/pages", get(page::handle_pages))
    .route("/api/blog/list", get(content::handle_blog_list))
    .route("/api/blog/{slug}", get(content::handle_blog_post))
    .route("/api/blog/{slug}/view", post(content::handle_record_view))
    .route("/api/projects/list", get(content::handle_project_list))
    .route("/api/projects/{slug}", get(content::handle_project))
    .route("/api/views", get(content::handle_view_totals));

  for route in SHELL_ROUTES {
    router = router.route(route, get(shell::handle_shell));
  }

  // Static files under their own prefixes; misses fall through to a 404.
  for mount in parts.static_mounts {
    router = router.nest_service(&mount.prefix, get_service(ServeDir::new(mount.dir)));
  }

  router.fallback(shell::handle_not_found).with_state(state)
}

/// JSON success response. API payloads are never cached by the browser.
pub(super) fn json_ok<T: Serialize>(value: T) -> Response {
  let mut response = axum::Json(value).into_response();
  response.headers_mut().insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
  response
}
