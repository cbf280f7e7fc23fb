/* src/server/core/rust/src/shell.rs */

use std::path::Path;
use std::sync::Arc;

use folio_engine::escape_html;
use tracing::info;

use crate::errors::FolioError;

/// The single HTML document served for every client route. Read once at
/// startup; edits need a restart.
#[derive(Debug, Clone)]
pub struct Shell {
  html: Arc<str>,
}

impl Shell {
  pub async fn load(path: &Path) -> Result<Self, FolioError> {
    let html = tokio::fs::read_to_string(path).await.map_err(|e| {
      FolioError::io(format!("failed to read shell document {}: {e}", path.display()))
    })?;
    info!(path = %path.display(), bytes = html.len(), "shell loaded");
    Ok(Self::from_html(html))
  }

  pub fn from_html(html: impl Into<Arc<str>>) -> Self {
    Self { html: html.into() }
  }

  pub fn html(&self) -> &str {
    &self.html
  }
}

/// Standalone HTML page for errors outside the client-routed surface.
pub fn error_page(status: u16, reason: &str, message: &str) -> String {
  let heading = format!("{status} - {}", escape_html(reason));
  format!(
    "<!DOCTYPE html>\n<html>\n  <head>\n    <title>{heading}</title>\n    \
     <link rel=\"stylesheet\" href=\"/public/global.css\">\n  </head>\n  <body>\n    \
     <div class=\"container\">\n      <h1>{heading}</h1>\n      <p>{}</p>\n      \
     <a href=\"/\">&larr; Back to Home</a>\n    </div>\n  </body>\n</html>\n",
    escape_html(message)
  )
}
