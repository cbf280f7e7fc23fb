/* src/cli/core/src/serve.rs */

use anyhow::{Context, Result, anyhow};
use folio_server::{FolioServer, Shell};
use folio_server_axum::IntoAxumRouter;

use crate::config::{LoadedConfig, bind_addr};
use crate::site::Site;

pub async fn run_serve(loaded: &LoadedConfig, host: Option<&str>, port: Option<u16>) -> Result<()> {
  let env_port = std::env::var("PORT").ok();
  let addr = bind_addr(&loaded.config, host, port, env_port.as_deref())?;

  let shell = Shell::load(&loaded.shell_path())
    .await
    .with_context(|| format!("failed to load shell from {}", loaded.shell_path().display()))?;
  let site = Site::assemble(loaded);
  site.reconcile().await?;

  FolioServer::new(site.api, shell)
    .static_dir("/public", loaded.public_dir())
    .static_dir("/pages", loaded.pages_dir())
    .serve(&addr)
    .await
    .map_err(|e| anyhow!("server error: {e}"))
}
