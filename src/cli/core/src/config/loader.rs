/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::types::SiteConfig;

pub const CONFIG_FILE: &str = "folio.toml";

/// A parsed config plus the directory its relative paths resolve against.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
  pub root: PathBuf,
  pub config: SiteConfig,
}

impl LoadedConfig {
  pub fn resolve(&self, rel: &str) -> PathBuf {
    self.root.join(rel)
  }

  pub fn shell_path(&self) -> PathBuf {
    self.resolve(&self.config.paths.shell)
  }

  pub fn pages_dir(&self) -> PathBuf {
    self.resolve(&self.config.paths.pages)
  }

  pub fn blog_dir(&self) -> PathBuf {
    self.resolve(&self.config.paths.blog)
  }

  pub fn projects_dir(&self) -> PathBuf {
    self.resolve(&self.config.paths.projects)
  }

  pub fn views_path(&self) -> PathBuf {
    self.resolve(&self.config.paths.views)
  }

  pub fn public_dir(&self) -> PathBuf {
    self.resolve(&self.config.paths.public)
  }

  pub fn home_data_path(&self) -> PathBuf {
    self.resolve(&self.config.paths.home_data)
  }
}

/// Walk upward from `start` until a directory containing `folio.toml` is found.
pub fn find_site_config(start: &Path) -> Result<PathBuf> {
  let mut dir = start.to_path_buf();
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("{CONFIG_FILE} not found in {} or any parent directory", start.display());
    }
  }
}

pub fn load_site_config(path: &Path) -> Result<LoadedConfig> {
  let raw =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: SiteConfig =
    toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
  config.validate().with_context(|| format!("invalid {}", path.display()))?;
  let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
  Ok(LoadedConfig { root, config })
}

/// Listen address. Flags win over `PORT`, which wins over the file.
pub fn bind_addr(
  config: &SiteConfig,
  host: Option<&str>,
  port: Option<u16>,
  env_port: Option<&str>,
) -> Result<String> {
  let host = host.unwrap_or(&config.server.host);
  let port = match (port, env_port) {
    (Some(port), _) => port,
    (None, Some(raw)) => {
      raw.trim().parse::<u16>().with_context(|| format!("PORT is not a valid port: {raw:?}"))?
    }
    (None, None) => config.server.port,
  };
  Ok(format!("{host}:{port}"))
}
