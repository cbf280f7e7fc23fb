/* src/server/core/rust/src/server.rs */

use std::path::PathBuf;

use crate::api::ContentApi;
use crate::shell::Shell;

/// A URL prefix served straight from a directory on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticMount {
  pub prefix: String,
  pub dir: PathBuf,
}

/// Framework-agnostic parts extracted from `FolioServer`.
/// Adapter crates consume this to build framework-specific routers.
pub struct FolioParts {
  pub api: ContentApi,
  pub shell: Shell,
  pub static_mounts: Vec<StaticMount>,
}

pub struct FolioServer {
  api: ContentApi,
  shell: Shell,
  static_mounts: Vec<StaticMount>,
}

impl FolioServer {
  pub fn new(api: ContentApi, shell: Shell) -> Self {
    Self { api, shell, static_mounts: Vec::new() }
  }

  /// Serve `dir` under `prefix` (e.g. `/public`). Later mounts for the same
  /// prefix replace earlier ones.
  pub fn static_dir(mut self, prefix: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
    let prefix = normalize_prefix(&prefix.into());
    self.static_mounts.retain(|m| m.prefix != prefix);
    self.static_mounts.push(StaticMount { prefix, dir: dir.into() });
    self
  }

  /// Consume the builder, returning framework-agnostic parts for an adapter.
  pub fn into_parts(self) -> FolioParts {
    FolioParts { api: self.api, shell: self.shell, static_mounts: self.static_mounts }
  }
}

fn normalize_prefix(prefix: &str) -> String {
  format!("/{}", prefix.trim_matches('/'))
}
