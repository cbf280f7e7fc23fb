/* src/cli/core/src/config/types.rs */

use anyhow::{Result, bail};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
  pub site: SiteSection,
  #[serde(default)]
  pub server: ServerSection,
  #[serde(default)]
  pub paths: PathsSection,
  #[serde(default)]
  pub views: ViewsSection,
  #[serde(default)]
  pub github: Option<GithubSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
  pub name: String,
  #[serde(default = "default_title_suffix")]
  pub title_suffix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
}

impl Default for ServerSection {
  fn default() -> Self {
    Self { host: default_host(), port: default_port() }
  }
}

/// Every path is relative to the directory holding `folio.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsSection {
  #[serde(default = "default_shell")]
  pub shell: String,
  #[serde(default = "default_pages")]
  pub pages: String,
  #[serde(default = "default_blog")]
  pub blog: String,
  #[serde(default = "default_projects")]
  pub projects: String,
  #[serde(default = "default_views")]
  pub views: String,
  #[serde(default = "default_public")]
  pub public: String,
  #[serde(default = "default_home_data")]
  pub home_data: String,
}

impl Default for PathsSection {
  fn default() -> Self {
    Self {
      shell: default_shell(),
      pages: default_pages(),
      blog: default_blog(),
      projects: default_projects(),
      views: default_views(),
      public: default_public(),
      home_data: default_home_data(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewsSection {
  #[serde(default = "default_cooldown_secs")]
  pub cooldown_secs: u64,
}

impl Default for ViewsSection {
  fn default() -> Self {
    Self { cooldown_secs: default_cooldown_secs() }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubSection {
  pub username: Option<String>,
  /// Name of the environment variable holding the API token.
  #[serde(default = "default_token_env")]
  pub token_env: String,
  /// API root for GitHub Enterprise; defaults to api.github.com.
  pub api_base: Option<String>,
}

impl GithubSection {
  pub fn username(&self) -> Option<&str> {
    self.username.as_deref().map(str::trim).filter(|u| !u.is_empty())
  }
}

impl SiteConfig {
  pub fn validate(&self) -> Result<()> {
    if self.site.name.trim().is_empty() {
      bail!("site.name must not be empty");
    }
    if self.server.port == 0 {
      bail!("server.port must be non-zero");
    }
    Ok(())
  }
}

fn default_title_suffix() -> String {
  "Portfolio".to_string()
}

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  8000
}

fn default_shell() -> String {
  "pages/shell.html".to_string()
}

fn default_pages() -> String {
  "pages".to_string()
}

fn default_blog() -> String {
  "content/blog".to_string()
}

fn default_projects() -> String {
  "content/projects".to_string()
}

fn default_views() -> String {
  "data/blog-views.json".to_string()
}

fn default_public() -> String {
  "public".to_string()
}

fn default_home_data() -> String {
  "pages/home/data.toml".to_string()
}

fn default_cooldown_secs() -> u64 {
  30
}

fn default_token_env() -> String {
  "GITHUB_TOKEN".to_string()
}
