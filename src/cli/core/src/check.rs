/* src/cli/core/src/check.rs */

use anyhow::{Result, bail};
use folio_engine::PageName;
use folio_server::HomeData;

use crate::config::LoadedConfig;
use crate::site::Site;
use crate::ui;

/// Problems found by `folio check`. Orphan view counts are reported but do
/// not fail the check; `serve` prunes them.
#[derive(Debug, Default)]
pub struct Report {
  pub errors: Vec<String>,
  pub warnings: Vec<String>,
}

pub async fn inspect(loaded: &LoadedConfig) -> Report {
  let site = Site::assemble(loaded);
  let mut report = Report::default();

  if !loaded.shell_path().is_file() {
    report.errors.push(format!("shell document missing: {}", loaded.shell_path().display()));
  }
  for page in PageName::ALL {
    let path = site.api.composer().fragment_path(page);
    if !path.is_file() {
      report.errors.push(format!("page fragment missing: {}", path.display()));
    }
  }
  if let Err(e) = HomeData::load(&loaded.home_data_path()).await {
    report.errors.push(format!("home data: {e}"));
  }
  if let Ok(unresolved) = site.api.composer().unresolved(PageName::Home).await {
    for path in unresolved {
      report.warnings.push(format!("home page placeholder {{{{{path}}}}} has no value"));
    }
  }
  for broken in site.content.find_broken().await {
    report.errors.push(format!("{}: {}", broken.source, broken.error));
  }
  for collision in site.content.find_collisions().await {
    report
      .errors
      .push(format!("slug '{}' claimed by {}", collision.slug, collision.sources.join(", ")));
  }
  let slugs = site.content.blog_slugs().await;
  for orphan in site.views.orphans(&slugs).await {
    report.warnings.push(format!("view count for unknown post '{orphan}'"));
  }
  report
}

pub async fn run_check(loaded: &LoadedConfig) -> Result<()> {
  ui::arrow(&format!("checking {}", loaded.root.display()));
  let report = inspect(loaded).await;
  for warning in &report.warnings {
    ui::detail(warning);
  }
  if report.errors.is_empty() {
    ui::ok("no problems found");
    return Ok(());
  }
  for error in &report.errors {
    ui::fail(error);
  }
  bail!("{} problem(s) found", report.errors.len());
}
