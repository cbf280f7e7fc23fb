/* src/server/core/rust/src/composer.rs */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_engine::{PageName, PageRecord, PagesResponse};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::content::ContentStore;
use crate::errors::FolioError;
use crate::metrics::CommitSource;
use crate::views::ViewStore;

const FRAGMENT_FILE: &str = "content.html";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Author {
  pub name: String,
  pub first_name: String,
  pub email: String,
  pub photo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Professional {
  pub title: String,
  pub intro: String,
  pub bio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metrics {
  /// Fallback when the commit source fails or reports zero.
  pub github_commits: u64,
  pub blog_post_count: u64,
  pub total_views: u64,
}

/// Data bound into the home fragment's `{{...}}` placeholders. Loaded from a
/// TOML file; the `metrics` table is overwritten at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeData {
  pub author: Author,
  pub professional: Professional,
  pub metrics: Metrics,
}

impl HomeData {
  pub async fn load(path: &Path) -> Result<Self, FolioError> {
    let raw = tokio::fs::read_to_string(path).await?;
    toml::from_str(&raw)
      .map_err(|e| FolioError::validation(format!("invalid {}: {e}", path.display())))
  }
}

/// Turns a `PageName` into a `PageRecord`: reads the page fragment and,
/// for data-bound pages, fills in placeholders.
#[derive(Clone)]
pub struct PageComposer {
  pages_dir: PathBuf,
  home_data: PathBuf,
  title_suffix: String,
  content: ContentStore,
  views: Arc<ViewStore>,
  commits: Arc<dyn CommitSource>,
}

impl PageComposer {
  pub fn new(
    pages_dir: impl Into<PathBuf>,
    home_data: impl Into<PathBuf>,
    content: ContentStore,
    views: Arc<ViewStore>,
    commits: Arc<dyn CommitSource>,
  ) -> Self {
    Self {
      pages_dir: pages_dir.into(),
      home_data: home_data.into(),
      title_suffix: "Portfolio".to_string(),
      content,
      views,
      commits,
    }
  }

  pub fn title_suffix(mut self, suffix: impl Into<String>) -> Self {
    self.title_suffix = suffix.into();
    self
  }

  pub fn suffix(&self) -> &str {
    &self.title_suffix
  }

  pub fn fragment_path(&self, name: PageName) -> PathBuf {
    self.pages_dir.join(name.as_str()).join(FRAGMENT_FILE)
  }

  pub async fn compose(&self, name: PageName) -> Result<PageRecord, FolioError> {
    let path = self.fragment_path(name);
    let fragment = tokio::fs::read_to_string(&path).await.map_err(|e| {
      if e.kind() == std::io::ErrorKind::NotFound {
        FolioError::not_found(format!("Page '{name}' not found"))
      } else {
        warn!(path = %path.display(), error = %e, "failed to read page fragment");
        FolioError::from(e)
      }
    })?;

    let content = if name.has_data_binding() {
      let data = self.home_data().await;
      let value = serde_json::to_value(&data).map_err(|e| FolioError::internal(e.to_string()))?;
      let html = folio_injector::inject(&fragment, &value);
      let unresolved = folio_injector::placeholders(&html);
      if !unresolved.is_empty() {
        warn!(page = %name, ?unresolved, "placeholders left unresolved");
      }
      html
    } else {
      fragment
    };

    Ok(PageRecord {
      content: content.trim().to_string(),
      title: name.title(&self.title_suffix),
      active_page: name,
      page_css: name.stylesheet(),
    })
  }

  /// Placeholder paths that survive composition of `name`.
  pub async fn unresolved(&self, name: PageName) -> Result<Vec<String>, FolioError> {
    let record = self.compose(name).await?;
    Ok(folio_injector::placeholders(&record.content))
  }

  /// Every page composed concurrently. The compositions are independent;
  /// the first failure is returned.
  pub async fn compose_all(&self) -> Result<PagesResponse, FolioError> {
    let mut join_set = JoinSet::new();
    for name in PageName::ALL {
      let composer = self.clone();
      join_set.spawn(async move {
        let record = composer.compose(name).await?;
        Ok::<(PageName, PageRecord), FolioError>((name, record))
      });
    }

    let mut response = PagesResponse::default();
    while let Some(result) = join_set.join_next().await {
      let (name, record) = result.map_err(|e| FolioError::internal(e.to_string()))??;
      response.pages.insert(name, record);
    }
    Ok(response)
  }

  /// Static home data merged with live metrics.
  pub async fn home_data(&self) -> HomeData {
    let mut data = match HomeData::load(&self.home_data).await {
      Ok(data) => data,
      Err(e) => {
        warn!(path = %self.home_data.display(), error = %e, "home data unavailable, using defaults");
        HomeData::default()
      }
    };

    let (commits, post_count, totals) = tokio::join!(
      self.commits.monthly_commits(),
      self.content.blog_post_count(),
      self.views.totals(),
    );

    match commits {
      Ok(count) if count > 0 => data.metrics.github_commits = count,
      Ok(_) => debug!("commit source reported zero, keeping configured value"),
      Err(e) => warn!(error = %e, "commit count unavailable, keeping configured value"),
    }
    data.metrics.blog_post_count = post_count as u64;
    data.metrics.total_views = totals.total;
    data
  }
}
