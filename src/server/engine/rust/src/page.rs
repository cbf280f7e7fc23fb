/* src/server/engine/rust/src/page.rs */

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level site sections. The set is closed: anything else is rejected
/// before it reaches page composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageName {
  Home,
  About,
  Blog,
  Projects,
}

impl PageName {
  pub const ALL: [PageName; 4] = [PageName::Home, PageName::About, PageName::Blog, PageName::Projects];

  pub fn as_str(self) -> &'static str {
    match self {
      PageName::Home => "home",
      PageName::About => "about",
      PageName::Blog => "blog",
      PageName::Projects => "projects",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      PageName::Home => "Home",
      PageName::About => "About",
      PageName::Blog => "Blog",
      PageName::Projects => "Projects",
    }
  }

  /// Canonical URL path. Home lives at `/`, everything else at `/<name>`.
  pub fn path(self) -> &'static str {
    match self {
      PageName::Home => "/",
      PageName::About => "/about",
      PageName::Blog => "/blog",
      PageName::Projects => "/projects",
    }
  }

  /// Resolve a pathname to a page. `/` and `/home` are equivalent; a single
  /// trailing slash is ignored.
  pub fn from_path(pathname: &str) -> Option<PageName> {
    let trimmed = if pathname.len() > 1 { pathname.trim_end_matches('/') } else { pathname };
    match trimmed {
      "/" | "" | "/home" => Some(PageName::Home),
      other => other.strip_prefix('/').and_then(|name| name.parse().ok()),
    }
  }

  pub fn title(self, suffix: &str) -> String {
    format!("{} - {suffix}", self.label())
  }

  pub fn stylesheet(self) -> String {
    format!("/pages/{}/styles.css", self.as_str())
  }

  /// Pages whose fragment carries `{{...}}` placeholders bound to site data.
  pub fn has_data_binding(self) -> bool {
    matches!(self, PageName::Home)
  }
}

impl fmt::Display for PageName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPage(pub String);

impl fmt::Display for UnknownPage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "unknown page '{}'", self.0)
  }
}

impl std::error::Error for UnknownPage {}

impl FromStr for PageName {
  type Err = UnknownPage;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "home" => Ok(PageName::Home),
      "about" => Ok(PageName::About),
      "blog" => Ok(PageName::Blog),
      "projects" => Ok(PageName::Projects),
      other => Err(UnknownPage(other.to_string())),
    }
  }
}

/// A composed page fragment plus the metadata the shell needs to display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
  pub content: String,
  pub title: String,
  #[serde(rename = "activePage")]
  pub active_page: PageName,
  #[serde(rename = "pageCSS")]
  pub page_css: String,
}

/// Body of the bulk preload endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagesResponse {
  pub pages: BTreeMap<PageName, PageRecord>,
}
