/* src/client/router/rust/src/view.rs */

use folio_engine::PageName;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Placeholder origin for resolving relative hrefs against the location.
const LOCAL_ORIGIN: &str = "http://folio.invalid/";

/// What the content container currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
  Page(PageName),
  BlogPost(String),
  Project(String),
}

impl View {
  /// `/blog/<slug>` and `/projects/<slug>` are detail views; every other
  /// path must name a page.
  pub fn from_path(pathname: &str) -> Option<View> {
    let trimmed = if pathname.len() > 1 { pathname.trim_end_matches('/') } else { pathname };
    if let Some(slug) = detail_slug(trimmed, "/blog/") {
      return Some(View::BlogPost(slug));
    }
    if let Some(slug) = detail_slug(trimmed, "/projects/") {
      return Some(View::Project(slug));
    }
    PageName::from_path(trimmed).map(View::Page)
  }

  pub fn path(&self) -> String {
    match self {
      View::Page(page) => page.path().to_string(),
      View::BlogPost(slug) => format!("/blog/{slug}"),
      View::Project(slug) => format!("/projects/{slug}"),
    }
  }

  /// The list page a view belongs to, for nav highlighting and back links.
  pub fn owning_page(&self) -> PageName {
    match self {
      View::Page(page) => *page,
      View::BlogPost(_) => PageName::Blog,
      View::Project(_) => PageName::Projects,
    }
  }

  pub fn is_detail(&self) -> bool {
    !matches!(self, View::Page(_))
  }

  pub fn history_state(&self) -> HistoryState {
    match self {
      View::Page(PageName::Home) => HistoryState::Home,
      View::Page(PageName::About) => HistoryState::About,
      View::Page(PageName::Blog) => HistoryState::Blog,
      View::Page(PageName::Projects) => HistoryState::Projects,
      View::BlogPost(slug) => HistoryState::BlogPost { slug: slug.clone() },
      View::Project(slug) => HistoryState::ProjectDetail { slug: slug.clone() },
    }
  }
}

fn detail_slug(path: &str, prefix: &str) -> Option<String> {
  let slug = path.strip_prefix(prefix)?;
  (!slug.is_empty() && !slug.contains('/')).then(|| slug.to_string())
}

/// Payload stored with each history entry: `{"page":"home"}`,
/// `{"page":"blog-post","slug":"..."}` or `{"page":"project-detail","slug":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum HistoryState {
  Home,
  About,
  Blog,
  Projects,
  BlogPost { slug: String },
  ProjectDetail { slug: String },
}

impl HistoryState {
  pub fn from_value(value: &Value) -> Option<Self> {
    serde_json::from_value(value.clone()).ok()
  }

  pub fn to_value(&self) -> Value {
    serde_json::to_value(self).unwrap_or(Value::Null)
  }

  pub fn view(&self) -> View {
    match self {
      HistoryState::Home => View::Page(PageName::Home),
      HistoryState::About => View::Page(PageName::About),
      HistoryState::Blog => View::Page(PageName::Blog),
      HistoryState::Projects => View::Page(PageName::Projects),
      HistoryState::BlogPost { slug } => View::BlogPost(slug.clone()),
      HistoryState::ProjectDetail { slug } => View::Project(slug.clone()),
    }
  }
}

/// Resolve `href` against `location`. `None` for other origins and
/// unparsable input.
pub fn resolve(location: &str, href: &str) -> Option<Url> {
  let origin = Url::parse(LOCAL_ORIGIN).ok()?;
  let base = origin.join(location).ok()?;
  let target = base.join(href).ok()?;
  (target.origin() == origin.origin()).then_some(target)
}

pub fn pathname(location: &str) -> String {
  resolve(location, location).map(|u| u.path().to_string()).unwrap_or_else(|| "/".to_string())
}

/// Positive `?page=N` from `location`, if any.
pub fn query_page(location: &str) -> Option<usize> {
  let url = resolve(location, location)?;
  url
    .query_pairs()
    .find(|(key, _)| key == "page")
    .and_then(|(_, value)| value.parse::<usize>().ok())
    .filter(|page| *page > 0)
}

/// `location` with its `page` query parameter set to `page`.
pub fn with_query_page(location: &str, page: usize) -> String {
  let Some(mut url) = resolve(location, location) else {
    return format!("{location}?page={page}");
  };
  let others: Vec<(String, String)> =
    url.query_pairs().filter(|(k, _)| k != "page").map(|(k, v)| (k.into(), v.into())).collect();
  {
    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    pairs.extend_pairs(others);
    pairs.append_pair("page", &page.to_string());
  }
  match url.query() {
    Some(query) => format!("{}?{query}", url.path()),
    None => url.path().to_string(),
  }
}
