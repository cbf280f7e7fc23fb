/* src/server/core/rust/src/api.rs */

//! The content API: every operation the HTTP surface exposes, independent of
//! any web framework. Errors come back as `FolioError`; adapters map them to
//! status codes.

use std::sync::Arc;

use folio_engine::{
  BlogListResponse, DetailResponse, PageName, PageRecord, PagesResponse, ProjectListResponse,
  ViewResponse, ViewTotalsResponse,
};

use crate::composer::PageComposer;
use crate::content::{ContentStore, Entry};
use crate::errors::FolioError;
use crate::views::ViewCounter;

/// Parse a raw page name. Runs before any composition work.
pub fn parse_page_name(raw: Option<&str>) -> Result<PageName, FolioError> {
  let raw = raw.ok_or_else(|| FolioError::validation("Missing page name"))?;
  raw.parse::<PageName>().map_err(|e| FolioError::validation(e.to_string()))
}

pub fn wrap_markdown(html: &str) -> String {
  format!("<div class=\"markdown-content\">{html}</div>")
}

#[derive(Clone)]
pub struct ContentApi {
  composer: PageComposer,
  content: ContentStore,
  views: Arc<ViewCounter>,
}

impl ContentApi {
  pub fn new(composer: PageComposer, content: ContentStore, views: Arc<ViewCounter>) -> Self {
    Self { composer, content, views }
  }

  pub fn composer(&self) -> &PageComposer {
    &self.composer
  }

  pub fn content(&self) -> &ContentStore {
    &self.content
  }

  pub fn views(&self) -> &Arc<ViewCounter> {
    &self.views
  }

  pub async fn get_page(&self, name: Option<&str>) -> Result<PageRecord, FolioError> {
    let name = parse_page_name(name)?;
    self.composer.compose(name).await
  }

  pub async fn get_all_pages(&self) -> Result<PagesResponse, FolioError> {
    self.composer.compose_all().await
  }

  pub async fn list_blog_posts(&self) -> BlogListResponse {
    BlogListResponse { posts: self.content.blog_posts().await }
  }

  pub async fn get_blog_post(&self, slug: &str) -> Result<DetailResponse, FolioError> {
    require_slug(slug)?;
    Ok(detail(self.content.blog_post(slug).await?))
  }

  pub async fn list_projects(&self) -> ProjectListResponse {
    ProjectListResponse { projects: self.content.projects().await }
  }

  pub async fn get_project(&self, slug: &str) -> Result<DetailResponse, FolioError> {
    require_slug(slug)?;
    Ok(detail(self.content.project(slug).await?))
  }

  /// Count a view of an existing post, subject to the cooldown filter.
  pub async fn record_view(&self, slug: &str, client: &str) -> Result<ViewResponse, FolioError> {
    require_slug(slug)?;
    self.content.blog_post(slug).await?;
    Ok(self.views.record_view(slug, client).await)
  }

  pub async fn view_totals(&self) -> ViewTotalsResponse {
    self.views.store().totals().await
  }
}

fn require_slug(slug: &str) -> Result<(), FolioError> {
  if slug.trim().is_empty() {
    return Err(FolioError::not_found("Missing slug"));
  }
  Ok(())
}

fn detail(entry: Entry) -> DetailResponse {
  DetailResponse {
    slug: entry.slug,
    html: wrap_markdown(&entry.document.html),
    metadata: entry.document.metadata,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::metrics::StaticCommits;
  use crate::views::{CooldownTable, ViewStore};
  use std::fs;
  use std::path::Path;

  fn api(root: &Path) -> ContentApi {
    let content = ContentStore::new(root.join("blog"), root.join("projects"));
    let store = Arc::new(ViewStore::new(root.join("views.json")));
    let composer = PageComposer::new(
      root.join("pages"),
      root.join("pages/home/data.toml"),
      content.clone(),
      store.clone(),
      Arc::new(StaticCommits(0)),
    );
    ContentApi::new(composer, content, Arc::new(ViewCounter::new(store, CooldownTable::default())))
  }

  fn fixture() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("blog")).unwrap();
    fs::create_dir_all(root.join("projects/tool")).unwrap();
    fs::create_dir_all(root.join("pages/about")).unwrap();
    fs::write(root.join("pages/about/content.html"), "<p>about</p>").unwrap();
    fs::write(
      root.join("blog/hello-world.md"),
      "---\ntitle: Hello\ndate: 2024-01-01\n---\nHi",
    )
    .unwrap();
    fs::write(
      root.join("blog/second-post.md"),
      "---\ntitle: Second\ndate: 2024-02-01\n---\nAgain",
    )
    .unwrap();
    fs::write(root.join("projects/tool/content.md"), "---\ntitle: Tool\n---\nBuilt it").unwrap();
    tmp
  }

  #[test]
  fn page_name_validation() {
    assert_eq!(parse_page_name(Some("blog")).unwrap(), PageName::Blog);
    assert_eq!(parse_page_name(Some("admin")).unwrap_err().status(), 400);
    assert_eq!(parse_page_name(None).unwrap_err().status(), 400);
  }

  #[tokio::test]
  async fn invalid_page_never_reaches_composer() {
    let tmp = tempfile::tempdir().unwrap();
    // No pages directory at all: a composer call would be NOT_FOUND, not 400.
    let err = api(tmp.path()).get_page(Some("../etc")).await.unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
  }

  #[tokio::test]
  async fn sample_blog_scenario() {
    let tmp = fixture();
    let api = api(tmp.path());

    let list = api.list_blog_posts().await;
    let slugs: Vec<&str> = list.posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, ["second-post", "hello-world"]);

    let post = api.get_blog_post("hello-world").await.unwrap();
    assert_eq!(post.metadata.title, "Hello");
    assert!(post.html.starts_with("<div class=\"markdown-content\">"));
    assert!(post.html.contains("<p>Hi</p>"));

    assert_eq!(api.get_blog_post("missing").await.unwrap_err().status(), 404);
  }

  #[tokio::test]
  async fn project_detail() {
    let tmp = fixture();
    let api = api(tmp.path());
    assert_eq!(api.list_projects().await.projects.len(), 1);
    let project = api.get_project("tool").await.unwrap();
    assert_eq!(project.slug, "tool");
    assert!(api.get_project("").await.unwrap_err().is_not_found());
  }

  #[tokio::test]
  async fn views_require_existing_post() {
    let tmp = fixture();
    let api = api(tmp.path());
    assert!(api.record_view("nope", "1.2.3.4").await.unwrap_err().is_not_found());

    let first = api.record_view("hello-world", "1.2.3.4").await.unwrap();
    let second = api.record_view("hello-world", "1.2.3.4").await.unwrap();
    assert!(first.counted && !second.counted);
    assert_eq!(second.views, 1);
    assert_eq!(api.view_totals().await.total, 1);
  }

  #[tokio::test]
  async fn get_page_composes_fragment() {
    let tmp = fixture();
    let record = api(tmp.path()).get_page(Some("about")).await.unwrap();
    assert_eq!(record.content, "<p>about</p>");
  }
}
