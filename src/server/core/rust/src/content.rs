/* src/server/core/rust/src/content.rs */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use folio_engine::{BlogPostSummary, ProjectSummary};
use tracing::warn;

use crate::errors::FolioError;
use crate::markdown::{Document, parse_document};
use crate::slug::{is_markdown, slug_from_filename};

const PROJECT_FILE: &str = "content.md";
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%d %B %Y"];

/// A parsed post or project together with the slug it is served under.
#[derive(Debug)]
pub struct Entry {
  pub slug: String,
  pub document: Document,
}

/// Two or more source files that normalize to the same slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCollision {
  pub slug: String,
  pub sources: Vec<String>,
}

/// A source file that failed to parse.
#[derive(Debug, Clone)]
pub struct BrokenEntry {
  pub source: String,
  pub error: FolioError,
}

/// Read-only view over the blog and projects directories. Nothing is cached:
/// every call re-reads disk so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct ContentStore {
  blog_dir: PathBuf,
  projects_dir: PathBuf,
}

impl ContentStore {
  pub fn new(blog_dir: impl Into<PathBuf>, projects_dir: impl Into<PathBuf>) -> Self {
    Self { blog_dir: blog_dir.into(), projects_dir: projects_dir.into() }
  }

  pub fn blog_dir(&self) -> &Path {
    &self.blog_dir
  }

  pub fn projects_dir(&self) -> &Path {
    &self.projects_dir
  }

  /// Newest first. Unreadable directories yield an empty list; unparsable
  /// or undated posts are skipped. Dates that do not parse sort last.
  pub async fn blog_posts(&self) -> Vec<BlogPostSummary> {
    let mut posts: Vec<BlogPostSummary> = self
      .load_blog_entries()
      .await
      .into_iter()
      .filter_map(|entry| {
        let meta = entry.document.metadata;
        let date = meta.date?;
        Some(BlogPostSummary { slug: entry.slug, title: meta.title, date, excerpt: meta.excerpt })
      })
      .collect();
    posts.sort_by_cached_key(|p| std::cmp::Reverse(date_key(&p.date)));
    posts
  }

  pub async fn blog_post_count(&self) -> usize {
    self.blog_posts().await.len()
  }

  pub async fn blog_post(&self, slug: &str) -> Result<Entry, FolioError> {
    self
      .load_blog_entries()
      .await
      .into_iter()
      .find(|e| e.slug == slug && e.document.metadata.date.is_some())
      .ok_or_else(|| FolioError::not_found("Blog post not found"))
  }

  /// Sorted newest first where both sides carry a date; undated projects
  /// keep their directory order relative to their neighbours.
  pub async fn projects(&self) -> Vec<ProjectSummary> {
    let mut projects: Vec<ProjectSummary> = self
      .load_project_entries()
      .await
      .into_iter()
      .map(|entry| {
        let meta = entry.document.metadata;
        ProjectSummary {
          slug: entry.slug,
          title: meta.title,
          description: meta.description,
          image: meta.image,
          date: meta.date,
        }
      })
      .collect();
    sort_dated_stable(&mut projects);
    projects
  }

  pub async fn project(&self, slug: &str) -> Result<Entry, FolioError> {
    self
      .load_project_entries()
      .await
      .into_iter()
      .find(|e| e.slug == slug)
      .ok_or_else(|| FolioError::not_found("Project not found"))
  }

  /// Slugs of every dated blog post, used to reconcile the view counts.
  pub async fn blog_slugs(&self) -> Vec<String> {
    self.blog_posts().await.into_iter().map(|p| p.slug).collect()
  }

  /// Files (posts) and directories (projects) that share a slug.
  pub async fn find_collisions(&self) -> Vec<SlugCollision> {
    let mut found = collisions(list_markdown_files(&self.blog_dir).await);
    found.extend(collisions(list_project_dirs(&self.projects_dir).await));
    found
  }

  /// Every post or project whose frontmatter does not parse.
  pub async fn find_broken(&self) -> Vec<BrokenEntry> {
    let mut broken = Vec::new();
    for name in list_markdown_files(&self.blog_dir).await {
      let path = self.blog_dir.join(&name);
      match read_document(&path).await {
        Ok(doc) if doc.metadata.date.is_none() => broken.push(BrokenEntry {
          source: path.display().to_string(),
          error: FolioError::validation("frontmatter must have a date"),
        }),
        Ok(_) => {}
        Err(error) => broken.push(BrokenEntry { source: path.display().to_string(), error }),
      }
    }
    for name in list_project_dirs(&self.projects_dir).await {
      let path = self.projects_dir.join(&name).join(PROJECT_FILE);
      if let Err(error) = read_document(&path).await {
        broken.push(BrokenEntry { source: path.display().to_string(), error });
      }
    }
    broken
  }

  async fn load_blog_entries(&self) -> Vec<Entry> {
    let mut entries: Vec<Entry> = Vec::new();
    for name in list_markdown_files(&self.blog_dir).await {
      let path = self.blog_dir.join(&name);
      let slug = slug_from_filename(&name);
      match read_document(&path).await {
        Ok(document) => push_unshadowed(&mut entries, Entry { slug, document }, &name),
        Err(e) => warn!(path = %path.display(), error = %e, "skipping blog post"),
      }
    }
    entries
  }

  async fn load_project_entries(&self) -> Vec<Entry> {
    let mut entries: Vec<Entry> = Vec::new();
    for name in list_project_dirs(&self.projects_dir).await {
      let path = self.projects_dir.join(&name).join(PROJECT_FILE);
      let slug = slug_from_filename(&name);
      match read_document(&path).await {
        Ok(document) => push_unshadowed(&mut entries, Entry { slug, document }, &name),
        Err(e) => warn!(path = %path.display(), error = %e, "skipping project"),
      }
    }
    entries
  }
}

/// First source in sorted order owns a slug; later ones are dropped.
fn push_unshadowed(entries: &mut Vec<Entry>, entry: Entry, source: &str) {
  if entries.iter().any(|e| e.slug == entry.slug) {
    warn!(slug = %entry.slug, source, "slug already taken, ignoring");
    return;
  }
  entries.push(entry);
}

fn collisions(names: Vec<String>) -> Vec<SlugCollision> {
  let mut by_slug: BTreeMap<String, Vec<String>> = BTreeMap::new();
  for name in names {
    by_slug.entry(slug_from_filename(&name)).or_default().push(name);
  }
  by_slug
    .into_iter()
    .filter(|(_, sources)| sources.len() > 1)
    .map(|(slug, sources)| SlugCollision { slug, sources })
    .collect()
}

fn sort_dated_stable(projects: &mut [ProjectSummary]) {
  // Insertion sort over adjacent pairs. An undated item compares equal to
  // everything, so nothing moves past it.
  for i in 1..projects.len() {
    let mut j = i;
    while j > 0 {
      let swap = match (&projects[j - 1].date, &projects[j].date) {
        (Some(prev), Some(cur)) => date_key(cur) > date_key(prev),
        _ => false,
      };
      if !swap {
        break;
      }
      projects.swap(j - 1, j);
      j -= 1;
    }
  }
}

/// Sort key for a frontmatter date: RFC 3339, then the calendar formats in
/// `DATE_FORMATS`. `None` when nothing matches.
pub(crate) fn date_key(raw: &str) -> Option<NaiveDateTime> {
  let raw = raw.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.naive_utc());
  }
  if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
    return Some(dt);
  }
  DATE_FORMATS
    .iter()
    .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    .map(|d| d.and_time(NaiveTime::MIN))
}

async fn read_document(path: &Path) -> Result<Document, FolioError> {
  let source = tokio::fs::read_to_string(path).await?;
  parse_document(&source)
}

async fn list_markdown_files(dir: &Path) -> Vec<String> {
  let mut names = list_dir(dir, |ft, name| ft.is_file() && is_markdown(name)).await;
  names.sort();
  names
}

async fn list_project_dirs(dir: &Path) -> Vec<String> {
  let mut names = list_dir(dir, |ft, _| ft.is_dir()).await;
  names.retain(|name| dir.join(name).join(PROJECT_FILE).is_file());
  names.sort();
  names
}

async fn list_dir(dir: &Path, keep: impl Fn(&std::fs::FileType, &str) -> bool) -> Vec<String> {
  let mut read_dir = match tokio::fs::read_dir(dir).await {
    Ok(rd) => rd,
    Err(e) => {
      warn!(dir = %dir.display(), error = %e, "content directory unreadable");
      return Vec::new();
    }
  };
  let mut names = Vec::new();
  loop {
    match read_dir.next_entry().await {
      Ok(Some(entry)) => {
        let Ok(file_type) = entry.file_type().await else { continue };
        let Some(name) = entry.file_name().to_str().map(str::to_string) else { continue };
        if keep(&file_type, &name) {
          names.push(name);
        }
      }
      Ok(None) => break,
      Err(e) => {
        warn!(dir = %dir.display(), error = %e, "content directory listing interrupted");
        break;
      }
    }
  }
  names
}
