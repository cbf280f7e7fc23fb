/* src/client/router/rust/src/listing.rs */

//! Paginated list components owned by the router. Each is rebuilt from the
//! list endpoint after its page is committed and re-rendered in full on
//! every page change.

use folio_engine::{
  BlogListResponse, BlogPostSummary, PageName, Paginator, ProjectListResponse, ProjectSummary,
};

use crate::capability::Document;
use crate::html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
  Blog,
  Projects,
}

impl ListKind {
  pub fn for_page(page: PageName) -> Option<ListKind> {
    match page {
      PageName::Blog => Some(ListKind::Blog),
      PageName::Projects => Some(ListKind::Projects),
      PageName::Home | PageName::About => None,
    }
  }

  pub fn items_id(self) -> &'static str {
    match self {
      ListKind::Blog => "blog-posts",
      ListKind::Projects => "projects-list",
    }
  }

  pub fn controls_id(self) -> &'static str {
    match self {
      ListKind::Blog => "blog-pagination",
      ListKind::Projects => "projects-pagination",
    }
  }

  pub fn page_size(self) -> usize {
    match self {
      ListKind::Blog => 4,
      ListKind::Projects => 6,
    }
  }

  pub fn endpoint(self) -> &'static str {
    match self {
      ListKind::Blog => "/api/blog/list",
      ListKind::Projects => "/api/projects/list",
    }
  }

  /// Whether the current page number is mirrored into `?page=N`.
  pub fn syncs_url(self) -> bool {
    matches!(self, ListKind::Blog)
  }
}

/// A pagination button, identified by its `data-page` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
  Prev,
  Next,
  Page(usize),
}

impl PageControl {
  pub fn from_data_page(value: &str) -> Option<PageControl> {
    match value {
      "prev" => Some(PageControl::Prev),
      "next" => Some(PageControl::Next),
      n => n.parse().ok().map(PageControl::Page),
    }
  }
}

#[derive(Debug, Clone)]
pub enum ListComponent {
  Blog(Paginator<BlogPostSummary>),
  Projects(Paginator<ProjectSummary>),
}

impl ListComponent {
  /// Build from a list endpoint body, starting on `start_page` (clamped).
  pub fn decode(kind: ListKind, body: &str, start_page: usize) -> Result<Self, serde_json::Error> {
    Ok(match kind {
      ListKind::Blog => {
        let list: BlogListResponse = serde_json::from_str(body)?;
        ListComponent::Blog(Paginator::new(list.posts, kind.page_size()).starting_at(start_page))
      }
      ListKind::Projects => {
        let list: ProjectListResponse = serde_json::from_str(body)?;
        ListComponent::Projects(
          Paginator::new(list.projects, kind.page_size()).starting_at(start_page),
        )
      }
    })
  }

  pub fn kind(&self) -> ListKind {
    match self {
      ListComponent::Blog(_) => ListKind::Blog,
      ListComponent::Projects(_) => ListKind::Projects,
    }
  }

  pub fn current_page(&self) -> usize {
    match self {
      ListComponent::Blog(p) => p.current_page(),
      ListComponent::Projects(p) => p.current_page(),
    }
  }

  /// Returns false for no-op controls (out of range, already current).
  pub fn apply(&mut self, control: PageControl) -> bool {
    match self {
      ListComponent::Blog(p) => apply(p, control),
      ListComponent::Projects(p) => apply(p, control),
    }
  }

  pub fn render(&self, doc: &impl Document) {
    let kind = self.kind();
    let (items, controls) = match self {
      ListComponent::Blog(p) => (html::blog_items(p.page_items()), html::pagination_controls(p)),
      ListComponent::Projects(p) => {
        (html::project_items(p.page_items()), html::pagination_controls(p))
      }
    };
    doc.set_inner_html(kind.items_id(), &items);
    doc.set_inner_html(kind.controls_id(), &controls);
  }
}

fn apply<T>(paginator: &mut Paginator<T>, control: PageControl) -> bool {
  match control {
    PageControl::Prev => paginator.prev(),
    PageControl::Next => paginator.next(),
    PageControl::Page(n) => paginator.go_to(n),
  }
}
