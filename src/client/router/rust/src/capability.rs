/* src/client/router/rust/src/capability.rs */

//! The host capability set. A browser binding implements these over the
//! real DOM; tests implement them in memory. Every method takes `&self`:
//! DOM handles are shared, so implementations use interior mutability.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

/// `<meta>` tags the router keeps in sync on detail views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetaTag {
  /// `meta[name="description"]`
  Description,
  /// `meta[property="article:published_time"]`
  PublishedTime,
}

pub trait Document {
  /// Replace the children of element `id`. Returns false when no such element.
  fn set_inner_html(&self, id: &str, html: &str) -> bool;
  fn has_element(&self, id: &str) -> bool;
  fn set_visible(&self, id: &str, visible: bool);
  fn set_opacity(&self, id: &str, opacity: f32);
  fn set_title(&self, title: &str);
  /// Point the `#page-css` stylesheet link at `href`, creating it if absent.
  fn set_stylesheet(&self, href: &str);
  /// Set a meta tag's content, creating the tag if absent.
  fn set_meta(&self, tag: MetaTag, content: &str);
  /// `href` attribute of every `.nav-link`, in document order.
  fn nav_links(&self) -> Vec<String>;
  fn set_nav_active(&self, index: usize, active: bool);
  fn scroll_into_view(&self, id: &str);
}

pub trait History {
  fn push_state(&self, state: &Value, url: &str);
  fn replace_state(&self, state: &Value, url: &str);
  /// Current path plus query string, e.g. `/blog?page=2`.
  fn location(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
  pub status: u16,
  pub body: String,
}

impl FetchResponse {
  pub fn ok(&self) -> bool {
    (200..300).contains(&self.status)
  }
}

pub trait Fetch {
  /// GET `url`. `Err` is a transport failure; HTTP errors come back as `Ok`.
  fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchResponse, String>>;
}

pub trait Timer {
  fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Everything the router needs from its environment.
pub trait Host: Document + History + Fetch + Timer {}

impl<T: Document + History + Fetch + Timer> Host for T {}
