/* src/client/router/rust/src/testing.rs */

//! In-memory host for exercising the router without a browser.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use serde_json::Value;

use crate::capability::{Document, Fetch, FetchResponse, History, MetaTag, Timer};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
  pub html: String,
  pub visible: bool,
  pub opacity: f32,
}

impl Default for Element {
  fn default() -> Self {
    Self { html: String::new(), visible: true, opacity: 1.0 }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HistoryOp {
  Push(Value, String),
  Replace(Value, String),
}

#[derive(Default)]
pub(crate) struct FakeHost {
  pub elements: RefCell<BTreeMap<String, Element>>,
  pub title: RefCell<String>,
  pub stylesheet: RefCell<String>,
  pub meta: RefCell<BTreeMap<MetaTag, String>>,
  pub nav: RefCell<Vec<(String, bool)>>,
  pub location: RefCell<String>,
  pub history: RefCell<Vec<HistoryOp>>,
  pub routes: RefCell<HashMap<String, Result<FetchResponse, String>>>,
  pub fetches: RefCell<Vec<String>>,
  pub sleeps: RefCell<Vec<Duration>>,
  pub scrolled: RefCell<Vec<String>>,
  /// Extra yields inside every fetch, so concurrent transitions interleave.
  pub fetch_yields: Cell<usize>,
}

impl FakeHost {
  /// A shell with the content container and the four nav links.
  pub fn shell(location: &str) -> Self {
    let host = Self::default();
    host.elements.borrow_mut().insert("app-content".into(), Element::default());
    *host.nav.borrow_mut() =
      ["/", "/about", "/blog", "/projects"].iter().map(|h| (h.to_string(), false)).collect();
    *host.location.borrow_mut() = location.to_string();
    host.fetch_yields.set(1);
    host
  }

  pub fn route(&self, url: &str, status: u16, body: impl Into<String>) {
    self.routes.borrow_mut().insert(url.into(), Ok(FetchResponse { status, body: body.into() }));
  }

  pub fn route_json(&self, url: &str, body: &Value) {
    self.route(url, 200, body.to_string());
  }

  pub fn fail_route(&self, url: &str) {
    self.routes.borrow_mut().insert(url.into(), Err("connection refused".into()));
  }

  pub fn html(&self, id: &str) -> String {
    self.elements.borrow().get(id).map(|e| e.html.clone()).unwrap_or_default()
  }

  pub fn element(&self, id: &str) -> Option<Element> {
    self.elements.borrow().get(id).cloned()
  }

  pub fn active_links(&self) -> Vec<String> {
    self.nav.borrow().iter().filter(|(_, active)| *active).map(|(h, _)| h.clone()).collect()
  }

  pub fn fetch_count(&self, url: &str) -> usize {
    self.fetches.borrow().iter().filter(|u| *u == url).count()
  }

  /// Register every `id="..."` found in `html` as an element.
  fn discover(&self, html: &str) {
    let mut rest = html;
    while let Some(start) = rest.find("id=\"") {
      let after = &rest[start + 4..];
      let Some(end) = after.find('"') else { break };
      let id = &after[..end];
      let hidden = after[end..].split('>').next().is_some_and(|attrs| attrs.contains("hidden"));
      self
        .elements
        .borrow_mut()
        .entry(id.to_string())
        .or_insert_with(|| Element { visible: !hidden, ..Element::default() });
      rest = &after[end..];
    }
  }
}

impl Document for FakeHost {
  fn set_inner_html(&self, id: &str, html: &str) -> bool {
    let found = match self.elements.borrow_mut().get_mut(id) {
      Some(el) => {
        el.html = html.to_string();
        true
      }
      None => false,
    };
    if found {
      self.discover(html);
    }
    found
  }

  fn has_element(&self, id: &str) -> bool {
    self.elements.borrow().contains_key(id)
  }

  fn set_visible(&self, id: &str, visible: bool) {
    if let Some(el) = self.elements.borrow_mut().get_mut(id) {
      el.visible = visible;
    }
  }

  fn set_opacity(&self, id: &str, opacity: f32) {
    if let Some(el) = self.elements.borrow_mut().get_mut(id) {
      el.opacity = opacity;
    }
  }

  fn set_title(&self, title: &str) {
    *self.title.borrow_mut() = title.to_string();
  }

  fn set_stylesheet(&self, href: &str) {
    *self.stylesheet.borrow_mut() = href.to_string();
  }

  fn set_meta(&self, tag: MetaTag, content: &str) {
    self.meta.borrow_mut().insert(tag, content.to_string());
  }

  fn nav_links(&self) -> Vec<String> {
    self.nav.borrow().iter().map(|(href, _)| href.clone()).collect()
  }

  fn set_nav_active(&self, index: usize, active: bool) {
    if let Some(link) = self.nav.borrow_mut().get_mut(index) {
      link.1 = active;
    }
  }

  fn scroll_into_view(&self, id: &str) {
    self.scrolled.borrow_mut().push(id.to_string());
  }
}

impl History for FakeHost {
  fn push_state(&self, state: &Value, url: &str) {
    self.history.borrow_mut().push(HistoryOp::Push(state.clone(), url.to_string()));
    *self.location.borrow_mut() = url.to_string();
  }

  fn replace_state(&self, state: &Value, url: &str) {
    self.history.borrow_mut().push(HistoryOp::Replace(state.clone(), url.to_string()));
    *self.location.borrow_mut() = url.to_string();
  }

  fn location(&self) -> String {
    self.location.borrow().clone()
  }
}

impl Fetch for FakeHost {
  async fn fetch(&self, url: &str) -> Result<FetchResponse, String> {
    self.fetches.borrow_mut().push(url.to_string());
    for _ in 0..self.fetch_yields.get() {
      tokio::task::yield_now().await;
    }
    self
      .routes
      .borrow()
      .get(url)
      .cloned()
      .unwrap_or_else(|| Ok(FetchResponse { status: 404, body: String::new() }))
  }
}

impl Timer for FakeHost {
  async fn sleep(&self, duration: Duration) {
    self.sleeps.borrow_mut().push(duration);
    tokio::task::yield_now().await;
  }
}
