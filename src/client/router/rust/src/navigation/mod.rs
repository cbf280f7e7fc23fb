/* src/client/router/rust/src/navigation/mod.rs */

//! The navigation state machine. `Idle` and `Navigating` are encoded in
//! `NavigationState::is_navigating`; the flag is tested and set before the
//! first suspension point of a transition and cleared by `NavGuard` when the
//! transition future finishes or is dropped.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

use folio_engine::{DetailResponse, PageName, PageRecord, PagesResponse};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::capability::{Host, MetaTag};
use crate::html;
use crate::listing::{ListComponent, ListKind, PageControl};
use crate::view::{HistoryState, View, pathname, query_page, resolve, with_query_page};

pub const FADE: Duration = Duration::from_millis(150);
/// Container every page fragment is swapped into.
pub const CONTENT_ID: &str = "app-content";
/// Detail container used once pages are preloaded into sections.
pub const DETAIL_ID: &str = "detail-view";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
  pub ctrl: bool,
  pub meta: bool,
  pub shift: bool,
}

impl Modifiers {
  pub fn any(self) -> bool {
    self.ctrl || self.meta || self.shift
  }
}

/// Input from the host's event wiring.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
  /// Click on an `a.nav-link`.
  NavLink { href: String, modifiers: Modifiers },
  /// Click on a post link inside the blog list.
  PostLink { slug: String },
  /// Click on a project link inside the projects list.
  ProjectLink { slug: String },
  /// Click on a detail view's back link.
  Back,
  /// `popstate` with the entry's state payload.
  PopState(Option<Value>),
  /// Click on a pagination button.
  Paginate { list: ListKind, control: PageControl },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// The view was shown and history updated.
  Committed(View),
  /// The transition ran and an error block was rendered instead.
  Failed(View),
  /// Another transition was in flight.
  Dropped,
  /// The target is not a known view.
  Rejected,
  /// Nothing happened. `prevent_default` tells the host whether to swallow
  /// the browser's default action.
  Ignored { prevent_default: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
  Network(String),
  Status(u16),
  Decode(String),
  MissingContainer(&'static str),
}

impl fmt::Display for NavError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NavError::Network(msg) => write!(f, "network error: {msg}"),
      NavError::Status(status) => write!(f, "HTTP {status}"),
      NavError::Decode(msg) => write!(f, "invalid response: {msg}"),
      NavError::MissingContainer(id) => write!(f, "element #{id} not found"),
    }
  }
}

impl std::error::Error for NavError {}

#[derive(Debug, Clone)]
pub struct RouterConfig {
  /// Fetch every page in one request at startup and switch by visibility.
  pub preload: bool,
  pub title_suffix: String,
}

impl Default for RouterConfig {
  fn default() -> Self {
    Self { preload: true, title_suffix: "Portfolio".to_string() }
  }
}

/// One per tab. Mutated only by `Router`, never borrowed across an await.
#[derive(Debug, Default)]
pub struct NavigationState {
  pub current: Option<View>,
  /// Set while an error block replaces the content of `current`.
  pub failed: Option<View>,
  pub is_navigating: bool,
  pub preloaded: Option<BTreeMap<PageName, PageRecord>>,
  pub history_entry: Option<HistoryState>,
  pub lists: HashMap<ListKind, ListComponent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
  Push,
  Replace,
}

struct NavGuard<'a> {
  state: &'a RefCell<NavigationState>,
}

impl Drop for NavGuard<'_> {
  fn drop(&mut self) {
    self.state.borrow_mut().is_navigating = false;
  }
}

pub struct Router<H: Host> {
  host: H,
  config: RouterConfig,
  state: RefCell<NavigationState>,
}

impl<H: Host> Router<H> {
  pub fn new(host: H, config: RouterConfig) -> Self {
    Self { host, config, state: RefCell::new(NavigationState::default()) }
  }

  pub fn host(&self) -> &H {
    &self.host
  }

  pub fn current_view(&self) -> Option<View> {
    self.state.borrow().current.clone()
  }

  /// The view whose error block is on screen, if the last transition failed.
  pub fn failed_view(&self) -> Option<View> {
    self.state.borrow().failed.clone()
  }

  pub fn is_navigating(&self) -> bool {
    self.state.borrow().is_navigating
  }

  pub fn is_preloaded(&self) -> bool {
    self.state.borrow().preloaded.is_some()
  }

  pub fn history_entry(&self) -> Option<HistoryState> {
    self.state.borrow().history_entry.clone()
  }

  pub fn list_page(&self, kind: ListKind) -> Option<usize> {
    self.state.borrow().lists.get(&kind).map(ListComponent::current_page)
  }

  /// Optional bulk preload, then show whatever the location names. The
  /// entry is replaced, not pushed.
  pub async fn start(&self) -> Outcome {
    let Some(_guard) = self.begin() else {
      return Outcome::Dropped;
    };
    if self.config.preload {
      self.preload().await;
    }
    let location = self.host.location();
    let Some(view) = View::from_path(&pathname(&location)) else {
      warn!(location, "initial location is not a known view");
      return Outcome::Rejected;
    };
    self.transition(view, HistoryMode::Replace, false, Some(location)).await
  }

  pub async fn dispatch(&self, event: UiEvent) -> Outcome {
    match event {
      UiEvent::NavLink { href, modifiers } => self.on_nav_link(&href, modifiers).await,
      UiEvent::PostLink { slug } => self.go(View::BlogPost(slug), HistoryMode::Push, true).await,
      UiEvent::ProjectLink { slug } => self.go(View::Project(slug), HistoryMode::Push, true).await,
      UiEvent::Back => match self.displayed_view() {
        Some(view) if view.is_detail() => {
          self.go(View::Page(view.owning_page()), HistoryMode::Push, true).await
        }
        _ => Outcome::Ignored { prevent_default: true },
      },
      UiEvent::PopState(state) => self.on_pop_state(state).await,
      UiEvent::Paginate { list, control } => self.on_paginate(list, control),
    }
  }

  /// What the user is looking at: the failed view while its error block is
  /// shown, otherwise the committed one.
  fn displayed_view(&self) -> Option<View> {
    let state = self.state.borrow();
    state.failed.clone().or_else(|| state.current.clone())
  }

  fn begin(&self) -> Option<NavGuard<'_>> {
    let mut state = self.state.borrow_mut();
    if state.is_navigating {
      return None;
    }
    state.is_navigating = true;
    Some(NavGuard { state: &self.state })
  }

  async fn go(&self, view: View, mode: HistoryMode, fade: bool) -> Outcome {
    let Some(_guard) = self.begin() else {
      debug!(?view, "navigation in flight, dropping request");
      return Outcome::Dropped;
    };
    self.transition(view, mode, fade, None).await
  }

  async fn on_nav_link(&self, href: &str, modifiers: Modifiers) -> Outcome {
    if modifiers.any() {
      return Outcome::Ignored { prevent_default: false };
    }
    let Some(target) = resolve(&self.host.location(), href) else {
      return Outcome::Ignored { prevent_default: false };
    };
    let Some(view) = View::from_path(target.path()) else {
      warn!(href, "link does not name a known view");
      return Outcome::Rejected;
    };
    let state = self.state.borrow();
    let unchanged = state.failed.is_none() && state.current.as_ref() == Some(&view);
    drop(state);
    if unchanged {
      return Outcome::Ignored { prevent_default: true };
    }
    self.go(view, HistoryMode::Push, true).await
  }

  async fn on_pop_state(&self, state: Option<Value>) -> Outcome {
    let location = self.host.location();
    let view = state
      .as_ref()
      .and_then(HistoryState::from_value)
      .map(|s| s.view())
      .or_else(|| View::from_path(&pathname(&location)));
    let Some(view) = view else {
      warn!(location, "history entry does not name a known view");
      return Outcome::Rejected;
    };
    let Some(_guard) = self.begin() else {
      return Outcome::Dropped;
    };
    self.transition(view, HistoryMode::Replace, false, Some(location)).await
  }

  fn on_paginate(&self, kind: ListKind, control: PageControl) -> Outcome {
    let mut state = self.state.borrow_mut();
    if state.is_navigating {
      return Outcome::Dropped;
    }
    if state.failed.is_some() {
      return Outcome::Ignored { prevent_default: true };
    }
    let Some(list) = state.lists.get_mut(&kind) else {
      return Outcome::Ignored { prevent_default: true };
    };
    if !list.apply(control) {
      return Outcome::Ignored { prevent_default: true };
    }
    list.render(&self.host);
    let page = list.current_page();
    let entry = state.history_entry.clone();
    let current = state.current.clone();
    drop(state);

    if kind.syncs_url()
      && let Some(entry) = entry
    {
      let url = with_query_page(&self.host.location(), page);
      self.host.replace_state(&entry.to_value(), &url);
    }
    self.host.scroll_into_view(kind.items_id());
    match current {
      Some(view) => Outcome::Committed(view),
      None => Outcome::Ignored { prevent_default: true },
    }
  }

  /// Caller holds the guard. DOM, title and history change only after the
  /// new content has been fetched and decoded.
  async fn transition(
    &self,
    view: View,
    mode: HistoryMode,
    fade: bool,
    url: Option<String>,
  ) -> Outcome {
    let result = match &view {
      View::Page(page) => self.show_page(*page, fade).await,
      View::BlogPost(_) | View::Project(_) => self.show_detail(&view, fade).await,
    };

    if let Err(err) = result {
      warn!(?view, error = %err, "navigation failed");
      self.render_failure(&view, fade);
      self.state.borrow_mut().failed = Some(view.clone());
      return Outcome::Failed(view);
    }

    let entry = view.history_state();
    let url = url.unwrap_or_else(|| view.path());
    match mode {
      HistoryMode::Push => self.host.push_state(&entry.to_value(), &url),
      HistoryMode::Replace => self.host.replace_state(&entry.to_value(), &url),
    }
    {
      let mut state = self.state.borrow_mut();
      state.current = Some(view.clone());
      state.failed = None;
      state.history_entry = Some(entry);
    }
    self.update_active_nav(view.owning_page());

    if let View::Page(page) = &view
      && let Some(kind) = ListKind::for_page(*page)
    {
      self.init_list(kind).await;
    }
    info!(path = %view.path(), "navigated");
    Outcome::Committed(view)
  }

  async fn show_page(&self, page: PageName, fade: bool) -> Result<(), NavError> {
    let cached = self.state.borrow().preloaded.as_ref().and_then(|p| p.get(&page).cloned());
    if let Some(record) = cached {
      self.host.sleep(Duration::ZERO).await;
      self.show_section(Some(page));
      self.apply_record(&record);
      return Ok(());
    }

    if !self.host.has_element(CONTENT_ID) {
      return Err(NavError::MissingContainer(CONTENT_ID));
    }
    if fade {
      self.fade_out(CONTENT_ID).await;
    }
    let record: PageRecord = self.fetch_json(&format!("/api/page?name={page}")).await?;
    self.host.set_inner_html(CONTENT_ID, &record.content);
    self.apply_record(&record);
    if fade {
      self.host.set_opacity(CONTENT_ID, 1.0);
    }
    Ok(())
  }

  async fn show_detail(&self, view: &View, fade: bool) -> Result<(), NavError> {
    let container = self.detail_container();
    if !self.host.has_element(container) {
      return Err(NavError::MissingContainer(container));
    }
    if fade {
      self.fade_out(container).await;
    }

    let (endpoint, render): (String, fn(&str) -> String) = match view {
      View::BlogPost(slug) => (format!("/api/blog/{slug}"), html::blog_post_article),
      View::Project(slug) => (format!("/api/projects/{slug}"), html::project_article),
      View::Page(_) => return Ok(()),
    };
    let detail: DetailResponse = self.fetch_json(&endpoint).await?;

    let owner = view.owning_page();
    if self.is_preloaded() {
      self.show_section(None);
    }
    self.host.set_inner_html(container, &render(&detail.html));
    let meta = &detail.metadata;
    self.host.set_title(&format!("{} - {} - {}", meta.title, owner.label(), self.config.title_suffix));
    let description = meta.excerpt.as_deref().or(meta.description.as_deref()).unwrap_or("");
    self.host.set_meta(MetaTag::Description, description);
    self.host.set_meta(MetaTag::PublishedTime, meta.date.as_deref().unwrap_or(""));
    self.host.set_stylesheet(&owner.stylesheet());
    if fade {
      self.host.set_opacity(container, 1.0);
    }
    Ok(())
  }

  fn render_failure(&self, view: &View, fade: bool) {
    let (container, block) = match view {
      View::Page(_) => (CONTENT_ID, html::PAGE_ERROR),
      View::BlogPost(_) => (self.detail_container(), html::POST_ERROR),
      View::Project(_) => (self.detail_container(), html::PROJECT_ERROR),
    };
    if fade {
      self.host.set_opacity(container, 1.0);
    }
    if view.is_detail() && self.is_preloaded() {
      self.show_section(None);
    }
    self.host.set_inner_html(container, block);
  }

  /// Preloaded mode: show the section for `page`, or the detail section.
  fn show_section(&self, page: Option<PageName>) {
    for p in PageName::ALL {
      self.host.set_visible(&html::page_section_id(p), Some(p) == page);
    }
    self.host.set_visible(DETAIL_ID, page.is_none());
  }

  fn detail_container(&self) -> &'static str {
    if self.is_preloaded() { DETAIL_ID } else { CONTENT_ID }
  }

  fn apply_record(&self, record: &PageRecord) {
    self.host.set_title(&record.title);
    self.host.set_stylesheet(&record.page_css);
  }

  async fn fade_out(&self, id: &str) {
    self.host.set_opacity(id, 0.0);
    self.host.sleep(FADE).await;
  }

  fn update_active_nav(&self, page: PageName) {
    let location = self.host.location();
    for (index, href) in self.host.nav_links().iter().enumerate() {
      let target = resolve(&location, href).and_then(|url| PageName::from_path(url.path()));
      self.host.set_nav_active(index, target == Some(page));
    }
  }

  async fn preload(&self) {
    let pages = match self.fetch_json::<PagesResponse>("/api/pages").await {
      Ok(resp) => resp.pages,
      Err(err) => {
        warn!(error = %err, "bulk preload failed, pages will be fetched individually");
        return;
      }
    };
    if !PageName::ALL.iter().all(|p| pages.contains_key(p)) {
      warn!("bulk preload incomplete, pages will be fetched individually");
      return;
    }
    let sections =
      html::preload_sections(pages.iter().map(|(p, r)| (*p, r.content.as_str())), DETAIL_ID);
    if !self.host.set_inner_html(CONTENT_ID, &sections) {
      warn!("#{CONTENT_ID} missing, preload discarded");
      return;
    }
    debug!(pages = pages.len(), "pages preloaded");
    self.state.borrow_mut().preloaded = Some(pages);
  }

  /// Fetch and render a page's list component. Failures stay inside the
  /// list container.
  async fn init_list(&self, kind: ListKind) {
    if !self.host.has_element(kind.items_id()) {
      debug!(?kind, "list container absent, skipping");
      return;
    }
    let start = if kind.syncs_url() { query_page(&self.host.location()).unwrap_or(1) } else { 1 };
    let list = match self.fetch_text(kind.endpoint()).await {
      Ok(body) => {
        ListComponent::decode(kind, &body, start).map_err(|e| NavError::Decode(e.to_string()))
      }
      Err(err) => Err(err),
    };
    match list {
      Ok(list) => {
        list.render(&self.host);
        self.state.borrow_mut().lists.insert(kind, list);
      }
      Err(err) => {
        warn!(?kind, error = %err, "list failed to load");
        self.state.borrow_mut().lists.remove(&kind);
        self.host.set_inner_html(kind.items_id(), html::LIST_ERROR);
        self.host.set_inner_html(kind.controls_id(), "");
      }
    }
  }

  async fn fetch_text(&self, url: &str) -> Result<String, NavError> {
    let resp = self.host.fetch(url).await.map_err(NavError::Network)?;
    if !resp.ok() {
      return Err(NavError::Status(resp.status));
    }
    Ok(resp.body)
  }

  async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, NavError> {
    let body = self.fetch_text(url).await?;
    serde_json::from_str(&body).map_err(|e| NavError::Decode(e.to_string()))
  }
}

#[cfg(test)]
mod tests;
