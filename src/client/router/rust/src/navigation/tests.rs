/* src/client/router/rust/src/navigation/tests.rs */

use std::task::{Context, Poll, Waker};

use folio_engine::PageName;
use serde_json::{Value, json};

use super::*;
use crate::capability::Document;
use crate::html::{LIST_ERROR, PAGE_ERROR, POST_ERROR};
use crate::testing::{FakeHost, HistoryOp};

fn record(page: &str, content: &str) -> Value {
  let label = match page {
    "home" => "Home",
    "about" => "About",
    "blog" => "Blog",
    _ => "Projects",
  };
  json!({
    "content": content,
    "title": format!("{label} - Portfolio"),
    "activePage": page,
    "pageCSS": format!("/pages/{page}/styles.css"),
  })
}

fn with_pages(host: &FakeHost) {
  host.route_json("/api/page?name=home", &record("home", "<h1>Home</h1>"));
  host.route_json("/api/page?name=about", &record("about", "<h1>About</h1>"));
  host.route_json(
    "/api/page?name=blog",
    &record("blog", "<div id=\"blog-posts\"></div><div id=\"blog-pagination\"></div>"),
  );
  host.route_json(
    "/api/page?name=projects",
    &record("projects", "<div id=\"projects-list\"></div><div id=\"projects-pagination\"></div>"),
  );
}

fn with_bulk_pages(host: &FakeHost) {
  host.route_json(
    "/api/pages",
    &json!({"pages": {
      "home": record("home", "<h1>Home</h1>"),
      "about": record("about", "<h1>About</h1>"),
      "blog": record("blog", "<div id=\"blog-posts\"></div><div id=\"blog-pagination\"></div>"),
      "projects": record("projects", "<div id=\"projects-list\"></div>"),
    }}),
  );
}

fn with_posts(host: &FakeHost, n: usize) {
  let posts: Vec<Value> = (0..n)
    .map(|i| json!({"slug": format!("p{i}"), "title": format!("Post {i}"), "date": "2024-01-01"}))
    .collect();
  host.route_json("/api/blog/list", &json!({ "posts": posts }));
}

fn with_post(host: &FakeHost, slug: &str, title: &str) {
  host.route_json(
    &format!("/api/blog/{slug}"),
    &json!({
      "slug": slug,
      "metadata": {"title": title, "date": "2024-01-01", "excerpt": "Short"},
      "html": "<div class=\"markdown-content\"><p>Body</p></div>",
    }),
  );
}

fn no_preload() -> RouterConfig {
  RouterConfig { preload: false, ..RouterConfig::default() }
}

fn router(location: &str) -> Router<FakeHost> {
  let host = FakeHost::shell(location);
  with_pages(&host);
  Router::new(host, no_preload())
}

fn nav(href: &str) -> UiEvent {
  UiEvent::NavLink { href: href.into(), modifiers: Modifiers::default() }
}

fn pushes(host: &FakeHost) -> Vec<(Value, String)> {
  host
    .history
    .borrow()
    .iter()
    .filter_map(|op| match op {
      HistoryOp::Push(state, url) => Some((state.clone(), url.clone())),
      HistoryOp::Replace(..) => None,
    })
    .collect()
}

fn last_op(host: &FakeHost) -> Option<HistoryOp> {
  host.history.borrow().last().cloned()
}

// -- start --

#[tokio::test]
async fn start_replaces_initial_entry() {
  let router = router("/");
  assert_eq!(router.start().await, Outcome::Committed(View::Page(PageName::Home)));

  let host = router.host();
  assert_eq!(host.html(CONTENT_ID), "<h1>Home</h1>");
  assert_eq!(*host.title.borrow(), "Home - Portfolio");
  assert_eq!(*host.stylesheet.borrow(), "/pages/home/styles.css");
  assert_eq!(last_op(host), Some(HistoryOp::Replace(json!({"page": "home"}), "/".into())));
  assert!(pushes(host).is_empty());
  assert_eq!(host.active_links(), ["/"]);
  assert!(!router.is_navigating());
}

#[tokio::test]
async fn start_on_home_alias_highlights_root_link() {
  let router = router("/home");
  router.start().await;
  assert_eq!(router.host().active_links(), ["/"]);
}

#[tokio::test]
async fn start_on_post_url_loads_detail() {
  let router = router("/blog/hello");
  with_post(router.host(), "hello", "Hello");
  assert_eq!(router.start().await, Outcome::Committed(View::BlogPost("hello".into())));
  assert_eq!(
    last_op(router.host()),
    Some(HistoryOp::Replace(json!({"page": "blog-post", "slug": "hello"}), "/blog/hello".into()))
  );
}

#[tokio::test]
async fn start_on_unknown_path_is_rejected() {
  let router = router("/contact");
  assert_eq!(router.start().await, Outcome::Rejected);
  assert!(router.host().fetches.borrow().is_empty());
  assert!(!router.is_navigating());
}

// -- page transitions --

#[tokio::test]
async fn nav_link_pushes_and_fades() {
  let router = router("/");
  router.start().await;

  assert_eq!(router.dispatch(nav("/about")).await, Outcome::Committed(View::Page(PageName::About)));
  let host = router.host();
  assert_eq!(host.html(CONTENT_ID), "<h1>About</h1>");
  assert_eq!(*host.title.borrow(), "About - Portfolio");
  assert_eq!(pushes(host), [(json!({"page": "about"}), "/about".to_string())]);
  assert_eq!(host.active_links(), ["/about"]);
  assert!(host.sleeps.borrow().contains(&FADE));
  assert_eq!(host.element(CONTENT_ID).unwrap().opacity, 1.0);
}

#[tokio::test]
async fn modified_click_is_left_to_the_browser() {
  let router = router("/");
  router.start().await;
  let event = UiEvent::NavLink {
    href: "/about".into(),
    modifiers: Modifiers { ctrl: true, ..Modifiers::default() },
  };
  assert_eq!(router.dispatch(event).await, Outcome::Ignored { prevent_default: false });
  assert_eq!(router.host().fetch_count("/api/page?name=about"), 0);
}

#[tokio::test]
async fn active_link_click_is_swallowed() {
  let router = router("/");
  router.start().await;
  for href in ["/", "/home"] {
    assert_eq!(router.dispatch(nav(href)).await, Outcome::Ignored { prevent_default: true });
  }
  assert_eq!(router.host().fetch_count("/api/page?name=home"), 1);
  assert!(pushes(router.host()).is_empty());
}

#[tokio::test]
async fn unknown_page_never_reaches_the_api() {
  let router = router("/");
  router.start().await;
  assert_eq!(router.dispatch(nav("/contact")).await, Outcome::Rejected);
  assert_eq!(router.dispatch(nav("https://github.com/someone")).await, Outcome::Ignored {
    prevent_default: false
  });
  assert_eq!(router.host().fetches.borrow().len(), 1);
}

#[tokio::test]
async fn second_request_during_transition_is_dropped() {
  let router = router("/");
  router.start().await;

  let (first, second) = tokio::join!(router.dispatch(nav("/about")), router.dispatch(nav("/blog")));
  assert_eq!(first, Outcome::Committed(View::Page(PageName::About)));
  assert_eq!(second, Outcome::Dropped);
  assert_eq!(pushes(router.host()).len(), 1);
  assert_eq!(router.host().fetch_count("/api/page?name=blog"), 0);
  assert!(!router.is_navigating());

  // After settling, the next click starts a fresh transition.
  assert_eq!(router.dispatch(nav("/blog")).await, Outcome::Committed(View::Page(PageName::Blog)));
  assert_eq!(pushes(router.host()).len(), 2);
}

#[tokio::test]
async fn failed_fetch_renders_error_and_keeps_state() {
  let router = router("/");
  router.start().await;
  router.host().route("/api/page?name=about", 500, "{}");

  assert_eq!(router.dispatch(nav("/about")).await, Outcome::Failed(View::Page(PageName::About)));
  let host = router.host();
  assert_eq!(host.html(CONTENT_ID), PAGE_ERROR);
  assert_eq!(host.element(CONTENT_ID).unwrap().opacity, 1.0);
  assert!(pushes(host).is_empty());
  assert_eq!(*host.title.borrow(), "Home - Portfolio");
  assert_eq!(router.current_view(), Some(View::Page(PageName::Home)));
  assert_eq!(router.failed_view(), Some(View::Page(PageName::About)));
  assert_eq!(router.history_entry(), Some(View::Page(PageName::Home).history_state()));
  assert!(!router.is_navigating());

  // Still interactive.
  assert_eq!(router.dispatch(nav("/blog")).await, Outcome::Committed(View::Page(PageName::Blog)));
}

#[tokio::test]
async fn undecodable_body_fails_the_transition() {
  let router = router("/");
  router.start().await;
  router.host().route("/api/page?name=about", 200, "<html>not json</html>");
  assert_eq!(router.dispatch(nav("/about")).await, Outcome::Failed(View::Page(PageName::About)));
}

#[tokio::test]
async fn missing_container_fails_without_touching_history() {
  let router = router("/");
  router.host().elements.borrow_mut().clear();
  assert_eq!(router.start().await, Outcome::Failed(View::Page(PageName::Home)));
  assert!(router.host().history.borrow().is_empty());
  assert!(router.host().fetches.borrow().is_empty());
}

#[tokio::test]
async fn dropping_an_in_flight_transition_releases_the_lock() {
  let router = router("/");
  router.start().await;

  let mut fut = Box::pin(router.dispatch(nav("/about")));
  let mut cx = Context::from_waker(Waker::noop());
  assert!(matches!(fut.as_mut().poll(&mut cx), Poll::Pending));
  assert!(router.is_navigating());
  drop(fut);
  assert!(!router.is_navigating());
}

// -- detail views --

#[tokio::test]
async fn post_link_renders_article_and_metadata() {
  let router = router("/blog");
  with_posts(router.host(), 5);
  with_post(router.host(), "p0", "Post Zero");
  router.start().await;

  let outcome = router.dispatch(UiEvent::PostLink { slug: "p0".into() }).await;
  assert_eq!(outcome, Outcome::Committed(View::BlogPost("p0".into())));

  let host = router.host();
  let html = host.html(CONTENT_ID);
  assert!(html.starts_with("<article class=\"blog-post\">"));
  assert!(html.contains("back-to-blog"));
  assert!(html.contains("<p>Body</p>"));
  assert_eq!(*host.title.borrow(), "Post Zero - Blog - Portfolio");
  assert_eq!(*host.stylesheet.borrow(), "/pages/blog/styles.css");
  assert_eq!(host.meta.borrow()[&MetaTag::Description], "Short");
  assert_eq!(host.meta.borrow()[&MetaTag::PublishedTime], "2024-01-01");
  assert_eq!(
    pushes(host).last().cloned(),
    Some((json!({"page": "blog-post", "slug": "p0"}), "/blog/p0".to_string()))
  );
  assert_eq!(host.active_links(), ["/blog"]);
}

#[tokio::test]
async fn detail_is_always_fetched_fresh() {
  let router = router("/");
  with_post(router.host(), "p0", "Post Zero");
  router.start().await;
  router.dispatch(UiEvent::PostLink { slug: "p0".into() }).await;
  router.dispatch(nav("/")).await;
  router.dispatch(UiEvent::PostLink { slug: "p0".into() }).await;
  assert_eq!(router.host().fetch_count("/api/blog/p0"), 2);
}

#[tokio::test]
async fn missing_post_shows_post_error() {
  let router = router("/");
  router.start().await;
  router.host().fail_route("/api/blog/gone");
  let outcome = router.dispatch(UiEvent::PostLink { slug: "gone".into() }).await;
  assert_eq!(outcome, Outcome::Failed(View::BlogPost("gone".into())));
  assert_eq!(router.host().html(CONTENT_ID), POST_ERROR);
  assert_eq!(router.host().element(CONTENT_ID).unwrap().opacity, 1.0);
}

#[tokio::test]
async fn link_to_committed_view_recovers_from_error_block() {
  let router = router("/blog");
  with_posts(router.host(), 5);
  router.start().await;
  router.host().fail_route("/api/blog/gone");

  let outcome = router.dispatch(UiEvent::PostLink { slug: "gone".into() }).await;
  assert_eq!(outcome, Outcome::Failed(View::BlogPost("gone".into())));
  assert_eq!(router.history_entry(), Some(View::Page(PageName::Blog).history_state()));
  let paginate = UiEvent::Paginate { list: ListKind::Blog, control: PageControl::Next };
  assert_eq!(router.dispatch(paginate).await, Outcome::Ignored { prevent_default: true });

  assert_eq!(router.dispatch(nav("/blog")).await, Outcome::Committed(View::Page(PageName::Blog)));
  assert_ne!(router.host().html(CONTENT_ID), POST_ERROR);
  assert_eq!(router.failed_view(), None);
  assert_eq!(pushes(router.host()).last().map(|(_, url)| url.clone()).as_deref(), Some("/blog"));
  assert_eq!(router.dispatch(nav("/blog")).await, Outcome::Ignored { prevent_default: true });
}

#[tokio::test]
async fn failed_page_can_be_left_by_its_predecessor_link() {
  let router = router("/about");
  router.start().await;
  router.host().route("/api/page?name=blog", 500, "{}");

  assert_eq!(router.dispatch(nav("/blog")).await, Outcome::Failed(View::Page(PageName::Blog)));
  assert_eq!(router.host().html(CONTENT_ID), PAGE_ERROR);
  assert!(pushes(router.host()).is_empty());

  assert_eq!(router.dispatch(nav("/about")).await, Outcome::Committed(View::Page(PageName::About)));
  assert_eq!(router.host().html(CONTENT_ID), "<h1>About</h1>");
  assert_eq!(pushes(router.host()), [(json!({"page": "about"}), "/about".to_string())]);
}

#[tokio::test]
async fn back_from_failed_detail_returns_to_its_list() {
  let router = router("/");
  with_posts(router.host(), 1);
  router.start().await;
  router.host().fail_route("/api/blog/gone");

  router.dispatch(UiEvent::PostLink { slug: "gone".into() }).await;
  assert_eq!(router.current_view(), Some(View::Page(PageName::Home)));
  assert_eq!(router.dispatch(UiEvent::Back).await, Outcome::Committed(View::Page(PageName::Blog)));
  assert_eq!(router.current_view(), Some(View::Page(PageName::Blog)));
}

#[tokio::test]
async fn project_detail_and_back() {
  let router = router("/projects");
  router.host().route_json("/api/projects/list", &json!({"projects": []}));
  router.host().route_json(
    "/api/projects/tool",
    &json!({"slug": "tool", "metadata": {"title": "Tool"}, "html": "<p>t</p>"}),
  );
  router.start().await;

  let outcome = router.dispatch(UiEvent::ProjectLink { slug: "tool".into() }).await;
  assert_eq!(outcome, Outcome::Committed(View::Project("tool".into())));
  assert_eq!(*router.host().title.borrow(), "Tool - Projects - Portfolio");
  assert!(router.host().html(CONTENT_ID).contains("back-to-projects"));

  assert_eq!(router.dispatch(UiEvent::Back).await, Outcome::Committed(View::Page(PageName::Projects)));
  assert_eq!(
    pushes(router.host()).last().cloned(),
    Some((json!({"page": "projects"}), "/projects".to_string()))
  );
  assert_eq!(router.dispatch(UiEvent::Back).await, Outcome::Ignored { prevent_default: true });
}

// -- history --

#[tokio::test]
async fn pop_state_restores_from_payload() {
  let router = router("/");
  with_post(router.host(), "p0", "Post Zero");
  router.start().await;
  router.dispatch(nav("/about")).await;

  *router.host().location.borrow_mut() = "/blog/p0".into();
  let outcome =
    router.dispatch(UiEvent::PopState(Some(json!({"page": "blog-post", "slug": "p0"})))).await;
  assert_eq!(outcome, Outcome::Committed(View::BlogPost("p0".into())));
  assert_eq!(
    last_op(router.host()),
    Some(HistoryOp::Replace(json!({"page": "blog-post", "slug": "p0"}), "/blog/p0".into()))
  );
  assert_eq!(pushes(router.host()).len(), 1);
  assert_eq!(*router.host().sleeps.borrow(), [FADE]);
}

#[tokio::test]
async fn pop_state_without_payload_uses_location() {
  let router = router("/");
  router.start().await;
  *router.host().location.borrow_mut() = "/about".into();
  assert_eq!(router.dispatch(UiEvent::PopState(None)).await, Outcome::Committed(View::Page(PageName::About)));

  *router.host().location.borrow_mut() = "/nowhere".into();
  let outcome = router.dispatch(UiEvent::PopState(Some(json!({"page": "admin"})))).await;
  assert_eq!(outcome, Outcome::Rejected);
}

// -- preload --

#[tokio::test]
async fn preloaded_pages_switch_by_visibility() {
  let host = FakeHost::shell("/about");
  with_bulk_pages(&host);
  with_posts(&host, 1);
  let router = Router::new(host, RouterConfig::default());

  assert_eq!(router.start().await, Outcome::Committed(View::Page(PageName::About)));
  assert!(router.is_preloaded());
  let host = router.host();
  assert!(host.element("page-about").unwrap().visible);
  assert!(!host.element("page-home").unwrap().visible);
  assert!(!host.element(DETAIL_ID).unwrap().visible);
  assert_eq!(*host.title.borrow(), "About - Portfolio");

  assert_eq!(router.dispatch(nav("/blog")).await, Outcome::Committed(View::Page(PageName::Blog)));
  assert!(host.element("page-blog").unwrap().visible);
  assert!(!host.element("page-about").unwrap().visible);
  assert_eq!(host.fetch_count("/api/page?name=blog"), 0);
  assert_eq!(host.fetch_count("/api/blog/list"), 1);
  assert!(host.html("blog-posts").contains("Post 0"));
  assert!(host.sleeps.borrow().contains(&Duration::ZERO));
}

#[tokio::test]
async fn preloaded_detail_uses_detail_section() {
  let host = FakeHost::shell("/");
  with_bulk_pages(&host);
  with_post(&host, "p0", "Post Zero");
  let router = Router::new(host, RouterConfig::default());
  router.start().await;

  router.dispatch(UiEvent::PostLink { slug: "p0".into() }).await;
  let host = router.host();
  assert!(host.element(DETAIL_ID).unwrap().visible);
  assert!(!host.element("page-home").unwrap().visible);
  assert!(host.html(DETAIL_ID).contains("<p>Body</p>"));
  assert!(host.html(CONTENT_ID).contains("<h1>Home</h1>"));
}

#[tokio::test]
async fn failed_preload_falls_back_to_fetching() {
  let host = FakeHost::shell("/");
  with_pages(&host);
  host.route("/api/pages", 500, "");
  let router = Router::new(host, RouterConfig::default());

  assert_eq!(router.start().await, Outcome::Committed(View::Page(PageName::Home)));
  assert!(!router.is_preloaded());
  assert_eq!(router.host().html(CONTENT_ID), "<h1>Home</h1>");
  assert_eq!(router.host().fetch_count("/api/page?name=home"), 1);
}

#[tokio::test]
async fn incomplete_preload_is_discarded() {
  let host = FakeHost::shell("/");
  with_pages(&host);
  host.route_json("/api/pages", &json!({"pages": {"home": record("home", "<h1>Home</h1>")}}));
  let router = Router::new(host, RouterConfig::default());
  router.start().await;
  assert!(!router.is_preloaded());
  assert!(!router.host().has_element("page-home"));
}

// -- list components --

#[tokio::test]
async fn blog_list_starts_on_query_page_and_syncs_url() {
  let router = router("/blog?page=2");
  with_posts(router.host(), 10);
  router.start().await;

  assert_eq!(router.list_page(ListKind::Blog), Some(2));
  let host = router.host();
  assert!(host.html("blog-posts").contains("Post 4"));
  assert!(!host.html("blog-posts").contains("Post 0"));
  assert!(host.html("blog-pagination").contains("pagination-btn active\" data-page=\"2\""));

  let outcome =
    router.dispatch(UiEvent::Paginate { list: ListKind::Blog, control: PageControl::Next }).await;
  assert_eq!(outcome, Outcome::Committed(View::Page(PageName::Blog)));
  assert_eq!(router.list_page(ListKind::Blog), Some(3));
  assert_eq!(
    last_op(host),
    Some(HistoryOp::Replace(json!({"page": "blog"}), "/blog?page=3".into()))
  );
  assert_eq!(*host.scrolled.borrow(), ["blog-posts"]);

  let noop =
    router.dispatch(UiEvent::Paginate { list: ListKind::Blog, control: PageControl::Next }).await;
  assert_eq!(noop, Outcome::Ignored { prevent_default: true });
  assert_eq!(router.list_page(ListKind::Blog), Some(3));
}

#[tokio::test]
async fn nav_to_blog_resets_to_first_page() {
  let router = router("/");
  with_posts(router.host(), 10);
  router.start().await;
  router.dispatch(nav("/blog")).await;
  assert_eq!(router.list_page(ListKind::Blog), Some(1));
}

#[tokio::test]
async fn projects_list_does_not_touch_history() {
  let router = router("/projects");
  let projects: Vec<Value> =
    (0..8).map(|i| json!({"slug": format!("t{i}"), "title": format!("Tool {i}")})).collect();
  router.host().route_json("/api/projects/list", &json!({ "projects": projects }));
  router.start().await;
  let before = router.host().history.borrow().len();

  let outcome = router
    .dispatch(UiEvent::Paginate { list: ListKind::Projects, control: PageControl::Page(2) })
    .await;
  assert_eq!(outcome, Outcome::Committed(View::Page(PageName::Projects)));
  assert_eq!(router.host().history.borrow().len(), before);
  assert!(router.host().html("projects-list").contains("Tool 7"));
}

#[tokio::test]
async fn list_failure_stays_inside_the_list() {
  let router = router("/");
  router.start().await;
  router.host().route("/api/blog/list", 500, "");

  assert_eq!(router.dispatch(nav("/blog")).await, Outcome::Committed(View::Page(PageName::Blog)));
  assert_eq!(router.host().html("blog-posts"), LIST_ERROR);
  assert_eq!(router.list_page(ListKind::Blog), None);
}

#[tokio::test]
async fn paginate_without_list_is_ignored() {
  let router = router("/");
  router.start().await;
  let outcome = router
    .dispatch(UiEvent::Paginate { list: ListKind::Blog, control: PageControl::Page(2) })
    .await;
  assert_eq!(outcome, Outcome::Ignored { prevent_default: true });
}
