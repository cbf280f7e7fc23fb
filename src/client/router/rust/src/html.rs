/* src/client/router/rust/src/html.rs */

//! Markup the router writes into the document.

use chrono::NaiveDate;
use folio_engine::{BlogPostSummary, PageName, PageSlot, Paginator, ProjectSummary, escape_html};

pub const PAGE_ERROR: &str = "<h1>Error loading page</h1><p>Please try again.</p>";
pub const POST_ERROR: &str = "<h1>Error loading post</h1><p>Please try again.</p>";
pub const PROJECT_ERROR: &str = "<h1>Error loading project</h1><p>Please try again.</p>";
pub const NO_POSTS: &str = "<p class=\"no-posts\">No blog posts yet. Check back soon!</p>";
pub const NO_PROJECTS: &str = "<p class=\"no-projects\">No projects yet. Check back soon!</p>";
pub const LIST_ERROR: &str = "<p class=\"list-error\">Could not load this list. Please try again.</p>";

pub fn page_section_id(page: PageName) -> String {
  format!("page-{page}")
}

/// One hidden section per preloaded page plus the detail container.
pub fn preload_sections<'a>(pages: impl Iterator<Item = (PageName, &'a str)>, detail_id: &str) -> String {
  let mut html = String::new();
  for (page, content) in pages {
    html.push_str(&format!(
      "<section id=\"{}\" class=\"page-view\" hidden>{content}</section>",
      page_section_id(page)
    ));
  }
  html.push_str(&format!("<section id=\"{detail_id}\" class=\"detail-view\" hidden></section>"));
  html
}

pub fn blog_post_article(body: &str) -> String {
  format!(
    "<article class=\"blog-post\">\
     <a href=\"/blog\" class=\"back-to-blog back-link\">&larr; Back to Blog</a>\
     <div class=\"blog-post-content\">{body}</div>\
     </article>"
  )
}

pub fn project_article(body: &str) -> String {
  format!(
    "<article class=\"project-detail\">\
     <a href=\"/projects\" class=\"back-to-projects back-link\">&larr; Back to Projects</a>\
     <div class=\"project-content\">{body}</div>\
     </article>"
  )
}

/// `2024-01-05` becomes `January 5, 2024`; anything else is shown as written.
pub fn long_date(date: &str) -> String {
  match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
    Ok(day) => day.format("%B %-d, %Y").to_string(),
    Err(_) => date.to_string(),
  }
}

pub fn blog_items(posts: &[BlogPostSummary]) -> String {
  if posts.is_empty() {
    return NO_POSTS.to_string();
  }
  posts
    .iter()
    .map(|post| {
      let slug = escape_html(&post.slug);
      format!(
        "<article class=\"blog-post-preview\">\
         <h3 class=\"post-title\"><a href=\"/blog/{slug}\" class=\"post-link\" data-slug=\"{slug}\">{}</a></h3>\
         <p class=\"post-date\">{}</p>\
         <p class=\"post-excerpt\">{}</p>\
         </article>",
        escape_html(&post.title),
        escape_html(&long_date(&post.date)),
        escape_html(post.excerpt.as_deref().unwrap_or("No excerpt available")),
      )
    })
    .collect()
}

pub fn project_items(projects: &[ProjectSummary]) -> String {
  if projects.is_empty() {
    return NO_PROJECTS.to_string();
  }
  projects
    .iter()
    .map(|project| {
      let slug = escape_html(&project.slug);
      let title = escape_html(&project.title);
      let image = project
        .image
        .as_deref()
        .map(|src| format!("<img class=\"project-image\" src=\"{}\" alt=\"{title}\">", escape_html(src)))
        .unwrap_or_default();
      let description = project
        .description
        .as_deref()
        .map(|d| format!("<p class=\"project-description\">{}</p>", escape_html(d)))
        .unwrap_or_default();
      format!(
        "<article class=\"project-card\">{image}\
         <h3 class=\"project-title\"><a href=\"/projects/{slug}\" class=\"project-link\" data-slug=\"{slug}\">{title}</a></h3>\
         {description}</article>"
      )
    })
    .collect()
}

/// Prev/next buttons around the page numbers. Empty for a single page.
pub fn pagination_controls<T>(paginator: &Paginator<T>) -> String {
  let total = paginator.total_pages();
  if total <= 1 {
    return String::new();
  }
  let current = paginator.current_page();
  let numbers: String = paginator
    .visible_pages()
    .into_iter()
    .map(|slot| match slot {
      PageSlot::Ellipsis => "<span class=\"pagination-ellipsis\">...</span>".to_string(),
      PageSlot::Page(n) => {
        let active = if n == current { " active" } else { "" };
        format!("<button class=\"pagination-btn{active}\" data-page=\"{n}\">{n}</button>")
      }
    })
    .collect();
  let prev_disabled = if paginator.has_prev() { "" } else { " disabled" };
  let next_disabled = if paginator.has_next() { "" } else { " disabled" };
  format!(
    "<nav class=\"pagination-controls\">\
     <button class=\"pagination-btn pagination-prev\" data-page=\"prev\"{prev_disabled}>&larr; Previous</button>\
     <div class=\"pagination-numbers\">{numbers}</div>\
     <button class=\"pagination-btn pagination-next\" data-page=\"next\"{next_disabled}>Next &rarr;</button>\
     </nav>"
  )
}
