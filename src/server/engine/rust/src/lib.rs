/* src/server/engine/rust/src/lib.rs */

pub mod content;
pub mod escape;
pub mod page;
pub mod pagination;

// Public API re-exports
pub use content::{
  BlogListResponse, BlogPostSummary, ContentMetadata, DetailResponse, ErrorBody, ErrorDetail,
  ProjectListResponse, ProjectSummary, ViewResponse, ViewTotalsResponse,
};
pub use escape::escape_html;
pub use page::{PageName, PageRecord, PagesResponse, UnknownPage};
pub use pagination::{PageSlot, Paginator, page_slice, total_pages, visible_pages};
