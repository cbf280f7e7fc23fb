/* src/server/engine/rust/src/content.rs */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Frontmatter of a post or project. Unknown keys are kept in `extra` so
/// detail responses echo everything the author wrote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentMetadata {
  pub title: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub excerpt: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
  #[serde(flatten)]
  pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPostSummary {
  pub slug: String,
  pub title: String,
  pub date: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub excerpt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
  pub slug: String,
  pub title: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date: Option<String>,
}

/// Single post or project, `html` already wrapped in its styling container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailResponse {
  pub slug: String,
  pub metadata: ContentMetadata,
  pub html: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogListResponse {
  pub posts: Vec<BlogPostSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectListResponse {
  pub projects: Vec<ProjectSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewResponse {
  pub slug: String,
  pub views: u64,
  pub counted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewTotalsResponse {
  pub total: u64,
  pub views: BTreeMap<String, u64>,
}

/// Structured error payload returned by every API route on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
  pub ok: bool,
  pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
  pub code: String,
  pub message: String,
}

impl ErrorBody {
  pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
    Self { ok: false, error: ErrorDetail { code: code.into(), message: message.into() } }
  }
}
