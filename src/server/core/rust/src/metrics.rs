/* src/server/core/rust/src/metrics.rs */

use std::future::Future;
use std::pin::Pin;

use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;

use crate::errors::FolioError;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

const GITHUB_API: &str = "https://api.github.com";

/// Remote source for the monthly commit count shown on the home page.
pub trait CommitSource: Send + Sync {
  fn monthly_commits(&self) -> BoxFuture<Result<u64, FolioError>>;
}

/// Fixed count. Used when no GitHub account is configured, and in tests.
pub struct StaticCommits(pub u64);

impl CommitSource for StaticCommits {
  fn monthly_commits(&self) -> BoxFuture<Result<u64, FolioError>> {
    let count = self.0;
    Box::pin(async move { Ok(count) })
  }
}

/// Always fails with `UPSTREAM_ERROR`.
pub struct UnavailableCommits;

impl CommitSource for UnavailableCommits {
  fn monthly_commits(&self) -> BoxFuture<Result<u64, FolioError>> {
    Box::pin(async { Err(FolioError::upstream("commit source unavailable")) })
  }
}

#[derive(Deserialize)]
struct CommitSearchResponse {
  total_count: u64,
}

/// Commits authored by `username` in the current calendar month, counted
/// through the commit search API.
#[derive(Clone)]
pub struct GithubCommits {
  client: reqwest::Client,
  api_base: String,
  username: String,
  token: Option<String>,
}

impl GithubCommits {
  pub fn new(username: impl Into<String>, token: Option<String>) -> Self {
    Self {
      client: reqwest::Client::new(),
      api_base: GITHUB_API.to_string(),
      username: username.into(),
      token,
    }
  }

  pub fn api_base(mut self, base: impl Into<String>) -> Self {
    self.api_base = base.into();
    self
  }

  fn search_query(&self, today: NaiveDate) -> String {
    let (start, end) = month_range(today);
    format!("author:{} author-date:{start}..{end}", self.username)
  }
}

impl CommitSource for GithubCommits {
  fn monthly_commits(&self) -> BoxFuture<Result<u64, FolioError>> {
    let this = self.clone();
    Box::pin(async move {
      let token = this
        .token
        .as_deref()
        .ok_or_else(|| FolioError::upstream("GitHub token not configured"))?;
      let query = this.search_query(Local::now().date_naive());
      let resp = this
        .client
        .get(format!("{}/search/commits", this.api_base))
        .query(&[("q", query.as_str()), ("per_page", "1")])
        .bearer_auth(token)
        .header("Accept", "application/vnd.github+json")
        .header("X-GitHub-Api-Version", "2022-11-28")
        .header("User-Agent", "folio")
        .send()
        .await
        .map_err(|e| FolioError::upstream(format!("GitHub API error: {e}")))?;

      if !resp.status().is_success() {
        return Err(FolioError::upstream(format!("GitHub API returned {}", resp.status())));
      }

      let data: CommitSearchResponse = resp
        .json()
        .await
        .map_err(|e| FolioError::upstream(format!("failed to parse GitHub response: {e}")))?;
      Ok(data.total_count)
    })
  }
}

/// First and last day of the month containing `day`.
pub fn month_range(day: NaiveDate) -> (NaiveDate, NaiveDate) {
  let start = day.with_day(1).unwrap_or(day);
  let next_month = if day.month() == 12 {
    NaiveDate::from_ymd_opt(day.year() + 1, 1, 1)
  } else {
    NaiveDate::from_ymd_opt(day.year(), day.month() + 1, 1)
  };
  let end = next_month.and_then(|d| d.pred_opt()).unwrap_or(day);
  (start, end)
}
