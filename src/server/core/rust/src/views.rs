/* src/server/core/rust/src/views.rs */

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use folio_engine::{ViewResponse, ViewTotalsResponse};
use tracing::{info, warn};

pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(30);

/// Persisted `slug -> count` record in a single JSON file. Read failures
/// degrade to zero counts; write failures are logged and the in-memory
/// result is still returned.
#[derive(Debug)]
pub struct ViewStore {
  path: PathBuf,
  write_lock: tokio::sync::Mutex<()>,
}

impl ViewStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into(), write_lock: tokio::sync::Mutex::new(()) }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub async fn load(&self) -> BTreeMap<String, u64> {
    match tokio::fs::read_to_string(&self.path).await {
      Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(path = %self.path.display(), error = %e, "view counts unreadable, starting from zero");
        BTreeMap::new()
      }),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
      Err(e) => {
        warn!(path = %self.path.display(), error = %e, "failed to read view counts");
        BTreeMap::new()
      }
    }
  }

  pub async fn get(&self, slug: &str) -> u64 {
    self.load().await.get(slug).copied().unwrap_or(0)
  }

  pub async fn totals(&self) -> ViewTotalsResponse {
    let views = self.load().await;
    ViewTotalsResponse { total: views.values().sum(), views }
  }

  pub async fn increment(&self, slug: &str) -> u64 {
    let _guard = self.write_lock.lock().await;
    let mut views = self.load().await;
    let count = views.entry(slug.to_string()).or_insert(0);
    *count += 1;
    let count = *count;
    self.save(&views).await;
    count
  }

  /// Drop entries whose slug is not in `valid`. Returns how many were removed.
  pub async fn prune(&self, valid: &[String]) -> usize {
    let _guard = self.write_lock.lock().await;
    let mut views = self.load().await;
    let before = views.len();
    views.retain(|slug, _| valid.iter().any(|v| v == slug));
    let removed = before - views.len();
    if removed > 0 {
      self.save(&views).await;
      info!(removed, "pruned orphan view counts");
    }
    removed
  }

  /// Orphan slugs without modifying the file.
  pub async fn orphans(&self, valid: &[String]) -> Vec<String> {
    self.load().await.into_keys().filter(|slug| !valid.contains(slug)).collect()
  }

  async fn save(&self, views: &BTreeMap<String, u64>) {
    if let Some(parent) = self.path.parent()
      && let Err(e) = tokio::fs::create_dir_all(parent).await
    {
      warn!(path = %parent.display(), error = %e, "failed to create view count directory");
      return;
    }
    let body = match serde_json::to_string_pretty(views) {
      Ok(body) => body,
      Err(e) => {
        warn!(error = %e, "failed to encode view counts");
        return;
      }
    };
    if let Err(e) = tokio::fs::write(&self.path, body).await {
      warn!(path = %self.path.display(), error = %e, "failed to write view counts");
    }
  }
}

/// In-memory `(slug, client) -> last admitted` table. Process-scoped and
/// never persisted; a restart forgets every window.
#[derive(Debug)]
pub struct CooldownTable {
  window: Duration,
  seen: Mutex<HashMap<(String, String), Instant>>,
}

impl CooldownTable {
  pub fn new(window: Duration) -> Self {
    Self { window, seen: Mutex::new(HashMap::new()) }
  }

  pub fn window(&self) -> Duration {
    self.window
  }

  /// True when no admitted request for this pair happened within the window.
  /// Admission stamps `now`; a rejected request does not extend the window.
  pub fn admit(&self, slug: &str, client: &str, now: Instant) -> bool {
    let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
    seen.retain(|_, at| now.saturating_duration_since(*at) < self.window);
    let key = (slug.to_string(), client.to_string());
    if seen.contains_key(&key) {
      return false;
    }
    seen.insert(key, now);
    true
  }
}

impl Default for CooldownTable {
  fn default() -> Self {
    Self::new(DEFAULT_COOLDOWN)
  }
}

/// Cooldown filter in front of the persisted store.
#[derive(Debug)]
pub struct ViewCounter {
  store: Arc<ViewStore>,
  cooldown: CooldownTable,
}

impl ViewCounter {
  pub fn new(store: Arc<ViewStore>, cooldown: CooldownTable) -> Self {
    Self { store, cooldown }
  }

  pub fn store(&self) -> &Arc<ViewStore> {
    &self.store
  }

  pub async fn record_view(&self, slug: &str, client: &str) -> ViewResponse {
    self.record_view_at(slug, client, Instant::now()).await
  }

  pub async fn record_view_at(&self, slug: &str, client: &str, now: Instant) -> ViewResponse {
    if self.cooldown.admit(slug, client, now) {
      let views = self.store.increment(slug).await;
      ViewResponse { slug: slug.to_string(), views, counted: true }
    } else {
      let views = self.store.get(slug).await;
      ViewResponse { slug: slug.to_string(), views, counted: false }
    }
  }
}
