/* src/cli/core/src/site.rs */

//! Wires a loaded config into the server core.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use folio_server::{
  CommitSource, ContentApi, ContentStore, CooldownTable, GithubCommits, PageComposer,
  StaticCommits, ViewCounter, ViewStore,
};
use tracing::{info, warn};

use crate::config::LoadedConfig;

pub struct Site {
  pub content: ContentStore,
  pub views: Arc<ViewStore>,
  pub api: ContentApi,
}

impl Site {
  pub fn assemble(loaded: &LoadedConfig) -> Self {
    let config = &loaded.config;
    let content = ContentStore::new(loaded.blog_dir(), loaded.projects_dir());
    let views = Arc::new(ViewStore::new(loaded.views_path()));
    let composer = PageComposer::new(
      loaded.pages_dir(),
      loaded.home_data_path(),
      content.clone(),
      Arc::clone(&views),
      commit_source(loaded),
    )
    .title_suffix(&config.site.title_suffix);
    let cooldown = CooldownTable::new(Duration::from_secs(config.views.cooldown_secs));
    let counter = Arc::new(ViewCounter::new(Arc::clone(&views), cooldown));
    let api = ContentApi::new(composer, content.clone(), counter);
    Self { content, views, api }
  }

  /// Refuse duplicate slugs, then drop view counts for posts that no longer
  /// exist.
  pub async fn reconcile(&self) -> Result<()> {
    let collisions = self.content.find_collisions().await;
    if !collisions.is_empty() {
      for c in &collisions {
        warn!(slug = %c.slug, sources = ?c.sources, "slug collision");
      }
      bail!("{} slug collision(s); run `folio check` for details", collisions.len());
    }
    let slugs = self.content.blog_slugs().await;
    let removed = self.views.prune(&slugs).await;
    info!(posts = slugs.len(), removed, "content reconciled");
    Ok(())
  }
}

fn commit_source(loaded: &LoadedConfig) -> Arc<dyn CommitSource> {
  let Some(github) = &loaded.config.github else {
    return Arc::new(StaticCommits(0));
  };
  let Some(username) = github.username() else {
    warn!("github section has no username, using the configured commit count");
    return Arc::new(StaticCommits(0));
  };
  let Some(token) = std::env::var(&github.token_env).ok().filter(|t| !t.is_empty()) else {
    warn!(var = %github.token_env, "no GitHub token set, using the configured commit count");
    return Arc::new(StaticCommits(0));
  };
  let source = GithubCommits::new(username, Some(token));
  match &github.api_base {
    Some(base) => Arc::new(source.api_base(base.trim_end_matches('/'))),
    None => Arc::new(source),
  }
}
