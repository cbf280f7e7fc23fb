/* src/server/core/rust/src/lib.rs */

pub mod api;
pub mod composer;
pub mod content;
pub mod errors;
pub mod markdown;
pub mod metrics;
pub mod server;
pub mod shell;
pub mod slug;
pub mod views;

// Re-exports for ergonomic use
pub use api::{ContentApi, parse_page_name, wrap_markdown};
pub use composer::{Author, HomeData, Metrics, PageComposer, Professional};
pub use content::{BrokenEntry, ContentStore, Entry, SlugCollision};
pub use errors::FolioError;
pub use metrics::{BoxFuture, CommitSource, GithubCommits, StaticCommits, UnavailableCommits};
pub use server::{FolioParts, FolioServer, StaticMount};
pub use shell::{Shell, error_page};
pub use views::{CooldownTable, DEFAULT_COOLDOWN, ViewCounter, ViewStore};
