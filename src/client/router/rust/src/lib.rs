/* src/client/router/rust/src/lib.rs */

//! Client-side navigation for Folio pages. The router owns navigation state
//! and talks to the browser only through the traits in `capability`, so a
//! wasm binding and the in-memory test host drive the same code.

pub mod capability;
pub mod html;
pub mod listing;
pub mod navigation;
pub mod view;

#[cfg(test)]
mod testing;

pub use capability::{Document, Fetch, FetchResponse, History, Host, MetaTag, Timer};
pub use listing::{ListComponent, ListKind, PageControl};
pub use navigation::{
  CONTENT_ID, DETAIL_ID, FADE, Modifiers, NavError, NavigationState, Outcome, Router, RouterConfig,
  UiEvent,
};
pub use view::{HistoryState, View};
