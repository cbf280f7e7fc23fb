/* src/server/injector/rust/src/lib.rs */

//! `{{a.b.c}}` substitution for page fragments.
//!
//! Placeholders resolve by dotted path against a JSON object. Anything that
//! does not resolve stays in the output verbatim, so a missing data point
//! shows up as its placeholder instead of breaking the page.

mod helpers;
mod render;

pub use render::{inject, placeholders};
