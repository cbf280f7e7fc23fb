/* src/server/injector/rust/src/render.rs */

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::helpers::{resolve, stringify};

fn placeholder_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\{\{([^}]+)\}\}").expect("placeholder pattern"))
}

/// Replace every `{{path}}` in `template` with the value found at `path` in
/// `data`. Values are inserted as-is (fragments are trusted author HTML).
pub fn inject(template: &str, data: &Value) -> String {
  placeholder_re()
    .replace_all(template, |caps: &Captures<'_>| {
      let path = caps[1].trim();
      resolve(path, data).and_then(stringify).unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

/// Trimmed paths of every placeholder in `template`, in document order.
pub fn placeholders(template: &str) -> Vec<String> {
  placeholder_re().captures_iter(template).map(|caps| caps[1].trim().to_string()).collect()
}
