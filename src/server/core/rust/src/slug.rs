/* src/server/core/rust/src/slug.rs */

const MARKDOWN_EXTENSION: &str = ".md";

/// URL-safe identifier for a content file or project directory: extension
/// dropped, lowercased, every run of non-alphanumerics collapsed to `-`,
/// no leading or trailing dash.
pub fn slug_from_filename(filename: &str) -> String {
  let stem = filename.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(filename);
  ::slug::slugify(stem)
}

pub(crate) fn is_markdown(filename: &str) -> bool {
  filename.ends_with(MARKDOWN_EXTENSION)
}
