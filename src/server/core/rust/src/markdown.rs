/* src/server/core/rust/src/markdown.rs */

//! Frontmatter + markdown → metadata + HTML. The renderer is pulldown-cmark;
//! this module only splits the document and validates the frontmatter.

use folio_engine::ContentMetadata;
use pulldown_cmark::{Options, Parser, html};

use crate::errors::FolioError;

const FENCE: &str = "---";

#[derive(Debug)]
pub struct Document {
  pub metadata: ContentMetadata,
  pub body: String,
  pub html: String,
}

/// Parse a document that opens with a `---` fenced YAML block. `title` is
/// mandatory; callers that need a date check it themselves.
pub fn parse_document(source: &str) -> Result<Document, FolioError> {
  let (yaml, body) = split_frontmatter(source)?;
  let metadata: ContentMetadata = serde_yaml::from_str(yaml)
    .map_err(|e| FolioError::validation(format!("invalid frontmatter: {e}")))?;
  if metadata.title.trim().is_empty() {
    return Err(FolioError::validation("frontmatter must have a title"));
  }
  Ok(Document { metadata, body: body.to_string(), html: render_html(body) })
}

pub fn render_html(markdown: &str) -> String {
  let mut options = Options::empty();
  options.insert(Options::ENABLE_TABLES);
  options.insert(Options::ENABLE_STRIKETHROUGH);
  options.insert(Options::ENABLE_FOOTNOTES);
  options.insert(Options::ENABLE_TASKLISTS);

  let mut out = String::with_capacity(markdown.len() * 3 / 2);
  html::push_html(&mut out, Parser::new_ext(markdown, options));
  out
}

fn split_frontmatter(input: &str) -> Result<(&str, &str), FolioError> {
  let input = input.strip_prefix('\u{feff}').unwrap_or(input);
  let rest = input
    .strip_prefix(FENCE)
    .and_then(|r| r.strip_prefix("\r\n").or_else(|| r.strip_prefix('\n')))
    .ok_or_else(|| FolioError::validation("document must begin with `---`"))?;

  let mut offset = 0;
  for line in rest.split_inclusive('\n') {
    if line.trim_end() == FENCE {
      return Ok((&rest[..offset], &rest[offset + line.len()..]));
    }
    offset += line.len();
  }
  Err(FolioError::validation("missing closing `---`"))
}
