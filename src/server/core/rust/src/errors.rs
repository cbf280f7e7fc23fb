/* src/server/core/rust/src/errors.rs */

use std::fmt;

/// Error carried across the content API boundary. Every variant of the
/// failure taxonomy maps to a code and an HTTP status; adapters turn it into
/// a structured response and never let it escape the request.
#[derive(Debug, Clone)]
pub struct FolioError {
  code: String,
  message: String,
  status: u16,
}

fn default_status(code: &str) -> u16 {
  match code {
    "VALIDATION_ERROR" => 400,
    "NOT_FOUND" => 404,
    "UPSTREAM_ERROR" => 502,
    "IO_ERROR" | "INTERNAL_ERROR" => 500,
    _ => 500,
  }
}

impl FolioError {
  pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
    Self { code: code.into(), message: message.into(), status }
  }

  pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
    let code = code.into();
    let status = default_status(&code);
    Self { code, message: message.into(), status }
  }

  pub fn validation(msg: impl Into<String>) -> Self {
    Self::with_code("VALIDATION_ERROR", msg)
  }

  pub fn not_found(msg: impl Into<String>) -> Self {
    Self::with_code("NOT_FOUND", msg)
  }

  /// A remote collaborator (metrics service) failed. Callers degrade to a
  /// fallback value; this never reaches a client.
  pub fn upstream(msg: impl Into<String>) -> Self {
    Self::with_code("UPSTREAM_ERROR", msg)
  }

  pub fn io(msg: impl Into<String>) -> Self {
    Self::with_code("IO_ERROR", msg)
  }

  pub fn internal(msg: impl Into<String>) -> Self {
    Self::with_code("INTERNAL_ERROR", msg)
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn status(&self) -> u16 {
    self.status
  }

  pub fn is_not_found(&self) -> bool {
    self.code == "NOT_FOUND"
  }
}

impl fmt::Display for FolioError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for FolioError {}

impl From<std::io::Error> for FolioError {
  fn from(err: std::io::Error) -> Self {
    if err.kind() == std::io::ErrorKind::NotFound {
      Self::not_found(err.to_string())
    } else {
      Self::io(err.to_string())
    }
  }
}
