// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed error taxonomy for configuration, board source, and report generation failures
// role: errors
// outputs: ValidationError (all field violations), SourceError (one failed request), ReportError (top level)
// invariants: Error messages never contain API credentials; ValidationError lists every violation found
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// One violated constraint on one configuration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
  /// Dotted/indexed field path, e.g. `lists[1].mode`.
  pub path: String,
  pub message: String,
}

impl fmt::Display for FieldViolation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.path, self.message)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
  pub violations: Vec<FieldViolation>,
}

impl ValidationError {
  pub fn has_path(&self, path: &str) -> bool {
    self.violations.iter().any(|v| v.path == path)
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Configuration validation failed:")?;
    for v in &self.violations {
      write!(f, "\n  - {}", v)?;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationError {}

/// Failure of a single request against the board service.
///
/// `endpoint` is the request path without query parameters, so credentials
/// passed as `key`/`token` never leak into messages.
#[derive(Debug, Error)]
pub enum SourceError {
  #[error("{endpoint} returned HTTP {status}")]
  Status { endpoint: String, status: u16 },

  #[error("request to {endpoint} failed: {message}")]
  Transport { endpoint: String, message: String },

  #[error("could not decode response from {endpoint}: {message}")]
  Decode { endpoint: String, message: String },
}

#[derive(Debug, Error)]
pub enum ReportError {
  #[error("could not read configuration file {}: {message}", path.display())]
  ConfigFile { path: PathBuf, message: String },

  #[error(transparent)]
  Configuration(#[from] ValidationError),

  #[error("board data unavailable: {0}")]
  SourceUnavailable(#[from] SourceError),

  #[error("The board does not contain any of the specified lists.")]
  NoConfiguredListsOnBoard,
}
