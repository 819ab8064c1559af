// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Load the JSON report configuration, overlay environment credentials, validate, and apply defaults
// role: config/validation
// inputs: Config file path; env TRELLO_API_KEY, TRELLO_API_TOKEN, TRELLO_BOARD_ID
// outputs: ReportConfig (typed, defaults applied), BoardAccess for list discovery, or ValidationError with every violated field
// side_effects: load_config/load_board_access read one file; validation is pure
// schema: schemas/trello-to-markdown.config.schema.json (embedded); custom messages, board URLs and duplicate ids are checked by hand
// invariants:
// - At least one ListConfig; list ids are unique and non-empty
// - recent_activity_hours > 0 after validation (default 12)
// - Credentials never appear in Debug output
// errors: File read/parse failures surface as ReportError::ConfigFile; field problems as ReportError::Configuration
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use jsonschema::error::ValidationErrorKind;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FieldViolation, ReportError, ValidationError};

pub const DEFAULT_CONFIG_PATH: &str = "./trello-to-markdown.config.json";
pub const DEFAULT_RECENT_ACTIVITY_HOURS: f64 = 12.0;

/// Environment variables that take precedence over the file's credential fields.
const ENV_OVERRIDES: [(&str, &str); 3] = [
  ("TRELLO_API_KEY", "apiKey"),
  ("TRELLO_API_TOKEN", "apiToken"),
  ("TRELLO_BOARD_ID", "board"),
];

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListMode {
  All,
  #[default]
  WithRecentActivity,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListConfig {
  pub id: String,
  pub name: String,
  pub title: Option<String>,
  pub mode: ListMode,
}

impl ListConfig {
  pub fn display_title(&self) -> &str {
    self.title.as_deref().unwrap_or(&self.name)
  }
}

#[derive(Clone, PartialEq)]
pub struct Credentials {
  pub api_key: String,
  pub api_token: String,
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("api_key", &"[redacted]")
      .field("api_token", &"[redacted]")
      .finish()
  }
}

/// What `--show-lists` needs: enough to reach the board, no list configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardAccess {
  pub credentials: Credentials,
  pub board_id: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportConfig {
  pub credentials: Credentials,
  pub board_id: String,
  pub heading: String,
  pub ignore_archived: bool,
  pub recent_activity_hours: f64,
  pub lists: Vec<ListConfig>,
}

/// Extract the board id from a Trello board URL (`https://trello.com/b/<id>/<slug>`).
pub fn extract_board_id(url: &str) -> Option<String> {
  static RE_BOARD: Lazy<regex::Regex> = Lazy::new(|| regex::Regex::new(r"trello\.com/b/([^/?#]+)").unwrap());

  RE_BOARD
    .captures(url)
    .and_then(|c| c.get(1))
    .map(|m| m.as_str().to_string())
}

/// Read the config file as untyped JSON and overlay environment credentials.
fn read_config_value(path: &Path) -> Result<Value, ReportError> {
  let text = std::fs::read_to_string(path).map_err(|e| ReportError::ConfigFile {
    path: path.to_path_buf(),
    message: if e.kind() == std::io::ErrorKind::NotFound {
      "file not found; create it (see --show-lists to discover list ids)".to_string()
    } else {
      e.to_string()
    },
  })?;

  let mut raw: Value = serde_json::from_str(&text).map_err(|e| ReportError::ConfigFile {
    path: path.to_path_buf(),
    message: format!("invalid JSON: {}", e),
  })?;

  apply_env_overrides(&mut raw, |name| std::env::var(name).ok());

  Ok(raw)
}

/// Read the config file, overlay environment credentials, and validate.
pub fn load_config(path: &Path) -> Result<ReportConfig, ReportError> {
  let raw = read_config_value(path)?;
  Ok(validate_config(&raw)?)
}

/// Like [`load_config`], but only credentials and board are required.
pub fn load_board_access(path: &Path) -> Result<BoardAccess, ReportError> {
  let raw = read_config_value(path)?;
  Ok(validate_board_access(&raw)?)
}

/// Overlay credential fields from the environment when set and non-empty.
///
/// `lookup` is injected so callers (and tests) control the environment source.
pub fn apply_env_overrides<F>(raw: &mut Value, lookup: F)
where
  F: Fn(&str) -> Option<String>,
{
  let Some(obj) = raw.as_object_mut() else { return };

  for (var, field) in ENV_OVERRIDES {
    if let Some(v) = lookup(var).filter(|v| !v.trim().is_empty()) {
      obj.insert(field.to_string(), Value::String(v));
    }
  }
}

// --- Schema-backed validation ---

const CONFIG_SCHEMA: &str = include_str!("../schemas/trello-to-markdown.config.schema.json");

static CONFIG_VALIDATOR: Lazy<jsonschema::Validator> = Lazy::new(|| {
  let schema: Value = serde_json::from_str(CONFIG_SCHEMA).expect("embedded config schema is JSON");
  jsonschema::validator_for(&schema).expect("embedded config schema compiles")
});

/// Messages reported for any violation on these fields, replacing the schema's wording.
const FIELD_MESSAGES: [(&str, &str); 4] = [
  ("apiKey", "API key is required"),
  ("apiToken", "API token is required"),
  ("board", "Board ID is required"),
  ("lists", "At least one list configuration is required"),
];

#[derive(Copy, Clone, PartialEq, Eq)]
enum Scope {
  BoardAccess,
  Report,
}

/// JSON pointer (`/lists/0/id`) to the dotted form used in messages (`lists[0].id`).
/// The document root is `$`.
fn field_path(pointer: &str) -> String {
  if pointer.is_empty() {
    return "$".to_string();
  }

  let mut out = String::new();
  for segment in pointer.trim_start_matches('/').split('/') {
    let segment = segment.replace("~1", "/").replace("~0", "~");
    if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
      out.push_str(&format!("[{}]", segment));
    } else {
      if !out.is_empty() {
        out.push('.');
      }
      out.push_str(&segment);
    }
  }
  out
}

fn schema_violation(error: &jsonschema::ValidationError<'_>) -> FieldViolation {
  let mut path = field_path(error.instance_path.as_str());

  // Missing properties are reported on their parent object.
  if let ValidationErrorKind::Required { property } = &error.kind {
    if let Some(name) = property.as_str() {
      path = if path == "$" { name.to_string() } else { format!("{}.{}", path, name) };
    }
  }

  let message = FIELD_MESSAGES
    .iter()
    .find(|(field, _)| *field == path)
    .map(|(_, message)| message.to_string())
    .unwrap_or_else(|| error.to_string());

  FieldViolation { path, message }
}

fn is_list_path(path: &str) -> bool {
  path == "lists" || path.starts_with("lists[") || path.starts_with("lists.")
}

/// Configured list ids must be unique; the schema cannot express uniqueness by key.
fn duplicate_list_ids(raw: &Value) -> Vec<FieldViolation> {
  let Some(lists) = raw.get("lists").and_then(Value::as_array) else {
    return Vec::new();
  };

  let mut seen: HashSet<&str> = HashSet::new();
  lists
    .iter()
    .enumerate()
    .filter_map(|(i, entry)| {
      let id = entry.get("id")?.as_str()?;
      if id.is_empty() || seen.insert(id) {
        return None;
      }
      Some(FieldViolation { path: format!("lists[{}].id", i), message: format!("duplicate list id \"{}\"", id) })
    })
    .collect()
}

fn check(raw: &Value, scope: Scope) -> Result<(), ValidationError> {
  let mut violations: Vec<FieldViolation> = CONFIG_VALIDATOR.iter_errors(raw).map(|e| schema_violation(&e)).collect();

  if let Some(board) = raw.get("board").and_then(Value::as_str) {
    if board.contains("trello.com") && extract_board_id(board).is_none() {
      violations.push(FieldViolation { path: "board".into(), message: "Invalid Trello board URL".into() });
    }
  }

  match scope {
    Scope::Report => violations.extend(duplicate_list_ids(raw)),
    Scope::BoardAccess => violations.retain(|v| !is_list_path(&v.path)),
  }

  if violations.is_empty() {
    Ok(())
  } else {
    Err(ValidationError { violations })
  }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
  api_key: String,
  api_token: String,
  board: String,
  heading: Option<String>,
  ignore_archived: Option<bool>,
  recent_activity_hours: Option<f64>,
  lists: Vec<RawList>,
}

#[derive(Deserialize)]
struct RawList {
  id: String,
  name: String,
  title: Option<String>,
  mode: Option<ListMode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBoardAccess {
  api_key: String,
  api_token: String,
  board: String,
}

fn typed<T: DeserializeOwned>(raw: &Value) -> Result<T, ValidationError> {
  serde_json::from_value(raw.clone()).map_err(|e| ValidationError {
    violations: vec![FieldViolation { path: "$".into(), message: e.to_string() }],
  })
}

fn resolve_board_id(board: &str) -> String {
  if board.contains("trello.com") {
    extract_board_id(board).unwrap_or_else(|| board.to_string())
  } else {
    board.to_string()
  }
}

/// Validate an untyped configuration payload, reporting every violation.
pub fn validate_config(raw: &Value) -> Result<ReportConfig, ValidationError> {
  check(raw, Scope::Report)?;
  let parsed: RawConfig = typed(raw)?;

  Ok(ReportConfig {
    credentials: Credentials { api_key: parsed.api_key, api_token: parsed.api_token },
    board_id: resolve_board_id(&parsed.board),
    heading: parsed.heading.unwrap_or_default(),
    ignore_archived: parsed.ignore_archived.unwrap_or(true),
    recent_activity_hours: parsed.recent_activity_hours.unwrap_or(DEFAULT_RECENT_ACTIVITY_HOURS),
    lists: parsed
      .lists
      .into_iter()
      .map(|l| ListConfig { id: l.id, name: l.name, title: l.title, mode: l.mode.unwrap_or_default() })
      .collect(),
  })
}

/// Validate only what is needed to reach the board; `lists` may be absent or empty.
pub fn validate_board_access(raw: &Value) -> Result<BoardAccess, ValidationError> {
  check(raw, Scope::BoardAccess)?;
  let parsed: RawBoardAccess = typed(raw)?;

  Ok(BoardAccess {
    credentials: Credentials { api_key: parsed.api_key, api_token: parsed.api_token },
    board_id: resolve_board_id(&parsed.board),
  })
}
