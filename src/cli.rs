use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::DEFAULT_CONFIG_PATH;
use crate::source::trello_api::DEFAULT_TIMEOUT;
use crate::window::parse_now_override;

#[derive(Parser, Debug)]
#[command(
    name = "trellomd",
    version,
    about = "Render Trello board lists as a markdown activity report",
    long_about = None
)]
pub struct Cli {
  /// Path to the JSON report configuration
  #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
  pub config: PathBuf,

  /// Output location: file path, or "-" for stdout
  #[arg(long, default_value = "-")]
  pub out: String,

  /// Per-request timeout in seconds
  #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
  pub timeout_secs: u64,

  /// Print the board's open lists (id and name) and exit; useful when writing the config
  #[arg(long)]
  pub show_lists: bool,

  /// Verify the configured lists exist on the board before fetching cards
  #[arg(long)]
  pub check_lists: bool,

  /// Log pipeline progress to stderr
  #[arg(long, short)]
  pub verbose: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant used for the activity window (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug)]
pub struct EffectiveConfig {
  pub config_path: PathBuf,
  pub out: String,
  pub timeout: Duration,
  pub show_lists: bool,
  pub check_lists: bool,
  pub now_override: Option<DateTime<Utc>>,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  if cli.timeout_secs == 0 {
    bail!("--timeout-secs must be at least 1");
  }

  let now_override = match cli.now_override.as_deref() {
    Some(raw) => match parse_now_override(Some(raw)) {
      Some(dt) => Some(dt),
      None => bail!("invalid --now-override {:?}; expected RFC3339 or YYYY-MM-DDTHH:MM:SS", raw),
    },
    None => None,
  };

  if cli.show_lists && cli.check_lists {
    bail!("Ambiguous mode: choose only one of --show-lists | --check-lists");
  }

  Ok(EffectiveConfig {
    config_path: cli.config,
    out: cli.out,
    timeout: Duration::from_secs(cli.timeout_secs),
    show_lists: cli.show_lists,
    check_lists: cli.check_lists,
    now_override,
  })
}
