// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one run: load config, build the board api, optionally preflight, fetch, render, write
// role: processing/orchestrator
// inputs: EffectiveConfig from the CLI, optional now override
// outputs: Report text on stdout or at --out; board list listing for --show-lists
// side_effects: Reads config file; network calls via BoardApi; writes output file
// invariants:
// - Configuration is fully validated before any network access (board access only for --show-lists)
// - Output is written only after the whole report rendered; failures never emit a partial report
// errors: Propagates ReportError/IO errors with context to main
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::cli::EffectiveConfig;
use crate::config::{load_board_access, load_config, ReportConfig};
use crate::error::ReportError;
use crate::preflight::{check_board_lists, format_board_lists};
use crate::render::render_report;
use crate::source::trello_api::{make_default_api, BoardApi};
use crate::source::CardSource;
use crate::util;
use crate::window::{activity_cutoff, effective_now};

/// Fetch and render the report for an already validated configuration.
pub fn generate_report(config: &ReportConfig, api: &dyn BoardApi, now: DateTime<Utc>) -> Result<String, ReportError> {
  let since = activity_cutoff(now, config.recent_activity_hours);
  tracing::debug!(since = %since, lists = config.lists.len(), "generating report");

  let cards_by_list = CardSource::new(api, &config.board_id, since).fetch_cards(&config.lists)?;

  Ok(render_report(config, &cards_by_list))
}

pub fn run(cfg: &EffectiveConfig) -> Result<()> {
  if cfg.show_lists {
    return show_lists(cfg);
  }

  let config = load_config(&cfg.config_path)?;
  let api = make_default_api(config.credentials.clone(), cfg.timeout).map_err(ReportError::from)?;

  if cfg.check_lists {
    check_board_lists(api.as_ref(), &config)?;
  }

  let now = effective_now(cfg.now_override);
  let text = generate_report(&config, api.as_ref(), now)?;

  util::write_output(&cfg.out, &text).with_context(|| format!("writing report to {}", cfg.out))
}

/// List discovery: needs credentials and board only, so a config without lists works.
fn show_lists(cfg: &EffectiveConfig) -> Result<()> {
  let access = load_board_access(&cfg.config_path)?;
  let api = make_default_api(access.credentials, cfg.timeout).map_err(ReportError::from)?;
  let lists = api.lists_on_board(&access.board_id).map_err(ReportError::from)?;

  util::write_output(&cfg.out, &format_board_lists(&lists))
}
