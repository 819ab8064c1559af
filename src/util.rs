// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for logging setup, output writing, and man page rendering
// role: utilities/helpers
// inputs: verbosity flag, RUST_LOG; output target; clap CommandFactory
// outputs: Global tracing subscriber; report text on stdout or file; man page text
// side_effects: init_tracing installs a global subscriber; write_output creates parent dirs and writes files
// invariants:
// - Logs always go to stderr so stdout carries only the report
// - write_output terminates the text with exactly one newline
// errors: IO errors bubble with path context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::CommandFactory;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

  let _ = fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

/// Filter used when `RUST_LOG` is unset.
fn default_directives(verbose: bool) -> &'static str {
  if verbose {
    "warn,trellomd=debug"
  } else {
    "warn"
  }
}

/// Write `text` plus a trailing newline to stdout ("-") or to a file path.
pub fn write_output(out: &str, text: &str) -> Result<()> {
  if out == "-" {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    writeln!(lock, "{}", text).context("writing to stdout")?;
    return Ok(());
  }

  let path = Path::new(out);
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
  }

  std::fs::write(path, format!("{}\n", text)).with_context(|| format!("writing {}", path.display()))?;
  tracing::info!(path = %path.display(), "report written");

  Ok(())
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
