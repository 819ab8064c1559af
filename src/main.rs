use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod error;
mod filter;
mod links;
mod model;
mod preflight;
mod render;
mod report;
mod source;
mod util;
mod window;

use crate::cli::{normalize, Cli};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  util::init_tracing(cli.verbose);

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: load config, fetch, render, write
  crate::report::run(&cfg)
}
