use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod analytics;
mod cli;
mod error;
mod extract;
mod model;
mod pipeline;
mod runlog;
mod settings;
mod sheet;
mod util;
mod window;

use crate::analytics::GoogleClientFactory;
use crate::cli::{Cli, normalize};
use crate::pipeline::RunOutcome;
use crate::runlog::RunLog;
use crate::settings::Settings;

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  init_tracing();

  // Phase 1: normalize CLI and fix the report window for the whole run
  let cfg = normalize(cli)?;
  let log = RunLog::new(&cfg.out_dir, &cfg.window);
  tracing::debug!(log = %log.path().display(), window = %cfg.window.file_tag(), "run configured");

  if cfg.out_dir.is_dir() {
    log.line(format!("Directory already exists at {}", cfg.out_dir.display()));
  } else {
    std::fs::create_dir_all(&cfg.out_dir)?;
    log.line(format!("Created directory at {}", cfg.out_dir.display()));
  }
  log.line("Starting the data retrieval process...");

  // Phase 2: configuration problems are the only fatal path; anyhow prints them on stderr
  let settings = match Settings::load(&cfg.config_path) {
    Ok(s) => s,
    Err(e) => {
      log.record(e.to_string());
      return Err(e.into());
    }
  };

  // Phase 3: authenticate, paginate, persist; failures are logged, not escalated
  let factory = GoogleClientFactory::new(settings.api_base.clone());
  match pipeline::run(&cfg, &settings, &factory, &log) {
    RunOutcome::Saved { path, rows } => tracing::info!(rows, path = %path.display(), "report saved"),
    RunOutcome::SaveFailed { rows, error } => tracing::warn!(rows, %error, "report retrieved but not saved"),
    RunOutcome::Aborted(error) => tracing::warn!(%error, "run aborted"),
  }

  Ok(())
}
