use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

use crate::util;
use crate::window::{self, ReportWindow};

#[derive(Parser, Debug)]
#[command(
    name = "ga4-report",
    version,
    about = "Export last month's GA4 traffic report to an .xlsx spreadsheet",
    long_about = None
)]
pub struct Cli {
  /// INI file with [service_account] credentials and [google_analytics] property_id
  #[arg(long, default_value = "ga4config.ini")]
  pub config: PathBuf,

  /// Base folder; the spreadsheet goes under <out>/<subfolder>, logs under <out>/log
  #[arg(long, default_value = ".")]
  pub out: PathBuf,

  /// Folder under --out that receives the spreadsheet
  #[arg(long, default_value = "Ga4data")]
  pub subfolder: String,

  /// Export this calendar month (YYYY-MM) instead of the previous one
  #[arg(long)]
  pub month: Option<String>,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override "today" when computing the previous month (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EffectiveConfig {
  pub config_path: PathBuf,
  pub out_dir: PathBuf, // absolute path for stable log lines
  pub subfolder: String,
  pub window: ReportWindow,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  if cli.subfolder.trim().is_empty() {
    bail!("--subfolder must not be empty");
  }

  let window = match &cli.month {
    Some(ym) => window::month_window(ym)?,
    None => {
      let pinned = cli.now_override.as_deref().map(window::parse_now_override).transpose()?;
      window::previous_month(window::effective_today(pinned))?
    }
  };

  Ok(EffectiveConfig {
    config_path: util::absolutize(&cli.config),
    out_dir: util::absolutize(&cli.out),
    subfolder: cli.subfolder,
    window,
  })
}
