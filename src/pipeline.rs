// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Drive one export run: authenticate, probe, paginate, persist, logging each step
// role: processing/orchestrator
// inputs: EffectiveConfig, Settings, &dyn ClientFactory, RunLog
// outputs: RunOutcome; the .xlsx file when every page succeeded
// side_effects: Remote calls via the factory's client; writes the spreadsheet; appends log lines
// invariants:
// - No spreadsheet is written unless pagination completed without error
// - Authentication and query failures are logged and end the run without a process error
// - A failed save is logged; the run still counts as having retrieved its data
// errors: Converted into RunOutcome variants; nothing propagates
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::PathBuf;

use crate::analytics::ClientFactory;
use crate::cli::EffectiveConfig;
use crate::error::ExtractError;
use crate::extract::{self, PageCursor};
use crate::runlog::RunLog;
use crate::settings::Settings;
use crate::sheet;

#[derive(Debug)]
pub enum RunOutcome {
  Saved { path: PathBuf, rows: usize },
  SaveFailed { rows: usize, error: ExtractError },
  Aborted(ExtractError),
}

pub fn run(cfg: &EffectiveConfig, settings: &Settings, factory: &dyn ClientFactory, log: &RunLog) -> RunOutcome {
  let api = match factory.connect(&settings.service_account) {
    Ok(api) => api,
    Err(e) => {
      log.line(e.to_string());
      return RunOutcome::Aborted(e);
    }
  };

  let property_id = settings.property_id.as_str();
  log.line(format!("Using GA4 property ID: {}", property_id));

  let total_rows = match extract::probe_row_count(api.as_ref(), property_id, &cfg.window) {
    Ok(n) => n,
    Err(e) => {
      log.line(format!("Failed to retrieve total row count: {}", e));
      return RunOutcome::Aborted(e);
    }
  };
  log.line(format!("Total rows to retrieve: {}", total_rows));

  let cursor = PageCursor::new(total_rows);
  log.line(format!("Total pages estimated: {}", cursor.estimated_pages()));

  let rows = match extract::fetch_all_rows(api.as_ref(), property_id, &cfg.window, cursor, log) {
    Ok(rows) => rows,
    Err(e) => {
      log.line(format!("Error retrieving report: {}", e));
      return RunOutcome::Aborted(e);
    }
  };
  log.line("All data processing complete.");

  let path = sheet::output_path(&cfg.out_dir, &cfg.subfolder, &cfg.window);
  match sheet::write_report(&path, &rows) {
    Ok(()) => {
      log.line(format!("Saved {} rows to {}.", rows.len(), path.display()));
      RunOutcome::Saved { path, rows: rows.len() }
    }
    Err(e) => {
      log.line(e.to_string());
      RunOutcome::SaveFailed { rows: rows.len(), error: e }
    }
  }
}
