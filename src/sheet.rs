// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Persist the finished result table as a single-sheet .xlsx workbook
// role: persistence/spreadsheet
// inputs: Base folder, subfolder, ReportWindow, &[ReportRow]
// outputs: <base>/<subfolder>/GA4_data_<start>_<end>.xlsx
// side_effects: Creates the subfolder when absent; overwrites an existing workbook of the same name
// invariants:
// - Row 0 is the header in COLUMN_HEADERS order; data rows follow in table order
// - Integer measures are numeric cells; average session duration stays a text cell
// errors: ExtractError::Persist with the target path in the message
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::ExtractError;
use crate::model::{ReportRow, COLUMN_HEADERS};
use crate::window::ReportWindow;

pub const SHEET_NAME: &str = "Sheet1";

pub fn output_path(base: &Path, subfolder: &str, window: &ReportWindow) -> PathBuf {
  base.join(subfolder).join(format!("GA4_data_{}.xlsx", window.file_tag()))
}

fn write_row(ws: &mut Worksheet, at: u32, row: &ReportRow) -> Result<(), XlsxError> {
  ws.write_string(at, 0, &row.date)?;
  ws.write_string(at, 1, &row.device_category)?;
  ws.write_string(at, 2, &row.source_medium)?;
  ws.write_string(at, 3, &row.default_channel_group)?;
  ws.write_number(at, 4, row.views as f64)?;
  ws.write_number(at, 5, row.sessions as f64)?;
  ws.write_number(at, 6, row.active_users as f64)?;
  ws.write_string(at, 7, &row.average_session_duration)?;
  ws.write_number(at, 8, row.engaged_sessions as f64)?;
  ws.write_number(at, 9, row.user_engagement as f64)?;
  ws.write_number(at, 10, row.new_users as f64)?;
  ws.write_number(at, 11, row.event_count as f64)?;
  Ok(())
}

fn build_workbook(rows: &[ReportRow]) -> Result<Workbook, XlsxError> {
  let mut workbook = Workbook::new();
  let bold = Format::new().set_bold();

  let ws = workbook.add_worksheet();
  ws.set_name(SHEET_NAME)?;

  for (col, name) in COLUMN_HEADERS.iter().enumerate() {
    ws.write_string_with_format(0, col as u16, *name, &bold)?;
  }

  for (i, row) in rows.iter().enumerate() {
    write_row(ws, (i + 1) as u32, row)?;
  }

  Ok(workbook)
}

/// Write `rows` to `path`, creating the parent directory on demand.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<(), ExtractError> {
  let fail = |what: String| ExtractError::Persist(format!("{}: {}", path.display(), what));

  if let Some(dir) = path.parent() {
    if !dir.as_os_str().is_empty() && !dir.exists() {
      std::fs::create_dir_all(dir).map_err(|e| fail(e.to_string()))?;
      tracing::debug!(dir = %dir.display(), "created output directory");
    }
  }

  let mut workbook = build_workbook(rows).map_err(|e| fail(e.to_string()))?;
  workbook.save(path).map_err(|e| fail(e.to_string()))
}
