// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Probe the total row count, then page through runReport and flatten rows into ReportRow
// role: extraction/pagination
// inputs: &dyn ReportingApi, property id, ReportWindow, RunLog
// outputs: Vec<ReportRow> in page order, then server order within a page
// side_effects: One remote call per page; one log line per page
// invariants:
// - Pagination stops on the first short page (fewer rows than PAGE_SIZE, including empty)
// - The probed row count is informational only; it never decides termination
// - Offsets advance by exactly PAGE_SIZE per full page
// errors: Any failed page or unparsable row aborts with ExtractError::Query; accumulated rows are dropped
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::analytics::ReportingApi;
use crate::error::ExtractError;
use crate::model::{
  DateRange, NamedField, ReportRequest, ReportRow, ReportRowValues, DIMENSIONS, METRICS, PROBE_METRIC,
};
use crate::runlog::RunLog;
use crate::window::ReportWindow;

pub const PAGE_SIZE: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
  pub offset: u64,
  pub page_size: u64,
  pub total_rows: u64,
}

impl PageCursor {
  pub fn new(total_rows: u64) -> Self {
    Self {
      offset: 0,
      page_size: PAGE_SIZE,
      total_rows,
    }
  }

  /// ceil(total_rows / page_size)
  pub fn estimated_pages(&self) -> u64 {
    self.total_rows.div_ceil(self.page_size)
  }

  pub fn is_final_page(&self, rows_returned: usize) -> bool {
    (rows_returned as u64) < self.page_size
  }

  pub fn advance(&mut self) {
    self.offset += self.page_size;
  }
}

fn date_ranges(window: &ReportWindow) -> Vec<DateRange> {
  vec![DateRange {
    start_date: window.start_str(),
    end_date: window.end_str(),
  }]
}

fn named(names: &[&str]) -> Vec<NamedField> {
  names.iter().map(|n| NamedField { name: n.to_string() }).collect()
}

pub fn probe_request(window: &ReportWindow) -> ReportRequest {
  ReportRequest {
    dimensions: Vec::new(),
    metrics: named(&[PROBE_METRIC]),
    date_ranges: date_ranges(window),
    limit: 1,
    offset: None,
  }
}

pub fn page_request(window: &ReportWindow, cursor: &PageCursor) -> ReportRequest {
  ReportRequest {
    dimensions: named(&DIMENSIONS),
    metrics: named(&METRICS),
    date_ranges: date_ranges(window),
    limit: cursor.page_size,
    offset: Some(cursor.offset),
  }
}

/// Server-reported number of rows matching the window.
pub fn probe_row_count(api: &dyn ReportingApi, property_id: &str, window: &ReportWindow) -> Result<u64, ExtractError> {
  let resp = api.run_report(property_id, &probe_request(window))?;
  Ok(resp.row_count)
}

fn cell<'a>(values: &'a [crate::model::CellValue], idx: usize, kind: &str) -> Result<&'a str, ExtractError> {
  values
    .get(idx)
    .map(|c| c.value.as_str())
    .ok_or_else(|| ExtractError::Query(format!("row is missing {} value #{}", kind, idx)))
}

fn int_cell(values: &[crate::model::CellValue], idx: usize) -> Result<i64, ExtractError> {
  let raw = cell(values, idx, "metric")?;
  raw.trim().parse::<i64>().map_err(|_| {
    ExtractError::Query(format!("metric {} value {:?} is not an integer", METRICS[idx], raw))
  })
}

/// Project one API row onto the fixed column layout.
pub fn flatten_row(row: &ReportRowValues) -> Result<ReportRow, ExtractError> {
  let d = &row.dimension_values;
  let m = &row.metric_values;

  Ok(ReportRow {
    date: cell(d, 0, "dimension")?.to_string(),
    device_category: cell(d, 1, "dimension")?.to_string(),
    source_medium: cell(d, 2, "dimension")?.to_string(),
    default_channel_group: cell(d, 3, "dimension")?.to_string(),
    views: int_cell(m, 0)?,
    sessions: int_cell(m, 1)?,
    active_users: int_cell(m, 2)?,
    average_session_duration: cell(m, 3, "metric")?.to_string(),
    engaged_sessions: int_cell(m, 4)?,
    user_engagement: int_cell(m, 5)?,
    new_users: int_cell(m, 6)?,
    event_count: int_cell(m, 7)?,
  })
}

/// Fetch every page for the window. Nothing is returned unless every page succeeds.
pub fn fetch_all_rows(
  api: &dyn ReportingApi,
  property_id: &str,
  window: &ReportWindow,
  mut cursor: PageCursor,
  log: &RunLog,
) -> Result<Vec<ReportRow>, ExtractError> {
  let mut rows: Vec<ReportRow> = Vec::new();
  let mut page_count = 0u64;

  loop {
    let resp = api.run_report(property_id, &page_request(window, &cursor))?;
    page_count += 1;
    log.line(format!("Page {} of data retrieved.", page_count));

    for r in &resp.rows {
      rows.push(flatten_row(r)?);
    }

    if cursor.is_final_page(resp.rows.len()) {
      break;
    }
    cursor.advance();
  }

  tracing::debug!(pages = page_count, rows = rows.len(), "pagination finished");
  Ok(rows)
}
