use anyhow::{Context, Result, bail};
use chrono::{Datelike, Local, NaiveDate};

// Report date-range types live here to keep main focused.

/// Inclusive calendar-date range sent to the reporting API.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ReportWindow {
  pub start: NaiveDate,
  pub end: NaiveDate,
}

impl ReportWindow {
  pub fn start_str(&self) -> String {
    self.start.format("%Y-%m-%d").to_string()
  }

  pub fn end_str(&self) -> String {
    self.end.format("%Y-%m-%d").to_string()
  }

  /// `<start>_<end>` as embedded in output and log file names.
  pub fn file_tag(&self) -> String {
    format!("{}_{}", self.start_str(), self.end_str())
  }
}

fn first_and_last_day(y: i32, m: u32) -> Option<ReportWindow> {
  let start = NaiveDate::from_ymd_opt(y, m, 1)?;
  let (next_y, next_m) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
  let end = NaiveDate::from_ymd_opt(next_y, next_m, 1)?.pred_opt()?;

  Some(ReportWindow { start, end })
}

/// The full calendar month before the one containing `today`.
pub fn previous_month(today: NaiveDate) -> Result<ReportWindow> {
  let (y, m) = if today.month() == 1 {
    (today.year() - 1, 12)
  } else {
    (today.year(), today.month() - 1)
  };

  first_and_last_day(y, m).with_context(|| format!("no previous month for {}", today))
}

/// Parse `--month YYYY-MM` into that month's first..last day.
pub fn month_window(year_month: &str) -> Result<ReportWindow> {
  let parts: Vec<&str> = year_month.split('-').collect();

  if parts.len() != 2 {
    bail!("invalid --month, expected YYYY-MM");
  }
  let y: i32 = parts[0].parse().context("parsing year in --month")?;
  let m: u32 = parts[1].parse().context("parsing month in --month")?;

  if !(1..=12).contains(&m) {
    bail!("invalid month in --month");
  }

  first_and_last_day(y, m).context("--month out of range")
}

/// Parse a `--now-override` value into a calendar date.
/// Accepts `YYYY-MM-DD` or an RFC3339 timestamp (converted to local time).
pub fn parse_now_override(raw: &str) -> Result<NaiveDate> {
  if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
    return Ok(d);
  }

  chrono::DateTime::parse_from_rfc3339(raw)
    .map(|dt| dt.with_timezone(&Local).date_naive())
    .with_context(|| format!("invalid --now-override {:?}, expected YYYY-MM-DD", raw))
}

/// Returns the effective "today" given an optional override.
pub fn effective_today(override_today: Option<NaiveDate>) -> NaiveDate {
  override_today.unwrap_or_else(|| Local::now().date_naive())
}
