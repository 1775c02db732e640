// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Mirror every progress line to stdout and to a per-run append-only text log
// role: logging/run-log
// inputs: Base folder and the resolved report window (fixed at construction)
// outputs: Lines on stdout; <base>/log/Ga4log_<start>_<end>.txt
// side_effects: Creates the log directory on first use; opens, appends and closes the file per line
// invariants:
// - The log path never changes after construction
// - A failed file append never aborts the run (reported via tracing only)
// errors: Swallowed into tracing::warn!
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::window::ReportWindow;

pub struct RunLog {
  path: PathBuf,
  echo: bool,
}

impl RunLog {
  pub fn new(base: &Path, window: &ReportWindow) -> Self {
    let path = base.join("log").join(format!("Ga4log_{}.txt", window.file_tag()));
    Self { path, echo: true }
  }

  /// File-only variant used by tests to keep stdout quiet.
  #[cfg(test)]
  pub fn quiet(base: &Path, window: &ReportWindow) -> Self {
    Self {
      echo: false,
      ..Self::new(base, window)
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn line(&self, msg: impl AsRef<str>) {
    let msg = msg.as_ref();

    if let Err(e) = self.append(msg) {
      tracing::warn!(path = %self.path.display(), error = %e, "could not append to run log");
    }

    if self.echo {
      println!("{}", msg);
    }
  }

  /// Append to the file without echoing; for messages the caller reports on stderr itself.
  pub fn record(&self, msg: impl AsRef<str>) {
    if let Err(e) = self.append(msg.as_ref()) {
      tracing::warn!(path = %self.path.display(), error = %e, "could not append to run log");
    }
  }

  fn append(&self, msg: &str) -> std::io::Result<()> {
    if let Some(dir) = self.path.parent() {
      if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        tracing::debug!(dir = %dir.display(), "created log directory");
      }
    }

    let mut f = std::fs::OpenOptions::new().create(true).append(true).open(&self.path)?;
    writeln!(f, "{}", msg)
  }
}
