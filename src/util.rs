// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Small helpers for path absolutizing and man page rendering
// role: utilities/helpers
// inputs: Paths; clap CommandFactory
// outputs: Absolute paths, man page text
// invariants: absolutize never fails; it falls back to joining with the current dir
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use clap::CommandFactory;

/// Canonical path when it exists, otherwise the path joined onto the current directory.
pub fn absolutize<P: AsRef<Path>>(p: P) -> PathBuf {
  let p = p.as_ref();
  match std::fs::canonicalize(p) {
    Ok(x) => x,
    Err(_) if p.is_absolute() => p.to_path_buf(),
    Err(_) => match std::env::current_dir() {
      Ok(cwd) => cwd.join(p),
      Err(_) => p.to_path_buf(),
    },
  }
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
