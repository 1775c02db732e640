// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed failure kinds for one export run (configuration, authentication, query, persistence)
// role: errors/types
// outputs: ExtractError with human-readable messages used verbatim in the run log
// invariants: Messages are single-line and start with the failure kind
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
  #[error("Missing option in config file: {0}")]
  MissingField(String),

  #[error("Failed to read config file {path}: {message}")]
  ConfigFile { path: String, message: String },

  #[error("Authentication failed: {0}")]
  Auth(String),

  #[error("Report query failed: {0}")]
  Query(String),

  #[error("Failed to save report: {0}")]
  Persist(String),
}
