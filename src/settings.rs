// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Load service-account credentials and the GA4 property id from an INI file
// role: configuration/loader
// inputs: Path to an INI file with [service_account] and [google_analytics] sections
// outputs: Settings (read-only for the run)
// side_effects: Reads the file once
// invariants:
// - Every required key is present or loading fails naming the first missing `<section>.<key>`
// - The configured property id is used as-is; nothing overrides it
// errors: ExtractError::MissingField for absent keys; ExtractError::ConfigFile for unreadable/unparsable files
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use crate::error::ExtractError;

pub const DEFAULT_API_BASE: &str = "https://analyticsdata.googleapis.com/v1beta";

/// Google service-account key fields, mirrored from the downloaded JSON key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAccountInfo {
  pub account_type: String,
  pub project_id: String,
  pub private_key_id: String,
  pub private_key: String,
  pub client_email: String,
  pub client_id: String,
  pub auth_uri: String,
  pub token_uri: String,
  pub auth_provider_x509_cert_url: String,
  pub client_x509_cert_url: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
  pub service_account: ServiceAccountInfo,
  pub property_id: String,
  pub api_base: String,
}

impl Settings {
  pub fn load(path: &Path) -> Result<Self, ExtractError> {
    let shown = path.display().to_string();

    let raw = config::Config::builder()
      .add_source(config::File::new(&shown, config::FileFormat::Ini))
      .build()
      .map_err(|e| ExtractError::ConfigFile {
        path: shown.clone(),
        message: e.to_string(),
      })?;

    Self::from_config(&raw)
  }

  fn from_config(raw: &config::Config) -> Result<Self, ExtractError> {
    let sa = |key: &str| required(raw, "service_account", key);

    let service_account = ServiceAccountInfo {
      account_type: sa("type")?,
      project_id: sa("project_id")?,
      private_key_id: sa("private_key_id")?,
      // keys pasted from JSON carry escaped newlines
      private_key: sa("private_key")?.replace("\\n", "\n"),
      client_email: sa("client_email")?,
      client_id: sa("client_id")?,
      auth_uri: sa("auth_uri")?,
      token_uri: sa("token_uri")?,
      auth_provider_x509_cert_url: sa("auth_provider_x509_cert_url")?,
      client_x509_cert_url: sa("client_x509_cert_url")?,
    };

    let property_id = required(raw, "google_analytics", "property_id")?;
    let api_base = raw
      .get_string("google_analytics.api_base")
      .ok()
      .map(|s| s.trim_end_matches('/').to_string())
      .filter(|s| !s.is_empty())
      .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    Ok(Settings {
      service_account,
      property_id,
      api_base,
    })
  }
}

fn required(raw: &config::Config, section: &str, key: &str) -> Result<String, ExtractError> {
  let full = format!("{}.{}", section, key);

  match raw.get_string(&full) {
    Ok(v) => Ok(v),
    Err(config::ConfigError::NotFound(_)) => Err(ExtractError::MissingField(full)),
    Err(e) => Err(ExtractError::ConfigFile {
      path: full,
      message: e.to_string(),
    }),
  }
}
