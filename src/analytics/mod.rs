// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for the GA4 Data API integration (service-account auth, runReport client)
// role: analytics/namespace
// outputs: ClientFactory + ReportingApi seams and their HTTP implementations
// invariants: Every remote call is a single blocking attempt; no retries
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod api;
pub mod auth;

pub use api::ReportingApi;
pub use auth::{ClientFactory, GoogleClientFactory};

pub(crate) fn agent() -> ureq::Agent {
  ureq::AgentBuilder::new().user_agent("ga4-report").build()
}

/// Turn a ureq failure into a one-line message, preferring the server's own
/// error text (`error.message` for Google APIs, `error_description` for OAuth).
pub(crate) fn describe_http_error(err: ureq::Error) -> String {
  match err {
    ureq::Error::Status(code, resp) => {
      let body = resp.into_string().unwrap_or_default();
      let parsed: Option<serde_json::Value> = serde_json::from_str(&body).ok();

      let detail = parsed.as_ref().and_then(|v| {
        v.pointer("/error/message")
          .or_else(|| v.get("error_description"))
          .or_else(|| v.get("error"))
          .and_then(|m| m.as_str())
          .map(|s| s.to_string())
      });

      match detail {
        Some(d) => format!("HTTP {}: {}", code, d),
        None if body.trim().is_empty() => format!("HTTP {}", code),
        None => format!("HTTP {}: {}", code, body.trim()),
      }
    }
    ureq::Error::Transport(t) => t.to_string(),
  }
}
