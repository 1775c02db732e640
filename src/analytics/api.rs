use crate::analytics::describe_http_error;
use crate::error::ExtractError;
use crate::model::{ReportRequest, ReportResponse};

// --- Trait seam for the reporting API ---
pub trait ReportingApi {
  fn run_report(&self, property_id: &str, request: &ReportRequest) -> Result<ReportResponse, ExtractError>;
}

/// Data API v1beta client authorized with a bearer token.
pub struct HttpReportingApi {
  agent: ureq::Agent,
  api_base: String,
  access_token: String,
}

impl HttpReportingApi {
  pub fn new(api_base: impl Into<String>, access_token: impl Into<String>) -> Self {
    Self {
      agent: crate::analytics::agent(),
      api_base: api_base.into(),
      access_token: access_token.into(),
    }
  }

  fn report_url(&self, property_id: &str) -> String {
    format!("{}/properties/{}:runReport", self.api_base, property_id)
  }
}

impl ReportingApi for HttpReportingApi {
  fn run_report(&self, property_id: &str, request: &ReportRequest) -> Result<ReportResponse, ExtractError> {
    let url = self.report_url(property_id);
    tracing::debug!(%url, limit = request.limit, offset = ?request.offset, "runReport");

    let resp = self
      .agent
      .post(&url)
      .set("Accept", "application/json")
      .set("Authorization", &format!("Bearer {}", self.access_token))
      .send_json(request)
      .map_err(|e| ExtractError::Query(describe_http_error(e)))?;

    resp
      .into_json::<ReportResponse>()
      .map_err(|e| ExtractError::Query(format!("unreadable runReport response: {}", e)))
  }
}
