// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Turn a service-account credential record into an authorized ReportingApi client
// role: analytics/auth
// inputs: ServiceAccountInfo (private key, client email, token_uri), API base URL
// outputs: Box<dyn ReportingApi> carrying a bearer token
// side_effects: One POST to the credential's token_uri (OAuth2 jwt-bearer grant)
// invariants:
// - Only `type = service_account` credentials are accepted
// - The signed assertion uses RS256 with `kid` = private_key_id and a one-hour lifetime
// errors: Every failure (bad type, bad key, rejected grant, transport) is ExtractError::Auth; never retried
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::analytics::api::{HttpReportingApi, ReportingApi};
use crate::analytics::describe_http_error;
use crate::error::ExtractError;
use crate::settings::ServiceAccountInfo;

pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Capability to build an authenticated reporting client from a credential record.
pub trait ClientFactory {
  fn connect(&self, credentials: &ServiceAccountInfo) -> Result<Box<dyn ReportingApi>, ExtractError>;
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AssertionClaims {
  pub iss: String,
  pub scope: String,
  pub aud: String,
  pub iat: i64,
  pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
  access_token: String,
  #[serde(default)]
  expires_in: Option<u64>,
}

pub struct GoogleClientFactory {
  api_base: String,
}

impl GoogleClientFactory {
  pub fn new(api_base: impl Into<String>) -> Self {
    Self {
      api_base: api_base.into(),
    }
  }
}

impl ClientFactory for GoogleClientFactory {
  fn connect(&self, credentials: &ServiceAccountInfo) -> Result<Box<dyn ReportingApi>, ExtractError> {
    let assertion = sign_assertion(credentials, Utc::now().timestamp())?;
    let token = exchange_assertion(&credentials.token_uri, &assertion)?;

    Ok(Box::new(HttpReportingApi::new(self.api_base.clone(), token)))
  }
}

/// Build the signed JWT presented to the token endpoint.
pub(crate) fn sign_assertion(credentials: &ServiceAccountInfo, now: i64) -> Result<String, ExtractError> {
  if credentials.account_type != "service_account" {
    return Err(ExtractError::Auth(format!(
      "unsupported credential type {:?}, expected \"service_account\"",
      credentials.account_type
    )));
  }

  let claims = AssertionClaims {
    iss: credentials.client_email.clone(),
    scope: ANALYTICS_READONLY_SCOPE.to_string(),
    aud: credentials.token_uri.clone(),
    iat: now,
    exp: now + ASSERTION_LIFETIME_SECS,
  };

  let mut header = jsonwebtoken::Header::new(jsonwebtoken::Algorithm::RS256);
  header.kid = Some(credentials.private_key_id.clone());

  let key = jsonwebtoken::EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())
    .map_err(|e| ExtractError::Auth(format!("invalid private key: {}", e)))?;

  jsonwebtoken::encode(&header, &claims, &key).map_err(|e| ExtractError::Auth(format!("failed to sign assertion: {}", e)))
}

fn exchange_assertion(token_uri: &str, assertion: &str) -> Result<String, ExtractError> {
  tracing::debug!(%token_uri, "exchanging service-account assertion");

  let resp = crate::analytics::agent()
    .post(token_uri)
    .send_form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
    .map_err(|e| ExtractError::Auth(describe_http_error(e)))?;

  let token: TokenResponse = resp
    .into_json()
    .map_err(|e| ExtractError::Auth(format!("unreadable token response: {}", e)))?;

  if token.access_token.is_empty() {
    return Err(ExtractError::Auth("token endpoint returned an empty access token".into()));
  }
  tracing::debug!(expires_in = ?token.expires_in, "access token issued");

  Ok(token.access_token)
}
