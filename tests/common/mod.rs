use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Page {
  Rows(usize),
  Fail(u16, &'static str),
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Seen {
  pub path: String,
  pub body: String,
}

/// Local stand-in for both the OAuth token endpoint and the Data API.
#[allow(dead_code)]
pub struct FakeGa {
  pub base: String,
  pub seen: Arc<Mutex<Vec<Seen>>>,
}

#[allow(dead_code)]
impl FakeGa {
  pub fn report_calls(&self) -> Vec<serde_json::Value> {
    self
      .seen
      .lock()
      .unwrap()
      .iter()
      .filter(|s| s.path.ends_with(":runReport"))
      .map(|s| serde_json::from_str(&s.body).unwrap())
      .collect()
  }

  pub fn paths(&self) -> Vec<String> {
    self.seen.lock().unwrap().iter().map(|s| s.path.clone()).collect()
  }
}

fn api_row(n: usize) -> serde_json::Value {
  serde_json::json!({
    "dimensionValues": [
      {"value": "20240201"},
      {"value": if n % 2 == 0 { "desktop" } else { "mobile" }},
      {"value": "google / organic"},
      {"value": "Organic Search"}
    ],
    "metricValues": [
      {"value": (n + 10).to_string()},
      {"value": (n + 5).to_string()},
      {"value": (n + 3).to_string()},
      {"value": "97.25"},
      {"value": (n + 2).to_string()},
      {"value": (n * 60).to_string()},
      {"value": (n + 1).to_string()},
      {"value": (n * 7).to_string()}
    ]
  })
}

fn read_request(stream: &TcpStream) -> Option<Seen> {
  let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(5)));
  let mut reader = BufReader::new(stream.try_clone().ok()?);

  let mut request_line = String::new();
  reader.read_line(&mut request_line).ok()?;
  let path = request_line.split_whitespace().nth(1)?.to_string();

  let mut content_length = 0usize;
  loop {
    let mut line = String::new();
    if reader.read_line(&mut line).ok()? == 0 {
      break;
    }
    let line = line.trim_end();
    if line.is_empty() {
      break;
    }
    if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
      content_length = v.trim().parse().unwrap_or(0);
    }
  }

  let mut body = vec![0u8; content_length];
  reader.read_exact(&mut body).ok()?;

  Some(Seen {
    path,
    body: String::from_utf8_lossy(&body).to_string(),
  })
}

fn respond(mut stream: TcpStream, status: u16, body: &str) {
  let resp = format!(
    "HTTP/1.1 {} Fake\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
    status,
    body.len(),
    body
  );
  let _ = stream.write_all(resp.as_bytes());
}

/// Start the fake. `token` is the (status, body) served by `/token`; report pages are served in order.
#[allow(dead_code)]
pub fn start(token: (u16, &'static str), total_rows: u64, pages: Vec<Page>) -> FakeGa {
  let listener = TcpListener::bind("127.0.0.1:0").unwrap();
  let base = format!("http://{}", listener.local_addr().unwrap());
  let seen: Arc<Mutex<Vec<Seen>>> = Arc::new(Mutex::new(Vec::new()));
  let log = Arc::clone(&seen);

  std::thread::spawn(move || {
    let mut pages = pages.into_iter();

    for stream in listener.incoming() {
      let Ok(stream) = stream else { continue };
      let Some(req) = read_request(&stream) else { continue };
      log.lock().unwrap().push(req.clone());

      if req.path == "/token" {
        respond(stream, token.0, token.1);
        continue;
      }

      let body: serde_json::Value = serde_json::from_str(&req.body).unwrap_or_default();
      if body.get("dimensions").is_none() {
        respond(stream, 200, &serde_json::json!({ "rowCount": total_rows }).to_string());
        continue;
      }

      match pages.next() {
        Some(Page::Rows(n)) => {
          let rows: Vec<serde_json::Value> = (0..n).map(api_row).collect();
          let mut out = serde_json::json!({ "rowCount": total_rows });
          if n > 0 {
            out["rows"] = serde_json::Value::Array(rows);
          }
          respond(stream, 200, &out.to_string());
        }
        Some(Page::Fail(status, msg)) => respond(stream, status, msg),
        None => respond(stream, 200, &serde_json::json!({ "rowCount": total_rows }).to_string()),
      }
    }
  });

  FakeGa { base, seen }
}

#[allow(dead_code)]
pub const TOKEN_OK: (u16, &str) = (200, r#"{"access_token":"ya29.fake","expires_in":3599,"token_type":"Bearer"}"#);

/// Write a complete INI pointing token_uri and api_base at `base`, optionally dropping one key.
#[allow(dead_code)]
pub fn write_config(dir: &Path, base: &str, property_id: &str, drop_key: Option<&str>) -> PathBuf {
  let key_pem = std::fs::read_to_string(
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/test_rsa_key.pem"),
  )
  .unwrap();
  let key_one_line = key_pem.trim_end().replace('\n', "\\n");

  let entries: Vec<(&str, &str, String)> = vec![
    ("service_account", "type", "service_account".into()),
    ("service_account", "project_id", "demo-project".into()),
    ("service_account", "private_key_id", "kid-1".into()),
    ("service_account", "private_key", key_one_line),
    ("service_account", "client_email", "exporter@demo-project.iam.gserviceaccount.com".into()),
    ("service_account", "client_id", "1234567890".into()),
    ("service_account", "auth_uri", "https://accounts.google.com/o/oauth2/auth".into()),
    ("service_account", "token_uri", format!("{}/token", base)),
    ("service_account", "auth_provider_x509_cert_url", "https://www.googleapis.com/oauth2/v1/certs".into()),
    ("service_account", "client_x509_cert_url", "https://www.googleapis.com/robot/v1/metadata/x509/exporter".into()),
    ("google_analytics", "property_id", property_id.into()),
    ("google_analytics", "api_base", format!("{}/v1beta", base)),
  ];

  let mut ini = String::new();
  let mut section = "";
  for (sec, key, value) in &entries {
    if *sec != section {
      ini.push_str(&format!("\n[{}]\n", sec));
      section = *sec;
    }
    if Some(*key) == drop_key {
      continue;
    }
    ini.push_str(&format!("{} = {}\n", key, value));
  }

  let path = dir.join("ga4config.ini");
  std::fs::write(&path, ini).unwrap();
  path
}
