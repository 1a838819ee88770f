use onda_config::ApiConfig;
use reqwest::header;
use std::time::Duration;

/// Timeout de transporte para todas las llamadas al backend. El flujo de
/// dominio no impone timeouts propios; este es el único corte.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
  #[error("invalid client configuration: {0}")]
  Config(String),

  #[error("http error: {0}")]
  Http(String),
}

/// Cliente base contra el backend-as-a-service: URL raíz + cabeceras de
/// autorización compartidas por los adapters de storage, datastore y auth.
#[derive(Debug, Clone)]
pub struct RemoteClient {
  http: reqwest::Client,
  base_url: String,
}

impl RemoteClient {
  pub fn new(cfg: &ApiConfig) -> Result<Self, RemoteError> {
    let mut headers = header::HeaderMap::new();

    let api_key = header::HeaderValue::from_str(&cfg.anon_key)
      .map_err(|e| RemoteError::Config(format!("anon key: {e}")))?;
    headers.insert("apikey", api_key);

    let bearer = header::HeaderValue::from_str(&format!("Bearer {}", cfg.anon_key))
      .map_err(|e| RemoteError::Config(format!("anon key: {e}")))?;
    headers.insert(header::AUTHORIZATION, bearer);

    let http = reqwest::Client::builder()
      .timeout(DEFAULT_TIMEOUT)
      .default_headers(headers)
      .build()
      .map_err(|e| RemoteError::Http(e.to_string()))?;

    Ok(Self { http, base_url: cfg.base_url.trim_end_matches('/').to_owned() })
  }

  pub(crate) fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  pub(crate) fn http(&self) -> &reqwest::Client {
    &self.http
  }
}
