//! HTTP transport for the Factura.com REST API.
//!
//! Builds the versioned endpoint URL, attaches the authentication
//! headers, and performs a single GET or POST per logical call. There is
//! no retry, caching, or rate-limiting: one call, one network attempt.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::error::FacturaError;

/// Sandbox environment base URL.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.factura.com/api";
/// Production environment base URL.
pub const PRODUCTION_BASE_URL: &str = "https://api.factura.com";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed plugin identifier sent with every request.
const F_PLUGIN: &str = "9d4095c8f7ed5785cb14c0e3b033eeb8252416ed";

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;

/// Authenticated HTTP transport shared by all resource clients.
///
/// Credentials and the environment selection are fixed at construction;
/// the transport holds no other state and is cheap to clone.
#[derive(Clone)]
pub struct ApiTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    secret_key: String,
}

impl std::fmt::Debug for ApiTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiTransport")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl ApiTransport {
    /// Create a transport for the sandbox or production environment.
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        sandbox: bool,
        timeout: Duration,
    ) -> Result<Self, FacturaError> {
        let base = if sandbox {
            SANDBOX_BASE_URL
        } else {
            PRODUCTION_BASE_URL
        };
        Self::with_base_url(api_key, secret_key, base, timeout)
    }

    /// Create a transport pointed at an explicit base URL.
    ///
    /// Intended for tests against a local mock server; production code
    /// should go through [`ApiTransport::new`].
    pub fn with_base_url(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FacturaError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FacturaError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        })
    }

    /// Base URL this transport targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, version: &str, endpoint: &str, segments: &[&str]) -> String {
        let mut url = format!("{}/{}/{}", self.base_url, version, endpoint);
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    fn headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("Content-Type", "application/json")
            .header("F-PLUGIN", F_PLUGIN)
            .header("F-Api-Key", &self.api_key)
            .header("F-Secret-Key", &self.secret_key)
    }

    /// Perform a GET request and decode the JSON response body.
    ///
    /// Only HTTP 200 counts as success; anything else becomes
    /// [`FacturaError::Http`] with a best-effort message from the body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        version: &str,
        endpoint: &str,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, FacturaError> {
        let url = self.url(version, endpoint, segments);
        tracing::debug!(%url, "GET");

        let mut request = self.headers(self.client.get(&url));
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FacturaError::Transport(e.to_string()))?;

        Self::decode(response, &[STATUS_OK]).await
    }

    /// Perform a POST request with a JSON body and decode the response.
    ///
    /// HTTP 200 and 201 count as success.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        version: &str,
        endpoint: &str,
        segments: &[&str],
        body: &B,
    ) -> Result<T, FacturaError> {
        let url = self.url(version, endpoint, segments);
        tracing::debug!(%url, "POST");

        let response = self
            .headers(self.client.post(&url))
            .json(body)
            .send()
            .await
            .map_err(|e| FacturaError::Transport(e.to_string()))?;

        Self::decode(response, &[STATUS_OK, STATUS_CREATED]).await
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        success: &[u16],
    ) -> Result<T, FacturaError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FacturaError::Transport(e.to_string()))?;

        tracing::debug!(status = status.as_u16(), "response received");

        if !success.contains(&status.as_u16()) {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").map(envelope_message))
                .unwrap_or_else(|| body.trim().to_string());
            return Err(FacturaError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| FacturaError::Decode(e.to_string()))
    }
}

/// Flatten the API's `message` field into one string.
///
/// The field arrives in three shapes depending on the endpoint family:
/// a flat string, an object wrapping a nested `message`, or a
/// field-to-errors map (validation failures) whose entries are joined
/// into a single message.
pub(crate) fn envelope_message(message: &Value) -> String {
    match message {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            if let Some(inner) = map.get("message") {
                return envelope_message(inner);
            }
            let mut parts = Vec::with_capacity(map.len());
            for (field, errors) in map {
                let joined = match errors {
                    Value::Array(items) => items
                        .iter()
                        .map(|e| match e {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join(", "),
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                parts.push(format!("{field}: {joined}"));
            }
            parts.join("; ")
        }
        Value::Null => "unknown error".to_string(),
        other => other.to_string(),
    }
}
