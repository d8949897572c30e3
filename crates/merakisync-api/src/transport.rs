// Shared transport configuration for building reqwest::Client instances.
//
// The Dashboard API is served from the public Meraki cloud, so there is no
// custom-CA or self-signed handling here -- just timeout, user agent, and
// the bearer credential injected as a sensitive default header.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` that sends `Authorization: Bearer <token>`
    /// as a default header on every request.
    ///
    /// The header is marked sensitive so it never shows up in debug logs.
    pub fn build_client(
        &self,
        api_token: &SecretString,
    ) -> Result<reqwest::Client, crate::error::Error> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_token.expose_secret()))
            .map_err(|e| crate::error::Error::Authentication {
                message: format!("invalid API token header value: {e}"),
            })?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("merakisync/0.1.0")
            .default_headers(headers)
            .build()?;

        Ok(client)
    }
}
