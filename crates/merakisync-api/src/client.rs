// Hand-crafted async HTTP client for the Meraki Dashboard API (v1).
//
// Base path: /api/v1
// Auth: Authorization: Bearer header

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types::{Network, NetworkCreateRequest, NetworkUpdateRequest, Organization};

/// Production endpoint for the Dashboard API.
pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v1";

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Meraki Dashboard API.
///
/// One method per remote operation; no retries and no caching -- a single
/// network fault surfaces immediately as [`Error::Transport`] for the caller
/// to decide whether to re-run the whole reconciliation. The credential is
/// injected at construction and never mutated afterwards.
#[derive(Debug)]
pub struct MerakiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MerakiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a bearer token against the production endpoint.
    pub fn from_api_token(
        api_token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Self::from_api_token_with_base(DEFAULT_BASE_URL, api_token, transport)
    }

    /// Build from a bearer token against a custom base URL (regional clouds,
    /// mock servers).
    pub fn from_api_token_with_base(
        base_url: &str,
        api_token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(api_token)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends with `/api/v1/` so relative joins work.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        // Strip trailing slash for uniform handling
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api/v1") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/v1/"));
        }

        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"organizations"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/api/v1/`, so joining `organizations/…` works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                endpoint: url.to_string(),
            });
        }
        if status != StatusCode::OK {
            return Err(Self::unexpected_status(&url, None, resp).await);
        }
        Self::decode(resp).await
    }

    /// POST expecting 201 Created. The body is serialized up front so the
    /// logged payload is byte-identical to the transmitted one.
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        let payload = Self::encode(body)?;
        info!(%url, %payload, "POST");

        let resp = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload.clone())
            .send()
            .await?;
        let status = resp.status();
        if status != StatusCode::CREATED {
            return Err(Self::unexpected_status(&url, Some(payload), resp).await);
        }
        Self::decode(resp).await
    }

    /// PUT expecting 200 OK.
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        let payload = Self::encode(body)?;
        info!(%url, %payload, "PUT");

        let resp = self
            .http
            .put(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload.clone())
            .send()
            .await?;
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Self::unexpected_status(&url, Some(payload), resp).await);
        }
        Self::decode(resp).await
    }

    /// DELETE expecting 204 No Content.
    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path);
        info!(%url, "DELETE");

        let resp = self.http.delete(url.clone()).send().await?;
        let status = resp.status();
        if status != StatusCode::NO_CONTENT {
            return Err(Self::unexpected_status(&url, None, resp).await);
        }
        Ok(())
    }

    // ── Response handling ────────────────────────────────────────────

    fn encode<B: Serialize>(body: &B) -> Result<String, Error> {
        serde_json::to_string(body).map_err(|e| Error::Decode {
            message: format!("failed to serialize request body: {e}"),
            body: String::new(),
        })
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Decode {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn unexpected_status(
        url: &Url,
        body: Option<String>,
        resp: reqwest::Response,
    ) -> Error {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Error::InvalidApiKey;
        }

        let response = resp.text().await.unwrap_or_default();
        Error::Conflict {
            endpoint: url.to_string(),
            status: status.as_u16(),
            body,
            response,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Organizations ────────────────────────────────────────────────

    /// Enumerate all organizations visible to the credential.
    pub async fn list_organizations(&self) -> Result<Vec<Organization>, Error> {
        self.get("organizations").await
    }

    /// Fetch a single organization by id.
    pub async fn get_organization(&self, org_id: &str) -> Result<Organization, Error> {
        self.get(&format!("organizations/{org_id}")).await
    }

    // ── Networks ─────────────────────────────────────────────────────

    /// Create a network under an organization.
    ///
    /// The Dashboard signals success with 201 Created; anything else is an
    /// [`Error::Conflict`] carrying the endpoint, the submitted body, and
    /// the server's raw response body.
    pub async fn create_network(
        &self,
        org_id: &str,
        body: &NetworkCreateRequest,
    ) -> Result<Network, Error> {
        self.post(&format!("organizations/{org_id}/networks"), body)
            .await
    }

    /// Fetch a network by id alone.
    pub async fn get_network(&self, network_id: &str) -> Result<Network, Error> {
        self.get(&format!("networks/{network_id}")).await
    }

    /// Org-scoped read of a network, used by the refresh transition once the
    /// owning organization is known.
    pub async fn get_organization_network(
        &self,
        org_id: &str,
        network_id: &str,
    ) -> Result<Network, Error> {
        self.get(&format!("organizations/{org_id}/networks/{network_id}"))
            .await
    }

    /// Apply a partial update. Fields absent from the request are left
    /// untouched server-side.
    pub async fn update_network(
        &self,
        network_id: &str,
        body: &NetworkUpdateRequest,
    ) -> Result<Network, Error> {
        self.put(&format!("networks/{network_id}"), body).await
    }

    /// Delete a network. Success is 204 No Content; anything else is an
    /// [`Error::Conflict`].
    pub async fn delete_network(&self, network_id: &str) -> Result<(), Error> {
        self.delete(&format!("networks/{network_id}")).await
    }
}
