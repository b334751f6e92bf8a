//! The REST collaborator the handles talk through.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::UcareConfig;
use crate::error::Result;
use crate::file::File;
use crate::group::FileGroup;

/// HTTP client for CDN probes issued by the default [`ApiClient::probe`].
static PROBE_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
});

/// Connection, authentication and base-URL context shared by handles.
///
/// Handles only borrow an `ApiClient`; they never own it.
pub trait ApiClient {
    /// Send an authenticated API request and return the parsed JSON body.
    ///
    /// `path` is relative to the API base, e.g. `/files/<uuid>/`.
    fn make_request(&self, method: Method, path: &str) -> Result<Value>;

    /// Prefix for CDN URLs, ending with `/`.
    fn cdn_base(&self) -> &str;

    /// Headers attached to requests the handles send directly.
    fn default_headers(&self) -> &HeaderMap;

    /// Send a HEAD request to a CDN URL and return its status.
    fn probe(&self, url: &str) -> Result<StatusCode> {
        let response = PROBE_CLIENT
            .head(url)
            .headers(self.default_headers().clone())
            .send()?;
        debug!(url, status = %response.status(), "CDN probe");
        Ok(response.status())
    }
}

/// Blocking REST client for the Uploadcare API.
pub struct Ucare {
    config: UcareConfig,
    http: Client,
    default_headers: HeaderMap,
    authorization: HeaderValue,
}

impl Ucare {
    pub fn new(config: UcareConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            ACCEPT,
            HeaderValue::from_str(&format!(
                "application/vnd.uploadcare-v{}+json",
                config.api_version
            ))?,
        );
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("ucare-rs/{}", env!("CARGO_PKG_VERSION")))?,
        );

        let mut authorization = HeaderValue::from_str(&format!(
            "Uploadcare.Simple {}:{}",
            config.public_key, config.secret_key
        ))?;
        authorization.set_sensitive(true);

        Ok(Self {
            config,
            http,
            default_headers,
            authorization,
        })
    }

    /// Build a client from `UCARE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(UcareConfig::from_env()?)
    }

    pub fn config(&self) -> &UcareConfig {
        &self.config
    }

    /// A handle for a file UUID, `<uuid>/-/<effects>` path or CDN URL.
    pub fn file(&self, cdn_url_or_file_id: &str) -> Result<File<'_>> {
        File::new(cdn_url_or_file_id, self)
    }

    /// A handle for a `<uuid>~<count>` group id or group CDN URL.
    pub fn file_group(&self, cdn_url_or_group_id: &str) -> Result<FileGroup<'_>> {
        FileGroup::new(cdn_url_or_group_id, self)
    }
}

impl ApiClient for Ucare {
    fn make_request(&self, method: Method, path: &str) -> Result<Value> {
        let url = self.config.api_base.join(path.trim_start_matches('/'))?;
        debug!(%method, %url, "API request");

        let response = self
            .http
            .request(method, url)
            .headers(self.default_headers.clone())
            .header(AUTHORIZATION, self.authorization.clone())
            .send()?
            .error_for_status()?;

        let body = response.text()?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn cdn_base(&self) -> &str {
        &self.config.cdn_base
    }

    fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }
}

impl std::fmt::Debug for Ucare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ucare")
            .field("public_key", &self.config.public_key)
            .field("api_base", &self.config.api_base.as_str())
            .field("cdn_base", &self.config.cdn_base)
            .finish_non_exhaustive()
    }
}
