// UCS Manager XML API HTTP client
//
// Wraps `reqwest::Client` with the single-endpoint XML protocol: every
// method is a POST to `/nuova` whose body root names the method. Method
// families (auth, query, staging) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use indexmap::IndexMap;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::mo::Dn;
use crate::staging::StagedMo;
use crate::transport::TransportConfig;
use crate::xml::{self, XmlElement};

/// Path of the XML API endpoint on the fabric interconnect.
const XML_API_PATH: &str = "/nuova";

/// Raw HTTP client for the UCS Manager XML API.
///
/// Holds the session cookie issued by `aaaLogin` and a local buffer of
/// staged configuration changes that is only sent on [`commit`](Self::commit).
pub struct UcsClient {
    http: reqwest::Client,
    endpoint: Url,
    timeout_secs: u64,
    /// Session cookie from `aaaLogin`, sent inside every subsequent request body.
    cookie: RwLock<Option<SecretString>>,
    /// Pending `configConfMos` pairs keyed by DN, in staging order.
    staged: Mutex<IndexMap<Dn, StagedMo>>,
}

impl UcsClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `endpoint` is the full XML API URL; see [`UcsClient::endpoint`].
    pub fn new(endpoint: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            endpoint,
            timeout_secs: transport.timeout_secs(),
            cookie: RwLock::new(None),
            staged: Mutex::new(IndexMap::new()),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoint: Url) -> Self {
        Self {
            http,
            endpoint,
            timeout_secs: 0,
            cookie: RwLock::new(None),
            staged: Mutex::new(IndexMap::new()),
        }
    }

    /// Build the XML API URL for a UCS Manager host.
    ///
    /// `host` may be a bare hostname/IP or a full URL; in the latter case
    /// its scheme and port win over `secure` and `port`.
    pub fn endpoint(host: &str, secure: bool, port: Option<u16>) -> Result<Url, Error> {
        let mut url = if host.contains("://") {
            Url::parse(host)?
        } else {
            let scheme = if secure { "https" } else { "http" };
            let port = port.map(|p| format!(":{p}")).unwrap_or_default();
            Url::parse(&format!("{scheme}://{host}{port}"))?
        };
        url.set_path(XML_API_PATH);
        Ok(url)
    }

    /// The XML API URL this client posts to.
    pub fn endpoint_url(&self) -> &Url {
        &self.endpoint
    }

    // ── Session cookie ───────────────────────────────────────────────

    /// `true` once `aaaLogin` has succeeded and until `aaaLogout`.
    pub fn is_logged_in(&self) -> bool {
        self.cookie
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub(crate) fn set_cookie(&self, cookie: Option<SecretString>) {
        *self.cookie.write().unwrap_or_else(PoisonError::into_inner) = cookie;
    }

    /// The current session cookie, or `NotLoggedIn`.
    pub(crate) fn cookie(&self) -> Result<String, Error> {
        self.cookie
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|c| c.expose_secret().to_owned())
            .ok_or(Error::NotLoggedIn)
    }

    pub(crate) fn staged_buffer(&self) -> MutexGuard<'_, IndexMap<Dn, StagedMo>> {
        self.staged.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Request helper ───────────────────────────────────────────────

    /// POST a method document and return the verified response root.
    ///
    /// Request bodies are never logged: `aaaLogin` carries the password.
    pub(crate) async fn post(&self, request: &XmlElement) -> Result<XmlElement, Error> {
        let method = request.name.as_str();
        debug!(method, "POST {}", self.endpoint);

        let resp = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(request.to_xml())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        trace!(method, %body, "response body");

        let root = XmlElement::parse(&body)?;
        xml::check_response(&root, method)?;
        Ok(root)
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_from_bare_host() {
        let url = UcsClient::endpoint("ucsm.example.net", true, None).unwrap();
        assert_eq!(url.as_str(), "https://ucsm.example.net/nuova");

        let url = UcsClient::endpoint("10.0.0.5", false, Some(8080)).unwrap();
        assert_eq!(url.as_str(), "http://10.0.0.5:8080/nuova");
    }

    #[test]
    fn endpoint_from_full_url_keeps_scheme() {
        let url = UcsClient::endpoint("http://127.0.0.1:9000/", true, Some(443)).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/nuova");
    }

    #[test]
    fn cookie_required_before_login() {
        let client = UcsClient::with_client(
            reqwest::Client::new(),
            UcsClient::endpoint("localhost", true, None).unwrap(),
        );
        assert!(!client.is_logged_in());
        assert!(matches!(client.cookie(), Err(Error::NotLoggedIn)));
    }
}
