//! Builds the per-account HTTP clients.
//!
//! Every request presents the same browser-like identity (user agent plus an
//! Origin/Referer pair) because the service only answers web clients.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, ORIGIN, REFERER};
use reqwest::Client;

use super::error::ApiError;
use crate::loader::Credential;
use crate::proxy::ProxyEndpoint;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct ClientFactory {
    web_origin: String,
    timeout: Duration,
}

impl ClientFactory {
    pub fn new(web_origin: impl Into<String>, timeout: Duration) -> Self {
        let mut web_origin = web_origin.into();
        while web_origin.ends_with('/') {
            web_origin.pop();
        }
        Self {
            web_origin,
            timeout,
        }
    }

    /// Client carrying the account's bearer token and the web-client headers.
    pub fn for_account(
        &self,
        credential: &Credential,
        proxy: Option<&ProxyEndpoint>,
    ) -> Result<Client, ApiError> {
        let mut headers = self.browser_headers()?;
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
            .map_err(|e| ApiError::invalid_credential(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        self.build(headers, proxy)
    }

    /// Client with no service headers, routed through the same proxy.
    pub fn anonymous(&self, proxy: Option<&ProxyEndpoint>) -> Result<Client, ApiError> {
        self.build(HeaderMap::new(), proxy)
    }

    fn browser_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        let origin = HeaderValue::from_str(&self.web_origin)
            .map_err(|e| ApiError::parse_error(format!("invalid origin: {}", e)))?;
        let referer = HeaderValue::from_str(&format!("{}/", self.web_origin))
            .map_err(|e| ApiError::parse_error(format!("invalid referer: {}", e)))?;
        headers.insert(ORIGIN, origin);
        headers.insert(REFERER, referer);
        Ok(headers)
    }

    fn build(&self, headers: HeaderMap, proxy: Option<&ProxyEndpoint>) -> Result<Client, ApiError> {
        let mut builder = Client::builder()
            .timeout(self.timeout)
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers);

        if let Some(endpoint) = proxy {
            if let Some(p) = endpoint.to_reqwest()? {
                builder = builder.proxy(p);
            }
        }

        builder.build().map_err(ApiError::from_transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;

    fn factory() -> ClientFactory {
        ClientFactory::new("https://dealr.fun/", Duration::from_secs(5))
    }

    #[test]
    fn origin_is_normalised() {
        let headers = factory().browser_headers().unwrap();
        assert_eq!(headers[ORIGIN], "https://dealr.fun");
        assert_eq!(headers[REFERER], "https://dealr.fun/");
    }

    #[test]
    fn builds_direct_and_proxied_clients() {
        let cred = Credential::new("token");
        assert!(factory().for_account(&cred, None).is_ok());
        let proxy = ProxyEndpoint::new("socks5://127.0.0.1:1080");
        assert!(factory().for_account(&cred, Some(&proxy)).is_ok());
        assert!(factory().anonymous(Some(&proxy)).is_ok());
    }

    #[test]
    fn malformed_proxy_fails_client_build() {
        let cred = Credential::new("token");
        let proxy = ProxyEndpoint::new("http://");
        let err = factory().for_account(&cred, Some(&proxy)).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::InvalidProxy);
    }

    #[test]
    fn control_characters_in_token_are_rejected() {
        let cred = Credential::new("bad\ntoken");
        let err = factory().for_account(&cred, None).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::InvalidCredential);
    }
}
