//! Request pipeline shared by every endpoint group
//!
//! Builds the query string (signed or not), dispatches the HTTP call and
//! hands back the raw body or a decoded [`ApiResponse`].

use crate::error::{RestError, RestResult};
use crate::types::ApiResponse;
use bingx_auth::{Credentials, RequestSigner, API_KEY_HEADER};
use bingx_types::Params;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, instrument, warn};

/// HTTP verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// DELETE
    Delete,
}

impl HttpMethod {
    fn as_method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
            Self::Delete => f.write_str("DELETE"),
        }
    }
}

/// Whether a request must be signed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Market data, no credentials involved
    Public,
    /// Requires API key header and signature
    Signed,
}

/// Transport core
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct Transport {
    http: Client,
    base_url: String,
    credentials: Option<Credentials>,
    recv_window_ms: Option<u64>,
}

impl Transport {
    /// Create a transport over an existing HTTP client
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        credentials: Option<Credentials>,
        recv_window_ms: Option<u64>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            credentials,
            recv_window_ms,
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if signed requests are possible
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Build the query string and API key header value for a request
    ///
    /// Signed queries are stamped with the current time.
    pub fn prepare(&self, params: Params, access: Access) -> RestResult<(String, Option<&str>)> {
        match access {
            Access::Public => {
                let query = serde_urlencoded::to_string(params.to_pairs())
                    .map_err(|e| RestError::InvalidParameter(e.to_string()))?;
                Ok((query, None))
            }
            Access::Signed => {
                let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
                let signed = RequestSigner::new(creds)
                    .with_recv_window(self.recv_window_ms)
                    .sign(params)?;
                Ok((signed.query, Some(creds.api_key())))
            }
        }
    }

    /// Send a request and return the raw response body
    ///
    /// # Errors
    /// - [`RestError::AuthRequired`] for a signed request without credentials
    /// - [`RestError::Transport`] / [`RestError::Timeout`] on network failure
    /// - [`RestError::Http`] on a non-2xx status
    #[instrument(skip(self, params))]
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        params: Params,
        access: Access,
    ) -> RestResult<Vec<u8>> {
        let (query, api_key) = self.prepare(params, access)?;

        let url = if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        };

        debug!("Sending {} request to {}", method, path);

        let mut request = self.http.request(method.as_method(), &url);
        if let Some(api_key) = api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            warn!(status = status.as_u16(), "HTTP error from {}", path);
            return Err(RestError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body.to_vec())
    }

    /// Send a request and decode the response envelope
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Params,
        access: Access,
    ) -> RestResult<ApiResponse<T>> {
        let body = self.send(method, path, params, access).await?;
        ApiResponse::from_slice(&body)
    }

    /// Send a request and return the payload of a successful envelope
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Params,
        access: Access,
    ) -> RestResult<T> {
        let response: ApiResponse<T> = self.request(method, path, params, access).await?;

        if let Some(err) = response.error() {
            warn!(code = response.code, msg = %response.msg, "Exchange rejected {}", path);
            return Err(err);
        }

        response.into_result()
    }

    /// Public GET returning the payload
    pub async fn get_public<T: DeserializeOwned>(&self, path: &str, params: Params) -> RestResult<T> {
        self.call(HttpMethod::Get, path, params, Access::Public).await
    }

    /// Signed GET returning the payload
    pub async fn get_signed<T: DeserializeOwned>(&self, path: &str, params: Params) -> RestResult<T> {
        self.call(HttpMethod::Get, path, params, Access::Signed).await
    }

    /// Signed POST returning the payload
    pub async fn post_signed<T: DeserializeOwned>(&self, path: &str, params: Params) -> RestResult<T> {
        self.call(HttpMethod::Post, path, params, Access::Signed).await
    }

    /// Signed DELETE returning the payload
    pub async fn delete_signed<T: DeserializeOwned>(&self, path: &str, params: Params) -> RestResult<T> {
        self.call(HttpMethod::Delete, path, params, Access::Signed).await
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .field("recv_window_ms", &self.recv_window_ms)
            .finish()
    }
}
