//! [Strapi]-compatible HTTP [`ContentStore`] implementation.
//!
//! [Strapi]: https://strapi.io

mod impls;
pub mod params;

use std::time::Duration;

use derive_more::{Display, Error as StdError, From};
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    RequestBuilder, StatusCode,
};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{de::DeserializeOwned, Deserialize};
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;
use url::Url;

use crate::infra::content_store;
#[cfg(doc)]
use crate::infra::ContentStore;

/// Path of the listings collection endpoint.
const LISTINGS: &str = "api/listings";

/// Path of the media upload endpoint.
const UPLOAD: &str = "api/upload";

/// [`Strapi`] client configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Base URL of the [Strapi] instance.
    ///
    /// [Strapi]: https://strapi.io
    #[default("http://127.0.0.1:1337".to_owned())]
    pub base_url: String,

    /// API token authorizing the requests, if any.
    pub api_token: Option<SecretString>,

    /// Timeout of a single request.
    #[default(Duration::from_secs(10))]
    pub timeout: Duration,
}

/// [Strapi]-compatible HTTP [`ContentStore`].
///
/// [Strapi]: https://strapi.io
#[derive(Clone, Debug)]
pub struct Strapi {
    /// HTTP client performing the requests.
    client: reqwest::Client,

    /// Base URL of the [Strapi] instance, always ending with `/`.
    ///
    /// [Strapi]: https://strapi.io
    base_url: Url,
}

impl Strapi {
    /// Creates a new [`Strapi`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the [`Config::base_url`] or the [`Config::api_token`] is malformed,
    /// or the HTTP client cannot be built.
    pub fn new(conf: &Config) -> Result<Self, Traced<content_store::Error>> {
        let mut base_url = Url::parse(&conf.base_url)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = &conf.api_token {
            let mut value = HeaderValue::try_from(format!(
                "Bearer {}",
                token.expose_secret(),
            ))
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
            value.set_sensitive(true);
            drop(headers.insert(header::AUTHORIZATION, value));
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        Ok(Self { client, base_url })
    }

    /// Resolves the provided `path` against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, Traced<Error>> {
        self.base_url
            .join(path)
            .map_err(tracerr::from_and_wrap!(=> Error))
    }

    /// Sends the provided request and decodes its successful response body.
    ///
    /// # Errors
    ///
    /// - [`Error::Request`] if the request cannot be performed;
    /// - [`Error::Status`] if the response status is not successful;
    /// - [`Error::Decode`] if the response body is malformed.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, Traced<Error>> {
        let body = self.send_raw(request).await.map_err(tracerr::wrap!())?;
        serde_json::from_slice(&body).map_err(tracerr::from_and_wrap!(=> Error))
    }

    /// Sends the provided request and returns its successful response body
    /// as is.
    async fn send_raw(
        &self,
        request: RequestBuilder,
    ) -> Result<Vec<u8>, Traced<Error>> {
        let request = request
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        log::debug!("{} {}", request.method(), request.url());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .inspect_err(|e| log::warn!("Strapi request failed: {e}"))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| {
                    String::from_utf8_lossy(&body).into_owned()
                });
            if status != StatusCode::NOT_FOUND {
                log::warn!("Strapi responded with `{status}`: {message}");
            }
            return Err(tracerr::new!(Error::Status { status, message }));
        }

        Ok(body.to_vec())
    }
}

/// [`Strapi`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request cannot be performed (including timeouts).
    #[display("Request to Strapi failed: {_0}")]
    Request(reqwest::Error),

    /// Response status is not successful.
    #[display("Strapi responded with `{status}`: {message}")]
    #[from(ignore)]
    Status {
        /// HTTP status of the response.
        status: StatusCode,

        /// Error message reported by Strapi.
        message: String,
    },

    /// Response body is malformed.
    #[display("Malformed Strapi response: {_0}")]
    Decode(serde_json::Error),

    /// URL is malformed.
    #[display("Malformed Strapi URL: {_0}")]
    Url(url::ParseError),

    /// API token cannot be used as a header value.
    #[display("Malformed Strapi API token")]
    Token(header::InvalidHeaderValue),
}

impl Error {
    /// Indicates whether this [`Error`] reports a missing resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Status { status, .. } if *status == StatusCode::NOT_FOUND,
        )
    }
}

/// Envelope of a single document.
#[derive(Debug, Deserialize)]
struct Single<T> {
    /// Enveloped document.
    data: T,
}

/// Envelope of a collection page.
#[derive(Debug, Deserialize)]
struct Collection<T> {
    /// Documents on the page.
    data: Vec<T>,

    /// Metadata of the page.
    meta: CollectionMeta,
}

/// Metadata of a [`Collection`].
#[derive(Debug, Deserialize)]
struct CollectionMeta {
    /// Pagination of the [`Collection`].
    pagination: Pagination,
}

/// Pagination of a [`Collection`], as computed by [Strapi].
///
/// [Strapi]: https://strapi.io
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    /// Number of the page.
    page: usize,

    /// Size of the page.
    page_size: usize,

    /// Total number of pages.
    page_count: usize,

    /// Total number of documents.
    total: usize,
}

/// Envelope of an error.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    /// Enveloped error.
    error: ErrorBody,
}

/// Error reported by [Strapi].
///
/// [Strapi]: https://strapi.io
#[derive(Debug, Deserialize)]
struct ErrorBody {
    /// Human-readable error message.
    message: String,
}
