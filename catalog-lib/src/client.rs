//! Main CatalogClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::ApiError;
use crate::error::Error;
use crate::model::Product;
use crate::model::parse_products;

/// Client for a read-only product catalog endpoint.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks safely.
///
/// # Example
///
/// ```ignore
/// use catalog_lib::CatalogClient;
///
/// let client = CatalogClient::builder()
///     .url("https://fakestoreapi.com/products")
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let products = client.fetch_products().await?;
/// ```
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    base_url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl CatalogClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> CatalogClientBuilder<Missing> {
        CatalogClientBuilder::new()
    }

    /// Retrieves the product collection with a single `GET` on the base URL.
    ///
    /// Non-2xx responses, transport failures and bodies that are not a JSON
    /// array are errors. Individual malformed entries are skipped.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, Error> {
        let mut request = self
            .inner
            .http_client
            .get(self.inner.base_url.clone())
            .header(ACCEPT, "application/json");

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        log::debug!("GET {}", self.inner.base_url);
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(ApiError::http(status.as_u16(), body)));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let products = parse_products(&body)?;
        log::debug!("Decoded {} products from {}", products.len(), self.inner.base_url);
        Ok(products)
    }

    /// Like [`fetch_products`](Self::fetch_products), but gives up as soon as
    /// `token` is cancelled.
    ///
    /// The in-flight request is dropped on cancellation and
    /// [`Error::Cancelled`] is returned.
    pub async fn fetch_products_with_cancel(
        &self,
        token: &CancellationToken,
    ) -> Result<Vec<Product>, Error> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                log::debug!("Fetch from {} cancelled", self.inner.base_url);
                Err(Error::Cancelled)
            }
            result = self.fetch_products() => result,
        }
    }

    /// Returns the catalog URL.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Returns the per-request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if err.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(err),
        }
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`CatalogClient`].
///
/// Uses the typestate pattern so `build()` only exists once `url` is set.
pub struct CatalogClientBuilder<U> {
    url: U,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl CatalogClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for CatalogClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClientBuilder<Missing> {
    /// Sets the catalog URL.
    pub fn url(self, url: impl Into<String>) -> CatalogClientBuilder<Set<String>> {
        CatalogClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> CatalogClientBuilder<U> {
    /// Sets the request timeout. Requests are unbounded when unset.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl CatalogClientBuilder<Set<String>> {
    /// Builds the [`CatalogClient`].
    ///
    /// Fails with [`ApiError::InvalidUrl`] if the URL does not parse or is
    /// not `http`/`https`.
    pub fn build(self) -> Result<CatalogClient, ApiError> {
        let raw = self.url.0;
        let base_url =
            Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                raw,
                base_url.scheme()
            )));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(CatalogClient {
            inner: Arc::new(CatalogClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
