//! Resolution of the caller's public IP address.
//!
//! The address is captured once per wish through a public echo endpoint that
//! answers `GET` with a JSON body of the form `{"ip": "203.0.113.7"}`.  The
//! returned string is not trusted: it is checked against the wish schema when
//! the record is assembled.

mod error;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

pub use error::{IpLookupError, IpLookupResult};

/// Default timeout for echo requests
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of idle connections to maintain per host
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;

/// Looks up the IP address the caller is seen from
#[async_trait]
pub trait IpLookup: Send + Sync {
    /// Returns the caller's address as reported by the lookup service
    async fn lookup(&self) -> IpLookupResult<String>;
}

/// Body returned by the echo endpoint
#[derive(Debug, Deserialize)]
struct IpEchoResponse {
    ip: String,
}

/// IP lookup over HTTP against an echo endpoint
pub struct HttpIpLookup {
    url: String,
    http_client: Client,
}

impl HttpIpLookup {
    /// Creates a lookup client for the given echo URL
    ///
    /// # Panics
    ///
    /// If the HTTP client fails to be created
    #[must_use]
    pub fn new(url: String) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .user_agent(format!("wish-wall/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self { url, http_client }
    }
}

#[async_trait]
impl IpLookup for HttpIpLookup {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn lookup(&self) -> IpLookupResult<String> {
        let response = self.http_client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IpLookupError::UnexpectedStatus(status));
        }

        let body = response.json::<IpEchoResponse>().await?;
        debug!("Resolved caller IP address");

        Ok(body.ip)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Lookup double returning a fixed answer

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::{IpLookup, IpLookupError, IpLookupResult};

    /// Returns the same address, or the same failure, on every call
    pub struct StaticIpLookup {
        address: Option<String>,
        calls: AtomicUsize,
    }

    impl StaticIpLookup {
        /// Always resolves to `address`
        #[must_use]
        pub fn new(address: impl Into<String>) -> Self {
            Self {
                address: Some(address.into()),
                calls: AtomicUsize::new(0),
            }
        }

        /// Always fails as if the endpoint were unreachable
        #[must_use]
        pub const fn failing() -> Self {
            Self {
                address: None,
                calls: AtomicUsize::new(0),
            }
        }

        /// Number of lookups performed so far
        #[must_use]
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IpLookup for StaticIpLookup {
        async fn lookup(&self) -> IpLookupResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.address
                .clone()
                .ok_or_else(|| IpLookupError::Unreachable("static lookup failure".to_string()))
        }
    }
}
