//! Connection configuration shared by every client variant.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::Result;

/// Where and how to reach the server.
///
/// Defaults are aimed at a local development deployment: `localhost:8443`,
/// HTTPS, certificate verification skipped (test servers are routinely
/// self-signed), and an aggressive 3-second connect timeout.
///
/// ## Examples
///
/// ```rust
/// use candlepin_client::ConnectionOptions;
///
/// let options = ConnectionOptions {
///     host: "example.com".to_string(),
///     context: "candlepin".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(options.base_url().unwrap().as_str(), "https://example.com:8443/candlepin");
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    pub host: String,
    pub port: u16,
    /// Base path of the API. A leading `/` is inserted when missing, so
    /// `"candlepin"` and `"/candlepin"` are equivalent.
    pub context: String,
    /// Selects the HTTPS scheme when set, HTTP otherwise.
    pub use_ssl: bool,
    /// Skip TLS certificate and hostname verification.
    pub insecure: bool,
    /// Trusted CA bundle, consulted only when `insecure` is off.
    pub ca_path: Option<PathBuf>,
    pub connection_timeout: Duration,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8443,
            context: "/candlepin".to_string(),
            use_ssl: true,
            insecure: true,
            ca_path: None,
            connection_timeout: Duration::from_secs(3),
        }
    }
}

impl ConnectionOptions {
    /// Insert the leading path separator when the context lacks one. Applied
    /// at construction and again on every `reload`, so a transport never sees
    /// an unanchored context path.
    pub(crate) fn normalize(&mut self) {
        if !self.context.starts_with('/') {
            self.context.insert(0, '/');
        }
    }

    /// The base URL the transport prepends to request paths: scheme derived
    /// from `use_ssl`, then host, port, and context path.
    pub fn base_url(&self) -> Result<Url> {
        let scheme = if self.use_ssl { "https" } else { "http" };
        let mut context = self.context.clone();
        if !context.starts_with('/') {
            context.insert(0, '/');
        }
        Ok(Url::parse(&format!(
            "{scheme}://{}:{}{context}",
            self.host, self.port
        ))?)
    }
}
