//! Anonymous client: no authentication attached.

use url::Url;

use crate::client::{ConnectionOptions, HttpAccess};
use crate::error::Result;
use crate::transport::{JsonClient, RequestAuth};

/// A connection without any authentication.
///
/// ## Examples
///
/// ```rust,no_run
/// use candlepin_client::{ConnectionOptions, NoAuthClient};
///
/// let client = NoAuthClient::new(ConnectionOptions {
///     host: "candlepin.example.com".to_string(),
///     ..Default::default()
/// })?;
/// # Ok::<(), candlepin_client::Error>(())
/// ```
#[derive(Debug)]
pub struct NoAuthClient {
    pub options: ConnectionOptions,
    uuid: Option<String>,
    http: JsonClient,
}

impl NoAuthClient {
    pub fn new(mut options: ConnectionOptions) -> Result<Self> {
        options.normalize();
        let http = JsonClient::build(&options, None, RequestAuth::None)?;
        Ok(Self {
            options,
            uuid: None,
            http,
        })
    }

    /// Rebuild the transport from the current option values. Useful after
    /// mutating `options` through the public fields.
    pub fn reload(&mut self) -> Result<()> {
        self.options.normalize();
        self.http = JsonClient::build(&self.options, None, RequestAuth::None)?;
        Ok(())
    }

    pub fn base_url(&self) -> &Url {
        self.http.base_url()
    }

    /// Set the consumer UUID used as the default by consumer-scoped
    /// operations such as `update_consumer`.
    pub fn set_uuid(&mut self, uuid: impl Into<String>) {
        self.uuid = Some(uuid.into());
    }
}

impl HttpAccess for NoAuthClient {
    fn http(&self) -> &JsonClient {
        &self.http
    }

    fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }
}
