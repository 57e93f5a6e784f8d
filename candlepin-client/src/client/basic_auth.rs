//! Basic-auth client: credentials ride proactively on every request.

use url::Url;

use crate::client::{ConnectionOptions, HttpAccess};
use crate::error::Result;
use crate::transport::{JsonClient, RequestAuth};

/// Options for [`BasicAuthClient`]. Username and password both default to
/// `"admin"`, the stock development credentials.
#[derive(Debug, Clone)]
pub struct BasicAuthOptions {
    pub connection: ConnectionOptions,
    pub username: String,
    pub password: String,
}

impl Default for BasicAuthOptions {
    fn default() -> Self {
        Self {
            connection: ConnectionOptions::default(),
            username: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

/// A connection using HTTP basic authentication.
///
/// Credentials are attached to every outgoing request up front rather than
/// replayed after a 401 challenge, saving a round trip against servers that
/// always require them.
#[derive(Debug)]
pub struct BasicAuthClient {
    pub options: BasicAuthOptions,
    uuid: Option<String>,
    http: JsonClient,
}

impl BasicAuthClient {
    pub fn new(mut options: BasicAuthOptions) -> Result<Self> {
        options.connection.normalize();
        let http = Self::build_transport(&options)?;
        Ok(Self {
            options,
            uuid: None,
            http,
        })
    }

    /// Rebuild the transport from the current option values.
    pub fn reload(&mut self) -> Result<()> {
        self.options.connection.normalize();
        self.http = Self::build_transport(&self.options)?;
        Ok(())
    }

    pub fn base_url(&self) -> &Url {
        self.http.base_url()
    }

    pub fn set_uuid(&mut self, uuid: impl Into<String>) {
        self.uuid = Some(uuid.into());
    }

    fn build_transport(options: &BasicAuthOptions) -> Result<JsonClient> {
        JsonClient::build(
            &options.connection,
            None,
            RequestAuth::Basic {
                username: options.username.clone(),
                password: options.password.clone(),
            },
        )
    }
}

impl HttpAccess for BasicAuthClient {
    fn http(&self) -> &JsonClient {
        &self.http
    }

    fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }
}
