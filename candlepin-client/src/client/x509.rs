//! Certificate-authenticated client: mutual TLS with an identity certificate.

use std::path::Path;

use reqwest::Identity;
use serde_json::Value;
use url::Url;

use crate::client::{ConnectionOptions, HttpAccess};
use crate::error::{Error, Result};
use crate::transport::{JsonClient, RequestAuth};

/// Options for [`X509Client`]: the shared connection options plus the
/// identity-certificate pair, both PEM text.
///
/// `client_cert` and `client_key` must be supplied together or not at all;
/// [`X509Client::new`] rejects a lone half of the pair.
#[derive(Debug, Clone, Default)]
pub struct X509Options {
    pub connection: ConnectionOptions,
    pub client_cert: Option<String>,
    pub client_key: Option<String>,
}

/// A connection authenticated with an X.509 identity certificate, attached to
/// every request via mutual TLS.
///
/// The identity is usually obtained from a prior registration response
/// ([`from_consumer`](Self::from_consumer)) or loaded from disk
/// ([`from_files`](Self::from_files)).
#[derive(Debug)]
pub struct X509Client {
    pub options: X509Options,
    uuid: Option<String>,
    http: JsonClient,
}

impl X509Client {
    pub fn new(mut options: X509Options) -> Result<Self> {
        options.connection.normalize();
        let http = Self::build_transport(&options)?;
        Ok(Self {
            options,
            uuid: None,
            http,
        })
    }

    /// Build a client from the identity certificate embedded in a
    /// registration response (`idCert.cert` / `idCert.key`).
    ///
    /// ## Errors
    ///
    /// [`Error::CertificateConflict`] if `options` already carries an explicit
    /// certificate or key, since this factory is the sole source of those
    /// fields. [`Error::MissingKeys`] if the response lacks the identity
    /// fields.
    pub fn from_consumer(consumer: &Value, options: X509Options) -> Result<Self> {
        Self::reject_explicit_identity(&options)?;
        let client_cert = identity_field(consumer, "/idCert/cert")?;
        let client_key = identity_field(consumer, "/idCert/key")?;
        Self::new(X509Options {
            client_cert: Some(client_cert),
            client_key: Some(client_key),
            ..options
        })
    }

    /// Build a client from certificate and key PEM files.
    ///
    /// ## Errors
    ///
    /// [`Error::CertificateConflict`] if `options` already carries an explicit
    /// certificate or key; [`Error::Io`] if either file cannot be read.
    pub fn from_files(
        cert_path: impl AsRef<Path>,
        key_path: impl AsRef<Path>,
        options: X509Options,
    ) -> Result<Self> {
        Self::reject_explicit_identity(&options)?;
        let client_cert = std::fs::read_to_string(cert_path)?;
        let client_key = std::fs::read_to_string(key_path)?;
        Self::new(X509Options {
            client_cert: Some(client_cert),
            client_key: Some(client_key),
            ..options
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

    fn reject_explicit_identity(options: &X509Options) -> Result<()> {
        if options.client_cert.is_some() || options.client_key.is_some() {
            return Err(Error::CertificateConflict);
        }
        Ok(())
    }

    fn build_transport(options: &X509Options) -> Result<JsonClient> {
        let identity = match (&options.client_cert, &options.client_key) {
            (Some(cert), Some(key)) => {
                Some(Identity::from_pem(format!("{cert}\n{key}").as_bytes())?)
            }
            (None, None) => None,
            _ => return Err(Error::IncompleteIdentity),
        };
        JsonClient::build(&options.connection, identity, RequestAuth::None)
    }
}

impl HttpAccess for X509Client {
    fn http(&self) -> &JsonClient {
        &self.http
    }

    fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }
}

fn identity_field(consumer: &Value, pointer: &str) -> Result<String> {
    consumer
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| Error::MissingKeys {
            keys: vec![pointer.trim_start_matches('/').replace('/', ".")],
        })
}
