//! OAuth client: declared, but request signing is not yet implemented.

use url::Url;

use crate::client::{ConnectionOptions, HttpAccess};
use crate::error::Result;
use crate::transport::{JsonClient, RequestAuth};

/// Options for [`OAuthClient`]: the shared connection options plus the
/// consumer key and secret.
#[derive(Debug, Clone, Default)]
pub struct OAuthOptions {
    pub connection: ConnectionOptions,
    pub oauth_key: Option<String>,
    pub oauth_secret: Option<String>,
}

/// A connection configured for OAuth.
///
/// Signing is intentionally unimplemented: the key and secret are recorded so
/// configuration round-trips, but requests currently go out unsigned, exactly
/// like [`NoAuthClient`](crate::NoAuthClient).
#[derive(Debug)]
pub struct OAuthClient {
    pub options: OAuthOptions,
    uuid: Option<String>,
    http: JsonClient,
}

impl OAuthClient {
    pub fn new(mut options: OAuthOptions) -> Result<Self> {
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

    fn build_transport(options: &OAuthOptions) -> Result<JsonClient> {
        // TODO: OAuth request signing; oauth_key/oauth_secret are carried but
        // not yet applied to outgoing requests.
        JsonClient::build(&options.connection, None, RequestAuth::None)
    }
}

impl HttpAccess for OAuthClient {
    fn http(&self) -> &JsonClient {
        &self.http
    }

    fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn test_key_and_secret_are_recorded() {
        let client = OAuthClient::new(OAuthOptions {
            oauth_key: Some("key".to_string()),
            oauth_secret: Some("secret".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.options.oauth_key.as_deref(), Some("key"));
        assert_eq!(client.options.oauth_secret.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn test_requests_go_out_unsigned() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/candlepin/status"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let address = *server.address();
        let client = OAuthClient::new(OAuthOptions {
            connection: ConnectionOptions {
                host: address.ip().to_string(),
                port: address.port(),
                use_ssl: false,
                ..Default::default()
            },
            oauth_key: Some("key".to_string()),
            oauth_secret: Some("secret".to_string()),
        })
        .unwrap();

        client.http().get("/status").send().await.unwrap();
        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }
}
