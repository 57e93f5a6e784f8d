//! JSON transport adapter over `reqwest`.
//!
//! [`JsonClient`] holds the configured HTTP channel for one client instance:
//! the built `reqwest::Client`, the base URL assembled from the connection
//! options, and the per-request authentication mode. Verbs return a
//! [`JsonRequest`] builder; completion is `send().await` or, for callers
//! without an ambient runtime, `send_blocking()`.
//!
//! Queuing a structured body serializes it to JSON and applies
//! `Content-Type: application/json; charset=utf-8` to that single request.
//! The override lives on the request builder, so concurrent requests on the
//! same client share no mutable state. An explicit content-type set through
//! [`JsonRequest::header`] wins over the automatic value.
//!
//! Response bodies are decoded per [`crate::response`]: JSON-typed bodies come
//! back parsed, everything else raw. A non-2xx status becomes
//! [`Error::Server`] carrying the decoded body; nothing is retried here.
//! Retry policy belongs to the calling automation.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Certificate, Identity};
use serde_json::Value;
use tracing::{debug, instrument, Span};
use url::Url;

use crate::client::ConnectionOptions;
use crate::error::{Error, Result};
use crate::method::Method;
use crate::options::RequestOptions;
use crate::response::{Response, ResponseBody};

/// The content-type applied to outgoing JSON bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Authentication applied to each outgoing request.
///
/// Mutual TLS is not represented here; a client certificate is part of the
/// built `reqwest::Client` itself.
#[derive(Debug, Clone)]
pub(crate) enum RequestAuth {
    None,
    /// Proactive HTTP Basic: credentials ride on every request, not only
    /// after a 401 challenge.
    Basic { username: String, password: String },
}

/// The configured HTTP(S) channel used to send requests and receive
/// responses. Derived deterministically from a client's option values;
/// rebuilt only on an explicit `reload`.
#[derive(Debug, Clone)]
pub struct JsonClient {
    http: reqwest::Client,
    base_url: Url,
    auth: RequestAuth,
}

impl JsonClient {
    /// Build the transport from connection options plus the variant-specific
    /// effects: an optional mutual-TLS identity and the per-request auth mode.
    pub(crate) fn build(
        options: &ConnectionOptions,
        identity: Option<Identity>,
        auth: RequestAuth,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder().connect_timeout(options.connection_timeout);
        if options.use_ssl {
            if options.insecure {
                builder = builder.danger_accept_invalid_certs(true);
            } else if let Some(ca_path) = &options.ca_path {
                let pem = std::fs::read(ca_path)?;
                builder = builder.add_root_certificate(Certificate::from_pem(&pem)?);
            }
        }
        if let Some(identity) = identity {
            builder = builder.identity(identity);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: options.base_url()?,
            auth,
        })
    }

    /// The URL every request path is appended to: scheme, host, port, and
    /// context path.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn request(&self, method: Method, path: &str) -> JsonRequest<'_> {
        JsonRequest {
            client: self,
            method,
            path: path.to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(&self, path: &str) -> JsonRequest<'_> {
        self.request(Method::Get, path)
    }

    pub fn post(&self, path: &str) -> JsonRequest<'_> {
        self.request(Method::Post, path)
    }

    pub fn put(&self, path: &str) -> JsonRequest<'_> {
        self.request(Method::Put, path)
    }

    pub fn delete(&self, path: &str) -> JsonRequest<'_> {
        self.request(Method::Delete, path)
    }
}

/// One request in flight: verb, path, and the optional query mapping, extra
/// headers, and JSON body.
#[derive(Debug)]
pub struct JsonRequest<'a> {
    client: &'a JsonClient,
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl JsonRequest<'_> {
    /// Append a query mapping. Scalar values are stringified; `null` values
    /// are skipped entirely rather than sent as empty strings.
    pub fn query(mut self, args: &RequestOptions) -> Self {
        for (key, value) in args {
            match value {
                Value::Null => {}
                Value::String(text) => self.query.push((key.clone(), text.clone())),
                other => self.query.push((key.clone(), other.to_string())),
            }
        }
        self
    }

    /// Add a header to this request only. A content-type given here wins over
    /// the automatic JSON value applied by [`body`](Self::body).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Queue a structured body. It is serialized to JSON at send time and the
    /// outgoing content-type is set to [`CONTENT_TYPE_JSON`] for this single
    /// request.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Send the request and decode the response.
    ///
    /// ## Errors
    ///
    /// - [`Error::Transport`] for network and TLS failures, surfaced
    ///   unchanged from `reqwest`.
    /// - [`Error::Server`] for any non-2xx status, with the decoded body.
    /// - [`Error::Json`] when a body fails to serialize, or a JSON-typed
    ///   response fails to parse.
    #[instrument(
        name = "candlepin_request",
        skip(self),
        fields(
            http.method = %self.method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
        )
    )]
    pub async fn send(self) -> Result<Response> {
        let url = format!(
            "{}{}",
            self.client.base_url.as_str().trim_end_matches('/'),
            self.path
        );
        Span::current().record("http.url", url.as_str());
        debug!("sending request");

        let mut request = self.client.http.request(self.method.to_reqwest(), url.as_str());
        if !self.query.is_empty() {
            request = request.query(&self.query);
        }
        if let Some(body) = &self.body {
            let has_explicit_content_type = self
                .headers
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
            if !has_explicit_content_type {
                request = request.header(CONTENT_TYPE, CONTENT_TYPE_JSON);
            }
            request = request.body(serde_json::to_string(body)?);
        }
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let RequestAuth::Basic { username, password } = &self.client.auth {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await?;
        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let text = response.text().await?;
        let body = ResponseBody::decode(content_type.as_deref(), text)?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "server returned an error response");
            return Err(Error::Server { status, body });
        }
        Ok(Response { status, body })
    }

    /// Synchronous variant of [`send`](Self::send): drives the same future on
    /// a private current-thread runtime and blocks the calling thread until
    /// the response arrives. Must not be called from within an async context.
    pub fn send_blocking(self) -> Result<Response> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.send())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tracing_test::traced_test;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(server: &MockServer) -> JsonClient {
        let address = server.address();
        let options = ConnectionOptions {
            host: address.ip().to_string(),
            port: address.port(),
            use_ssl: false,
            ..Default::default()
        };
        JsonClient::build(&options, None, RequestAuth::None).unwrap()
    }

    #[tokio::test]
    async fn test_post_serializes_body_and_sets_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/candlepin/things"))
            .and(header("content-type", CONTENT_TYPE_JSON))
            .and(body_json(json!({ "a": 1 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "x": 1 })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client.post("/things").body(json!({ "a": 1 })).send().await.unwrap();
        assert_eq!(response.json(), Some(&json!({ "x": 1 })));
    }

    #[tokio::test]
    async fn test_request_without_body_has_no_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/candlepin/things"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.get("/things").send().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("content-type").is_none());
    }

    #[tokio::test]
    async fn test_explicit_content_type_wins_over_automatic_json() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/candlepin/things"))
            .and(header("content-type", "application/zjeux"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .put("/things")
            .body(json!({ "a": 1 }))
            .header("content-type", "application/zjeux")
            .send()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_json_response_is_decoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/candlepin/status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "TEXT/X-JSON")
                    .set_body_string(r#"{"mode":"NORMAL"}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client.get("/status").send().await.unwrap();
        assert_eq!(response.body, ResponseBody::Json(json!({ "mode": "NORMAL" })));
    }

    #[tokio::test]
    async fn test_plain_text_response_is_returned_raw() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/candlepin/status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/plain")
                    .set_body_string("all good"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client.get("/status").send().await.unwrap();
        assert_eq!(response.body, ResponseBody::Raw("all good".to_string()));
    }

    #[tokio::test]
    async fn test_query_mapping_skips_null_values() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/candlepin/things"))
            .and(query_param("owner", "admin"))
            .and(query_param("count", "2"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let query = crate::options::merge_defaults(
            json!({}),
            json!({ "owner": "admin", "count": 2, "username": null }),
        )
        .unwrap();
        client.get("/things").query(&query).send().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(!requests[0].url.as_str().contains("username"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/candlepin/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .insert_header("content-type", "application/json")
                    .set_body_string(r#"{"displayMessage":"no such thing"}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get("/missing").send().await.unwrap_err();
        match err {
            Error::Server { status, body } => {
                assert_eq!(status.as_u16(), 404);
                assert_eq!(body, ResponseBody::Json(json!({ "displayMessage": "no such thing" })));
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn test_send_is_traced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/candlepin/status"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.get("/status").send().await.unwrap();
        assert!(logs_contain("sending request"));
    }

    #[test]
    fn test_send_blocking_completes_without_ambient_runtime() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/candlepin/status"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .insert_header("content-type", "application/json")
                        .set_body_string(r#"{"result":"ok"}"#),
                )
                .mount(&server)
                .await;
            server
        });

        let client = {
            let address = server.address();
            let options = ConnectionOptions {
                host: address.ip().to_string(),
                port: address.port(),
                use_ssl: false,
                ..Default::default()
            };
            JsonClient::build(&options, None, RequestAuth::None).unwrap()
        };

        let response = client.get("/status").send_blocking().unwrap();
        assert_eq!(response.json(), Some(&json!({ "result": "ok" })));
    }
}
