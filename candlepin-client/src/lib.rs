//! Client library for the Candlepin entitlement service's REST API.
//!
//! ## Layers
//!
//! - [`options`] - the option contract: validate, merge, and subset the JSON
//!   option mappings every operation is driven with.
//! - [`transport`] - the JSON transport: verbs over a configured
//!   `reqwest::Client`, automatic JSON body serialization, and
//!   content-type–negotiated response decoding.
//! - [`client`] - four authentication variants (anonymous, identity
//!   certificate, basic auth, OAuth placeholder) that configure the transport
//!   differently and can rebuild it via `reload` after configuration changes.
//! - [`resources`] - per-resource operations (consumers, users, roles, ...),
//!   mixed into every variant through the [`HttpAccess`] trait.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use candlepin_client::{BasicAuthClient, BasicAuthOptions, ConnectionOptions, ConsumerResource};
//! use serde_json::json;
//!
//! # async fn run() -> candlepin_client::Result<()> {
//! let client = BasicAuthClient::new(BasicAuthOptions {
//!     connection: ConnectionOptions {
//!         host: "candlepin.example.com".to_string(),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! })?;
//!
//! let consumer = client
//!     .register(json!({ "name": "box", "owner": "admin" }))
//!     .await?;
//! println!("registered: {:?}", consumer.json());
//! # Ok(())
//! # }
//! ```
//!
//! Callers without an async runtime can finish any request with
//! `send_blocking()` on the transport's request builder instead of awaiting
//! `send()`.

pub mod client;
pub mod error;
pub mod method;
pub mod options;
pub mod resources;
pub mod response;
pub mod transport;

pub use client::{
    BasicAuthClient, BasicAuthOptions, ConnectionOptions, HttpAccess, NoAuthClient, OAuthClient,
    OAuthOptions, X509Client, X509Options,
};
pub use error::{Error, Result};
pub use method::Method;
pub use resources::{
    ConsumerResource, DeletedConsumerResource, EntitlementResource, HypervisorResource,
    OwnerResource, RoleResource, UserResource,
};
pub use response::{Response, ResponseBody};
pub use transport::{JsonClient, JsonRequest};
