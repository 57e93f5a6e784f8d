//! Per-resource REST operations, mixed into every client variant.
//!
//! Each resource (consumers, users, roles, ...) is one trait with provided
//! async bodies, blanket-implemented for anything that exposes the transport
//! through [`HttpAccess`](crate::client::HttpAccess). The composition is
//! enumerated right here and fixed at build time: bringing a trait into scope
//! is all it takes to call its operations on any client.
//!
//! Conventions, mirrored from the server API:
//! * operations take a single JSON options object, merged over the
//!   operation's declared defaults; an unknown key fails before any I/O;
//! * GET operations are named `get_*`, DELETE `delete_*`, POST `create_*`/
//!   `add_*`/`post_*`/`register`, PUT `update_*`.

mod consumers;
mod deleted_consumers;
mod entitlements;
mod hypervisors;
mod owners;
mod roles;
mod users;

pub use consumers::ConsumerResource;
pub use deleted_consumers::DeletedConsumerResource;
pub use entitlements::EntitlementResource;
pub use hypervisors::HypervisorResource;
pub use owners::OwnerResource;
pub use roles::RoleResource;
pub use users::UserResource;

use serde_json::Value;

use crate::options::RequestOptions;

/// Interpolate an option value into a URL path segment. Null becomes the
/// empty segment rather than the literal `null`.
pub(crate) fn path_param(opts: &RequestOptions, key: &str) -> String {
    match opts.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
