//! Entitlement updates.

use std::future::Future;

use serde_json::{json, Value};

use crate::client::HttpAccess;
use crate::error::Result;
use crate::options::{merge_defaults, select_from};
use crate::resources::path_param;
use crate::response::Response;

pub trait EntitlementResource: HttpAccess {
    fn update_entitlement(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "id": null, "quantity": 1 });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!("/entitlements/{}", path_param(&opts, "id"));
            self.http()
                .put(&path)
                .body(Value::Object(opts))
                .send()
                .await
        }
    }

    /// Move an entitlement to another consumer.
    fn update_entitlement_consumer(
        &self,
        opts: Value,
    ) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "id": null, "to_consumer": null, "quantity": 1 });
            let opts = merge_defaults(opts, defaults)?;

            let body = select_from(&opts, &["to_consumer", "quantity"])?;
            let path = format!("/entitlements/{}", path_param(&opts, "id"));
            self.http()
                .put(&path)
                .body(Value::Object(body))
                .send()
                .await
        }
    }
}

impl<T: HttpAccess> EntitlementResource for T {}
