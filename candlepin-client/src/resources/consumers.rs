//! Consumer operations: registration, updates, and guest-ID management.

use std::future::Future;

use serde_json::{json, Value};

use crate::client::HttpAccess;
use crate::error::Result;
use crate::options::{camelize_keys, merge_defaults, select_from, select_from_with, RequestOptions};
use crate::resources::path_param;
use crate::response::Response;

pub trait ConsumerResource: HttpAccess {
    /// Register a consumer.
    ///
    /// The consumer body is assembled from `name`, `facts`, and `uuid`, plus
    /// the derived pieces: a nested `hypervisorId` object when a hypervisor
    /// id is given, `capabilities` as a list of name objects, the consumer
    /// `type` label, and `installedProducts`. When `environment` is set the
    /// registration is scoped under that environment's path. `username`,
    /// `owner`, and comma-joined `activation_keys` travel as query
    /// parameters.
    fn register(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({
                "name": null,
                "type": "system",
                "uuid": self.uuid(),
                "facts": {},
                "username": null,
                "owner": null,
                "activation_keys": [],
                "installed_products": [],
                "environment": null,
                "capabilities": [],
                "hypervisor_id": null,
            });
            let opts = merge_defaults(opts, defaults)?;

            let consumer = select_from_with(&opts, &["name", "facts", "uuid"], |subset, source| {
                if let Some(hypervisor_id) = source.get("hypervisor_id").filter(|v| !v.is_null()) {
                    subset.insert(
                        "hypervisorId".to_string(),
                        json!({ "hypervisorId": hypervisor_id }),
                    );
                }
                if let Some(capabilities) = source.get("capabilities").and_then(Value::as_array) {
                    if !capabilities.is_empty() {
                        let capabilities: Vec<Value> = capabilities
                            .iter()
                            .map(|name| json!({ "name": name }))
                            .collect();
                        subset.insert("capabilities".to_string(), Value::Array(capabilities));
                    }
                }
            })?;

            let mut body = RequestOptions::new();
            body.insert("type".to_string(), json!({ "label": opts["type"] }));
            body.insert(
                "installedProducts".to_string(),
                opts["installed_products"].clone(),
            );
            for (key, value) in consumer {
                body.insert(key, value);
            }

            let path = if opts["environment"].is_null() {
                "/consumers".to_string()
            } else {
                format!("/environments/{}/consumers", path_param(&opts, "environment"))
            };

            let mut query = select_from(&opts, &["username", "owner"])?;
            let activation_keys = opts["activation_keys"]
                .as_array()
                .map(|keys| {
                    keys.iter()
                        .map(|key| match key {
                            Value::String(text) => text.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .unwrap_or_default();
            if !activation_keys.is_empty() {
                query.insert("activation_keys".to_string(), Value::String(activation_keys));
            }

            self.http()
                .post(&path)
                .query(&query)
                .body(Value::Object(body))
                .send()
                .await
        }
    }

    /// Update a consumer. The whole option mapping is camelized and sent as
    /// the body; capabilities and guest ids are expanded into their object
    /// forms first.
    fn update_consumer(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({
                "uuid": self.uuid(),
                "facts": {},
                "installed_products": [],
                "hypervisor_id": null,
                "guest_ids": [],
                "autoheal": true,
                "service_level": null,
                "capabilities": [],
            });
            let opts = merge_defaults(opts, defaults)?;

            let mut body = opts.clone();
            if let Some(capabilities) = body.get_mut("capabilities").and_then(Value::as_array_mut) {
                for capability in capabilities.iter_mut() {
                    *capability = json!({ "name": std::mem::take(capability) });
                }
            }
            if let Some(guest_ids) = body.get_mut("guest_ids").and_then(Value::as_array_mut) {
                for guest_id in guest_ids.iter_mut() {
                    *guest_id = json!({ "guestId": std::mem::take(guest_id) });
                }
            }
            let body = camelize_keys(&body);

            let path = format!("/consumers/{}", path_param(&opts, "uuid"));
            self.http().put(&path).body(Value::Object(body)).send().await
        }
    }

    /// Replace the full guest-ID list of a consumer.
    fn update_all_guest_ids(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "uuid": self.uuid(), "guest_ids": [] });
            let opts = merge_defaults(opts, defaults)?;

            let guest_ids: Vec<Value> = opts["guest_ids"]
                .as_array()
                .map(|ids| ids.iter().map(|id| json!({ "guestId": id })).collect())
                .unwrap_or_default();

            let path = format!("/consumers/{}/guestids", path_param(&opts, "uuid"));
            self.http()
                .put(&path)
                .body(Value::Array(guest_ids))
                .send()
                .await
        }
    }

    fn update_guest_id(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "uuid": self.uuid(), "guest_id": null });
            let opts = merge_defaults(opts, defaults)?;

            let body = camelize_keys(&select_from(&opts, &["guest_id"])?);
            let path = format!(
                "/consumers/{}/guestids/{}",
                path_param(&opts, "uuid"),
                path_param(&opts, "guest_id")
            );
            self.http().put(&path).body(Value::Object(body)).send().await
        }
    }

    fn get_all_guest_ids(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "uuid": self.uuid() });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!("/consumers/{}/guestids", path_param(&opts, "uuid"));
            self.http().get(&path).send().await
        }
    }

    fn get_guest_id(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "uuid": self.uuid(), "guest_id": null });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!(
                "/consumers/{}/guestids/{}",
                path_param(&opts, "uuid"),
                path_param(&opts, "guest_id")
            );
            self.http().get(&path).send().await
        }
    }

    /// Remove a guest ID; `unregister` also unregisters the guest's consumer.
    fn delete_guest_id(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({
                "uuid": self.uuid(),
                "guest_id": null,
                "unregister": false,
            });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!(
                "/consumers/{}/guestids/{}",
                path_param(&opts, "uuid"),
                path_param(&opts, "guest_id")
            );
            let query = select_from(&opts, &["unregister"])?;
            self.http().delete(&path).query(&query).send().await
        }
    }

    /// Remove the deletion record left behind by a deleted consumer, allowing
    /// its UUID to be reused.
    fn delete_deletion_record(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "deleted_uuid": null });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!(
                "/consumers/{}/deletionrecord",
                path_param(&opts, "deleted_uuid")
            );
            self.http().delete(&path).send().await
        }
    }
}

impl<T: HttpAccess> ConsumerResource for T {}
