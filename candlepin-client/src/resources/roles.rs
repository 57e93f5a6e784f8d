//! Role and permission management.

use std::future::Future;

use serde_json::{json, Value};

use crate::client::HttpAccess;
use crate::error::Result;
use crate::options::{merge_defaults, select_from};
use crate::resources::path_param;
use crate::response::Response;

pub trait RoleResource: HttpAccess {
    fn create_role(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "name": null, "permissions": [] });
            let opts = merge_defaults(opts, defaults)?;

            self.http()
                .post("/roles")
                .body(Value::Object(opts))
                .send()
                .await
        }
    }

    fn update_role(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({
                "role_id": null,
                "users": [],
                "permissions": [],
                "name": null,
            });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!("/roles/{}", path_param(&opts, "role_id"));
            self.http()
                .put(&path)
                .body(Value::Object(opts))
                .send()
                .await
        }
    }

    fn get_role(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "role_id": null });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!("/roles/{}", path_param(&opts, "role_id"));
            self.http().get(&path).send().await
        }
    }

    fn delete_role(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "role_id": null });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!("/roles/{}", path_param(&opts, "role_id"));
            self.http().delete(&path).send().await
        }
    }

    fn add_role_user(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "role_id": null, "username": null });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!(
                "/roles/{}/users/{}",
                path_param(&opts, "role_id"),
                path_param(&opts, "username")
            );
            self.http().post(&path).send().await
        }
    }

    fn delete_role_user(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "role_id": null, "username": null });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!(
                "/roles/{}/users/{}",
                path_param(&opts, "role_id"),
                path_param(&opts, "username")
            );
            self.http().delete(&path).send().await
        }
    }

    /// Grant a permission on a role. The permission body carries the owner it
    /// applies to and the access level.
    fn add_role_permission(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({
                "role_id": null,
                "owner": null,
                "access": "READ_ONLY",
            });
            let opts = merge_defaults(opts, defaults)?;

            let permission = select_from(&opts, &["owner", "access"])?;
            let path = format!("/roles/{}/permissions", path_param(&opts, "role_id"));
            self.http()
                .post(&path)
                .body(Value::Object(permission))
                .send()
                .await
        }
    }

    fn delete_role_permission(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({
                "role_id": null,
                "permission_id": null,
                "owner": null,
                "access": "READ_ONLY",
            });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!(
                "/roles/{}/permissions/{}",
                path_param(&opts, "role_id"),
                path_param(&opts, "permission_id")
            );
            self.http().delete(&path).send().await
        }
    }
}

impl<T: HttpAccess> RoleResource for T {}
