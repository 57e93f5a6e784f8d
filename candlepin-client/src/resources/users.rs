//! User management.

use std::future::Future;

use serde_json::{json, Value};

use crate::client::HttpAccess;
use crate::error::Result;
use crate::options::{camelize_keys, merge_defaults};
use crate::resources::path_param;
use crate::response::Response;

pub trait UserResource: HttpAccess {
    fn create_user(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({
                "username": null,
                "password": null,
                "super_admin": false,
            });
            let opts = merge_defaults(opts, defaults)?;

            self.http()
                .post("/users")
                .body(Value::Object(camelize_keys(&opts)))
                .send()
                .await
        }
    }

    fn update_user(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({
                "username": null,
                "password": null,
                "super_admin": false,
            });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!("/users/{}", path_param(&opts, "username"));
            self.http()
                .put(&path)
                .body(Value::Object(camelize_keys(&opts)))
                .send()
                .await
        }
    }

    fn get_user(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "username": null });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!("/users/{}", path_param(&opts, "username"));
            self.http().get(&path).send().await
        }
    }

    fn get_user_roles(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "username": null });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!("/users/{}/roles", path_param(&opts, "username"));
            self.http().get(&path).send().await
        }
    }

    fn get_user_owners(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "username": null });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!("/users/{}/owners", path_param(&opts, "username"));
            self.http().get(&path).send().await
        }
    }

    fn delete_user(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "username": null });
            let opts = merge_defaults(opts, defaults)?;

            let path = format!("/users/{}", path_param(&opts, "username"));
            self.http().delete(&path).send().await
        }
    }

    fn get_all_users(&self) -> impl Future<Output = Result<Response>> + Send {
        async move { self.http().get("/users").send().await }
    }
}

impl<T: HttpAccess> UserResource for T {}
