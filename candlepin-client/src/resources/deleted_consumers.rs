//! Deleted-consumer records.

use std::future::Future;

use serde_json::{json, Value};

use crate::client::HttpAccess;
use crate::error::Result;
use crate::options::merge_defaults;
use crate::response::Response;

pub trait DeletedConsumerResource: HttpAccess {
    fn get_deleted_consumers(&self, opts: Value) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({ "date": null });
            merge_defaults(opts, defaults)?;

            self.http().get("/deleted_consumers").send().await
        }
    }
}

impl<T: HttpAccess> DeletedConsumerResource for T {}
