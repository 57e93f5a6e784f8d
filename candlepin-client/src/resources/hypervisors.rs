//! Hypervisor check-in.

use std::future::Future;

use serde_json::{json, Value};

use crate::client::HttpAccess;
use crate::error::Result;
use crate::options::{merge_defaults, select_from};
use crate::response::Response;

pub trait HypervisorResource: HttpAccess {
    /// Report the hypervisor→guests topology for an owner. The body is the
    /// raw host-to-guest mapping; `owner` and `create_missing` travel as
    /// query parameters.
    fn post_hypervisor_check_in(
        &self,
        opts: Value,
    ) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let defaults = json!({
                "owner": null,
                "host_guest_mapping": {},
                "create_missing": null,
            });
            let opts = merge_defaults(opts, defaults)?;

            let query = select_from(&opts, &["owner", "create_missing"])?;
            let body = opts["host_guest_mapping"].clone();
            self.http()
                .post("/hypervisors")
                .query(&query)
                .body(body)
                .send()
                .await
        }
    }
}

impl<T: HttpAccess> HypervisorResource for T {}
