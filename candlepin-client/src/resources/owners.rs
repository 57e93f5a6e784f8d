//! Owner (organization) queries.

use std::future::Future;

use crate::client::HttpAccess;
use crate::error::Result;
use crate::response::Response;

pub trait OwnerResource: HttpAccess {
    fn get_all_owners(&self) -> impl Future<Output = Result<Response>> + Send {
        async move { self.http().get("/owners").send().await }
    }
}

impl<T: HttpAccess> OwnerResource for T {}
