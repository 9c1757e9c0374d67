// Command handlers, one module per dispatchable command. Shared here: the
// credential-loading step every network command starts with.

pub mod auth;
pub mod clear;
pub mod get;
pub mod update;

use anyhow::{anyhow, Result};

use crate::api::ApiClient;
use crate::store::{self, StoreError};

/// Load stored credentials and build a client. A missing credential file is
/// the plain "please run auth" error; an unreadable one keeps its cause
/// chained under the same instruction.
pub(crate) fn require_auth() -> Result<ApiClient> {
    match store::load() {
        Ok(auth) => ApiClient::new(auth),
        Err(StoreError::NotFound) => Err(missing_auth_error()),
        Err(err) => Err(anyhow::Error::new(err).context(missing_auth_error().to_string())),
    }
}

fn missing_auth_error() -> anyhow::Error {
    let program = std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("nsc"));
    anyhow!("Not authenticated to a Nextcloud server\nPlease run \"{program} auth\" first")
}
