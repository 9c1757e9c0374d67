// Clear the status message on the server.

use anyhow::Result;

use crate::ui;

use super::require_auth;

pub fn run() -> Result<()> {
    let api = require_auth()?;
    ui::spinner("Clearing your status message ...", || api.clear_message())
}
