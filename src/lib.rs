// Library root
// -----------
// The binary (`main.rs`) dispatches into these modules; exposing them as a
// library keeps the API client, credential store and form plumbing reachable
// from the integration tests under `tests/`.
//
// Module responsibilities:
// - `api`: blocking HTTP client for the Nextcloud user-status endpoints.
// - `args`: clap definitions for the command line surface.
// - `commands`: one handler per dispatchable command (update/auth/clear/get).
// - `emoji`: the bundled catalog behind the status-icon picker.
// - `store`: credential persistence in the user's config directory.
// - `timeout`: clear-at timestamp math for the timeout picker.
// - `ui`: dialoguer forms and the spinner helper.
pub mod api;
pub mod args;
pub mod commands;
pub mod emoji;
pub mod store;
pub mod timeout;
pub mod ui;
