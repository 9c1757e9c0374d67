// API client module: a small blocking HTTP client for the Nextcloud
// user-status (OCS) endpoints. Four calls, Basic Auth, JSON bodies, and no
// retries; a non-2xx response always surfaces the status line and raw body.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::Auth;

const STATUS_ENDPOINT: &str = "/ocs/v2.php/apps/user_status/api/v1/user_status/status";
const MESSAGE_ENDPOINT: &str = "/ocs/v2.php/apps/user_status/api/v1/user_status/message?format=json";
const CUSTOM_MESSAGE_ENDPOINT: &str =
    "/ocs/v2.php/apps/user_status/api/v1/user_status/message/custom?format=json";

fn get_status_endpoint(user: &str) -> String {
    format!("/ocs/v2.php/apps/user_status/api/v1/statuses/{user}")
}

/// The settable presence states. The server may report other values (e.g.
/// `offline`), which is why [`UserStatus::status`] stays a plain string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    #[default]
    Online,
    Away,
    Dnd,
    Invisible,
}

impl StatusKind {
    pub const ALL: [StatusKind; 4] = [
        StatusKind::Online,
        StatusKind::Away,
        StatusKind::Dnd,
        StatusKind::Invisible,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusKind::Online => "online",
            StatusKind::Away => "away",
            StatusKind::Dnd => "dnd",
            StatusKind::Invisible => "invisible",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        StatusKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| {
                anyhow::anyhow!("Unknown status: {value} [options: online, away, dnd, invisible]")
            })
    }
}

/// Body of the set-state PUT.
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    #[serde(rename = "statusType")]
    pub status_type: StatusKind,
}

/// Body of the set-message PUT. An empty icon and a zero clear-at are left
/// out of the serialized body entirely; the server treats absence as "none".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessage {
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status_icon: String,
    #[serde(skip_serializing_if = "clear_at_unset")]
    pub clear_at: i64,
}

fn clear_at_unset(clear_at: &i64) -> bool {
    *clear_at == 0
}

/// The server's combined view of the user's status, used for display and
/// for pre-filling the update form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStatus {
    pub user: String,
    pub status: String,
    pub icon: String,
    pub message: String,
    pub clear_at: i64,
}

// OCS responses wrap the payload in {"ocs":{"meta":…,"data":…}}. Only the
// data object matters here; message/icon/clearAt may be null or absent.
#[derive(Debug, Deserialize)]
struct OcsEnvelope {
    ocs: OcsBody,
}

#[derive(Debug, Deserialize)]
struct OcsBody {
    data: StatusData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StatusData {
    status: String,
    message: Option<String>,
    icon: Option<String>,
    #[serde(rename = "clearAt")]
    clear_at: Option<i64>,
}

/// Blocking client for the user-status API. Holds the reqwest client and the
/// stored credentials; every request sets Basic Auth and the OCS marker
/// header.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    auth: Auth,
}

impl ApiClient {
    pub fn new(auth: Auth) -> Result<Self> {
        // reqwest's blocking client ships a 30 s request timeout; calls here
        // block until the transport completes or errors.
        let client = Client::builder()
            .timeout(None)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient { client, auth })
    }

    pub fn user(&self) -> &str {
        &self.auth.user
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.auth.server_base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::blocking::RequestBuilder {
        self.client
            .request(method, self.endpoint(path))
            .header(ACCEPT, "application/json")
            .header("OCS-APIRequest", "true")
            .basic_auth(&self.auth.user, Some(&self.auth.password))
    }

    /// GET the user's current status and decode the OCS envelope.
    pub fn fetch_status(&self) -> Result<UserStatus> {
        let path = get_status_endpoint(&self.auth.user);
        debug!(user = %self.auth.user, "fetching current status");
        let res = self
            .request(reqwest::Method::GET, &path)
            .send()
            .context("Failed to send status request")?;

        let status = res.status();
        let body = res.text().unwrap_or_else(|_| String::new());
        if status != reqwest::StatusCode::OK {
            bail!("Failed to get status message: {status} {body}");
        }

        let envelope: OcsEnvelope =
            serde_json::from_str(&body).context("Parsing status response json")?;
        Ok(user_status_from_data(self.auth.user.clone(), envelope.ocs.data))
    }

    /// PUT the presence state.
    pub fn set_status(&self, status: &Status) -> Result<()> {
        debug!(status = %status.status_type, "updating presence state");
        let res = self
            .request(reqwest::Method::PUT, STATUS_ENDPOINT)
            .json(status)
            .send()
            .context("Failed to send status update")?;
        fail_on_non_ok(res, "Failed to update status")
    }

    /// PUT the message, icon and clear-at as one record.
    pub fn set_message(&self, message: &StatusMessage) -> Result<()> {
        debug!(clear_at = message.clear_at, "updating status message");
        let res = self
            .request(reqwest::Method::PUT, CUSTOM_MESSAGE_ENDPOINT)
            .json(message)
            .send()
            .context("Failed to send status message update")?;
        fail_on_non_ok(res, "Failed to update status message")
    }

    /// DELETE the message resource.
    pub fn clear_message(&self) -> Result<()> {
        debug!("clearing status message");
        let res = self
            .request(reqwest::Method::DELETE, MESSAGE_ENDPOINT)
            .send()
            .context("Failed to send clear request")?;
        fail_on_non_ok(res, "Failed to clear status message")
    }
}

fn fail_on_non_ok(res: reqwest::blocking::Response, what: &str) -> Result<()> {
    let status = res.status();
    if status == reqwest::StatusCode::OK {
        return Ok(());
    }
    let body = res.text().unwrap_or_else(|_| String::new());
    bail!("{what}: {status} {body}");
}

fn user_status_from_data(user: String, data: StatusData) -> UserStatus {
    UserStatus {
        user,
        status: data.status,
        icon: data.icon.unwrap_or_default(),
        message: data.message.unwrap_or_default(),
        clear_at: data.clear_at.unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_kind_parses_known_values() {
        assert_eq!("online".parse::<StatusKind>().unwrap(), StatusKind::Online);
        assert_eq!("away".parse::<StatusKind>().unwrap(), StatusKind::Away);
        assert_eq!("dnd".parse::<StatusKind>().unwrap(), StatusKind::Dnd);
        assert_eq!(
            "invisible".parse::<StatusKind>().unwrap(),
            StatusKind::Invisible
        );
    }

    #[test]
    fn status_kind_rejects_unknown_values() {
        let err = "offline".parse::<StatusKind>().unwrap_err();
        assert!(err.to_string().contains("Unknown status: offline"));
        assert!(err.to_string().contains("online, away, dnd, invisible"));
    }

    #[test]
    fn status_body_uses_wire_field_name() {
        let body = serde_json::to_string(&Status {
            status_type: StatusKind::Dnd,
        })
        .unwrap();
        assert_eq!(body, r#"{"statusType":"dnd"}"#);
    }

    #[test]
    fn message_body_omits_unset_icon_and_clear_at() {
        let body = serde_json::to_string(&StatusMessage {
            message: "brb".to_string(),
            status_icon: String::new(),
            clear_at: 0,
        })
        .unwrap();
        assert_eq!(body, r#"{"message":"brb"}"#);
    }

    #[test]
    fn message_body_keeps_set_icon_and_clear_at() {
        let body = serde_json::to_string(&StatusMessage {
            message: "brb".to_string(),
            status_icon: "🌙".to_string(),
            clear_at: 1_717_344_000,
        })
        .unwrap();
        assert_eq!(
            body,
            r#"{"message":"brb","statusIcon":"🌙","clearAt":1717344000}"#
        );
    }

    #[test]
    fn envelope_decodes_with_null_fields_defaulted() {
        let raw = r#"{"ocs":{"meta":{"status":"ok"},"data":{
            "status":"away","message":null,"icon":null,"clearAt":null}}}"#;
        let envelope: OcsEnvelope = serde_json::from_str(raw).unwrap();
        let status = user_status_from_data("jane".to_string(), envelope.ocs.data);

        assert_eq!(status.user, "jane");
        assert_eq!(status.status, "away");
        assert_eq!(status.icon, "");
        assert_eq!(status.message, "");
        assert_eq!(status.clear_at, 0);
    }

    #[test]
    fn envelope_decodes_with_absent_fields_defaulted() {
        let raw = r#"{"ocs":{"meta":{"status":"ok"},"data":{"status":"online"}}}"#;
        let envelope: OcsEnvelope = serde_json::from_str(raw).unwrap();
        let status = user_status_from_data("jane".to_string(), envelope.ocs.data);

        assert_eq!(status.status, "online");
        assert_eq!(status.clear_at, 0);
    }

    #[test]
    fn envelope_decodes_populated_fields() {
        let raw = r#"{"ocs":{"meta":{"status":"ok"},"data":{
            "status":"dnd","message":"heads down","icon":"🎧","clearAt":1717344000}}}"#;
        let envelope: OcsEnvelope = serde_json::from_str(raw).unwrap();
        let status = user_status_from_data("jane".to_string(), envelope.ocs.data);

        assert_eq!(status.status, "dnd");
        assert_eq!(status.message, "heads down");
        assert_eq!(status.icon, "🎧");
        assert_eq!(status.clear_at, 1_717_344_000);
    }

    #[test]
    fn endpoint_join_trims_trailing_slash() {
        let api = ApiClient::new(Auth {
            server_base_url: "https://cloud.example.com/".to_string(),
            user: "jane".to_string(),
            password: "hunter2".to_string(),
        })
        .unwrap();

        assert_eq!(
            api.endpoint("/ocs/v2.php/x"),
            "https://cloud.example.com/ocs/v2.php/x"
        );
    }
}
