// Print the current status to stdout, two lines: the status itself and its
// clear-at time.

use std::fmt;

use anyhow::Result;
use chrono::{Local, TimeZone};

use crate::api::UserStatus;

use super::require_auth;

pub fn run() -> Result<()> {
    let api = require_auth()?;
    let status = api.fetch_status()?;
    println!("{}", format_user_status(&status));
    println!("clear at {}", clear_at_label(status.clear_at, &Local));
    Ok(())
}

/// `<user> (<status>) <icon> <message>`, with the icon segment dropped when
/// no icon is set.
fn format_user_status(status: &UserStatus) -> String {
    if status.icon.is_empty() {
        format!("{} ({}) {}", status.user, status.status, status.message)
    } else {
        format!(
            "{} ({}) {} {}",
            status.user, status.status, status.icon, status.message
        )
    }
}

fn clear_at_label<Tz: TimeZone>(clear_at: i64, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    if clear_at <= 0 {
        return String::from("never");
    }
    match tz.timestamp_opt(clear_at, 0).single() {
        Some(when) => when.format("%Y-%m-%d %H:%M:%S %z").to_string(),
        None => clear_at.to_string(),
    }
}
