// The default command: build a pre-fill, optionally run the form, then push
// the presence state and the message record as two concurrent PUTs.

use anyhow::{anyhow, Context, Result};

use crate::api::{ApiClient, Status, StatusKind, StatusMessage};
use crate::args::UpdateArgs;
use crate::timeout::{self, TIMEOUT_KEYS};
use crate::ui::{self, FormOutcome, UpdateValues};

use super::require_auth;

/// Results of the concurrent push, one slot per server resource.
#[derive(Debug)]
pub struct UpdateOutcome {
    pub state: Result<()>,
    pub message: Result<()>,
}

pub fn run(args: &UpdateArgs) -> Result<()> {
    let api = require_auth()?;

    let prefill = if args.overrides_prefill() {
        values_from_flags(args)?
    } else {
        let current = ui::spinner("Fetching your current status ...", || api.fetch_status())
            .context("Failed to fetch current status")?;
        UpdateValues {
            // Unsettable remote states (e.g. offline) pre-select online.
            status: current.status.parse().unwrap_or(StatusKind::Online),
            emoji: current.icon,
            message: current.message,
            clear_at: current.clear_at,
        }
    };

    let values = if args.submit {
        prefill
    } else {
        match ui::update_form(&prefill)? {
            FormOutcome::Submitted(values) => values,
            FormOutcome::Cancelled => return Ok(()),
        }
    };

    let outcome = ui::spinner("Updating your status ...", || push_update(&api, &values));
    if let Err(error) = outcome.state {
        eprintln!("{error:#}");
    }
    if let Err(error) = outcome.message {
        eprintln!("{error:#}");
    }
    Ok(())
}

fn values_from_flags(args: &UpdateArgs) -> Result<UpdateValues> {
    let status = match args.status.as_deref() {
        Some(value) => value.parse()?,
        None => StatusKind::Online,
    };
    let clear_at = match args.timeout.as_deref() {
        Some(key) => timeout::clear_at_for_key(key).ok_or_else(|| {
            anyhow!(
                "Unknown timeout: {key} [options: {}]",
                TIMEOUT_KEYS.join(", ")
            )
        })?,
        None => 0,
    };
    Ok(UpdateValues {
        status,
        emoji: args.emoji.clone().unwrap_or_default(),
        message: args.message.clone().unwrap_or_default(),
        clear_at,
    })
}

/// Issue both PUTs concurrently and join them. The two target independent
/// server resources, so each slot fails on its own and neither rolls back
/// the other; a panicked worker is captured as that slot's error.
pub fn push_update(api: &ApiClient, values: &UpdateValues) -> UpdateOutcome {
    std::thread::scope(|scope| {
        let state = scope.spawn(|| {
            api.set_status(&Status {
                status_type: values.status,
            })
        });
        let message = scope.spawn(|| {
            api.set_message(&StatusMessage {
                message: values.message.clone(),
                status_icon: values.emoji.clone(),
                clear_at: values.clear_at,
            })
        });
        UpdateOutcome {
            state: joined(state.join()),
            message: joined(message.join()),
        }
    })
}

fn joined(result: std::thread::Result<Result<()>>) -> Result<()> {
    match result {
        Ok(result) => result,
        Err(_) => Err(anyhow!("Status update worker panicked")),
    }
}
