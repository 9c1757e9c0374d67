// UI layer: interactive forms built on `dialoguer` plus a spinner helper.
// Every prompt can be cancelled (Esc/`q` on pickers, Ctrl-C anywhere); a
// cancel surfaces as `FormOutcome::Cancelled`, never as an error.

use std::io;
use std::time::Duration;

use anyhow::Result;
use dialoguer::{FuzzySelect, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::StatusKind;
use crate::emoji::{self, EmojiEntry};
use crate::store::Auth;
use crate::timeout;

/// What an interactive form produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome<T> {
    Submitted(T),
    Cancelled,
}

/// The full value set of a status update. `clear_at` is a unix timestamp;
/// zero means the status never auto-clears.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateValues {
    pub status: StatusKind,
    pub emoji: String,
    pub message: String,
    pub clear_at: i64,
}

/// Prompt for server credentials, pre-filled from any existing record. All
/// three fields are plain text inputs so a stored typo can be seen and fixed.
pub fn auth_form(existing: Option<Auth>) -> Result<FormOutcome<Auth>> {
    let existing = existing.unwrap_or_default();

    let server_base_url =
        match text_prompt("Type your server's base URL", &existing.server_base_url, false)? {
            Some(value) => value,
            None => return Ok(FormOutcome::Cancelled),
        };
    let user = match text_prompt("Type your username", &existing.user, false)? {
        Some(value) => value,
        None => return Ok(FormOutcome::Cancelled),
    };
    let password = match text_prompt("Type your password", &existing.password, false)? {
        Some(value) => value,
        None => return Ok(FormOutcome::Cancelled),
    };

    Ok(FormOutcome::Submitted(Auth {
        server_base_url,
        user,
        password,
    }))
}

/// Run the four-field update form. Each picker starts on the pre-filled
/// value, so submitting without touching anything keeps the current status.
pub fn update_form(prefill: &UpdateValues) -> Result<FormOutcome<UpdateValues>> {
    let status = match status_prompt(prefill.status)? {
        Some(value) => value,
        None => return Ok(FormOutcome::Cancelled),
    };
    let emoji = match emoji_prompt(&prefill.emoji)? {
        Some(value) => value,
        None => return Ok(FormOutcome::Cancelled),
    };
    let message = match text_prompt("Type a status message", &prefill.message, true)? {
        Some(value) => value,
        None => return Ok(FormOutcome::Cancelled),
    };
    let clear_at = match timeout_prompt(prefill.clear_at)? {
        Some(value) => value,
        None => return Ok(FormOutcome::Cancelled),
    };

    Ok(FormOutcome::Submitted(UpdateValues {
        status,
        emoji,
        message,
        clear_at,
    }))
}

/// Show a steady spinner while `action` runs on this thread, then clear it.
pub fn spinner<T>(message: &str, action: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = action();
    spinner.finish_and_clear();
    result
}

fn text_prompt(prompt: &str, initial: &str, allow_empty: bool) -> Result<Option<String>> {
    let mut input = Input::new().with_prompt(prompt).allow_empty(allow_empty);
    if !initial.is_empty() {
        input = input.with_initial_text(initial);
    }
    or_cancelled(input.interact_text())
}

fn status_prompt(current: StatusKind) -> Result<Option<StatusKind>> {
    let picked = or_cancelled(
        Select::new()
            .with_prompt("Choose a status")
            .items(&StatusKind::ALL)
            .default(status_position(current))
            .interact_opt(),
    )?
    .flatten();
    Ok(picked.map(|index| StatusKind::ALL[index]))
}

fn emoji_prompt(current: &str) -> Result<Option<String>> {
    let catalog = emoji::catalog();
    let choices = emoji_choices(&catalog);
    let picked = or_cancelled(
        FuzzySelect::new()
            .with_prompt("Choose an emoji (type to search)")
            .items(&choices)
            .default(glyph_position(&catalog, current))
            .interact_opt(),
    )?
    .flatten();
    Ok(picked.map(|index| glyph_for_choice(&catalog, index)))
}

fn timeout_prompt(current: i64) -> Result<Option<i64>> {
    let options = timeout::timeout_options(Some(current));
    let labels: Vec<&str> = options.iter().map(|option| option.label.as_str()).collect();
    let default = options
        .iter()
        .position(|option| option.value == current)
        .unwrap_or(0);
    let picked = or_cancelled(
        Select::new()
            .with_prompt("Delete status after")
            .items(&labels)
            .default(default)
            .interact_opt(),
    )?
    .flatten();
    Ok(picked.map(|index| options[index].value))
}

// Ctrl-C reaches us as an interrupted IO error; treat it like Esc.
fn or_cancelled<T>(result: Result<T, dialoguer::Error>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(err)) if err.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// One list entry per catalog emoji, behind a leading "none" that clears the
/// status icon.
fn emoji_choices(catalog: &[EmojiEntry]) -> Vec<String> {
    let mut choices = Vec::with_capacity(catalog.len() + 1);
    choices.push(String::from("none"));
    choices.extend(
        catalog
            .iter()
            .map(|entry| format!("{} {}", entry.glyph, entry.description)),
    );
    choices
}

fn status_position(current: StatusKind) -> usize {
    StatusKind::ALL
        .iter()
        .position(|kind| *kind == current)
        .unwrap_or(0)
}

// The choice list is the catalog shifted by one for the "none" entry.
fn glyph_position(catalog: &[EmojiEntry], current: &str) -> usize {
    if current.is_empty() {
        return 0;
    }
    catalog
        .iter()
        .position(|entry| entry.glyph == current)
        .map(|index| index + 1)
        .unwrap_or(0)
}

fn glyph_for_choice(catalog: &[EmojiEntry], index: usize) -> String {
    if index == 0 {
        String::new()
    } else {
        catalog[index - 1].glyph.to_string()
    }
}
