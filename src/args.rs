// CLI argument definitions. The update flow is the default command, so its
// flags sit at the top level; named subcommands cover auth/clear/get and an
// external-subcommand catch-all keeps unknown tokens out of clap's usage
// error path.

use std::ffi::OsString;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "nsc")]
#[command(about = "View, set and clear your Nextcloud status", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Flags for the default (update) command.
    #[command(flatten)]
    pub update: UpdateArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save server credentials (interactive).
    Auth,

    /// Clear the status message.
    Clear,

    /// Print the current status.
    Get,

    // Anything else is reported as "Unknown command: <token>" instead of
    // clap's usage error, matching the update-by-default dispatch.
    #[command(external_subcommand)]
    Unknown(Vec<OsString>),
}

/// Flags for the status update flow. Presence of any value flag (or
/// `--empty`) skips the pre-fill fetch of the current remote status.
#[derive(Debug, Default, Args)]
pub struct UpdateArgs {
    /// Presence state [options: online, away, dnd, invisible]
    #[arg(long)]
    pub status: Option<String>,

    /// Status emoji glyph
    #[arg(long)]
    pub emoji: Option<String>,

    /// Status message text
    #[arg(long)]
    pub message: Option<String>,

    /// Delete the status after this timeout [options: never, 30 minutes,
    /// 1 hour, 4 hours, today, this week]
    #[arg(long)]
    pub timeout: Option<String>,

    /// Skip the form and submit the status directly
    #[arg(long)]
    pub submit: bool,

    /// Do not pre-fill fields from your current status
    #[arg(long)]
    pub empty: bool,
}

impl UpdateArgs {
    /// True when any field override is present, which suppresses the
    /// pre-fill fetch exactly like `--empty` does.
    pub fn overrides_prefill(&self) -> bool {
        self.empty
            || self.status.is_some()
            || self.emoji.is_some()
            || self.message.is_some()
            || self.timeout.is_some()
    }
}
