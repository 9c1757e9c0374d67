// Interactive credential capture. Pre-fills from any existing record and
// rewrites the file wholesale on submit.

use anyhow::Result;

use crate::store::{self, StoreError};
use crate::ui::{self, FormOutcome};

pub fn run() -> Result<()> {
    let existing = match store::load() {
        Ok(auth) => Some(auth),
        Err(StoreError::NotFound) => None,
        // A broken file is not fatal here; the form starts empty and the
        // save below replaces it.
        Err(err) => {
            eprintln!("Warning: Failed to load existing auth data ({err})");
            None
        }
    };

    match ui::auth_form(existing)? {
        FormOutcome::Submitted(auth) => {
            store::save(&auth)?;
            println!("Credentials were saved");
            Ok(())
        }
        FormOutcome::Cancelled => Ok(()),
    }
}
