//! `login` and `whoami` handlers.

use std::path::Path;

use crate::api::D1Api;
use crate::config::Credentials;
use crate::error::Result;
use crate::session::Presenter;

/// Verifies and saves credentials.
///
/// Invalid credentials are still written, so a token that is not yet active
/// does not have to be entered twice.
pub async fn login<A: D1Api>(
    api: &A,
    credentials: &Credentials,
    path: &Path,
    presenter: &mut Presenter,
) -> Result<()> {
    let valid = match api.verify_token().await {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!("Token verification failed: {}", e);
            false
        }
    };
    if !valid {
        presenter.failure("Invalid credentials! Check your API token and account ID.")?;
    }

    credentials.save_to_file(path)?;
    tracing::info!("Saved credentials to {}", path.display());
    presenter.success("Successfully logged in to Cloudflare D1!")
}

/// Prints the active account and a masked token.
pub fn whoami(credentials: Option<&Credentials>, presenter: &mut Presenter) -> Result<()> {
    match credentials {
        Some(credentials) => presenter.success(&format!(
            "Logged in as {} with API token {}",
            credentials.account_id,
            credentials.masked_token()
        )),
        None => presenter.failure("Not logged in to Cloudflare D1."),
    }
}
