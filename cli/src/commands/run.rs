//! Run command - one named action, or the maintenance routine
//!
//! Order matters: the action name and configuration are checked before the
//! token request so bad input never reaches the network.

use anyhow::Result;
use config::{apply_overrides, load_from_env, validate_settings};
use graph_admin::{Action, GraphClient, ThreadRandom, dispatch};
use tracing::info;

use super::Cli;
use crate::{output, ux_error};

pub async fn run(cli: Cli) -> Result<()> {
    let action = match cli.action.as_deref() {
        Some(name) => Some(Action::parse(name).inspect_err(|_| {
            ux_error::unknown_action(name, &Action::names()).display();
        })?),
        None => None
    };

    let settings = load_from_env().inspect_err(|e| {
        ux_error::config_error(&e.to_string()).display();
    })?;
    let settings = apply_overrides(settings, cli.overrides());
    validate_settings(&settings).inspect_err(|e| {
        ux_error::invalid_credentials(&e.to_string()).display();
    })?;

    let mut client = GraphClient::new(settings.credentials.clone(), settings.endpoints.clone())?;
    client.authenticate().await?;

    let mut rng = ThreadRandom;
    let mut stdout = std::io::stdout();
    let result = dispatch(action, &client, settings.maintenance, &mut rng, &mut stdout).await?;

    match action {
        Some(action) => {
            info!(action = %action, "Action completed");
            output::json(&result)?;
        }
        None => output::info(&format!(
            "Maintenance complete: {} file(s) and {} user(s) deleted",
            result["files_deleted"], result["users_deleted"]
        ))
    }

    Ok(())
}
