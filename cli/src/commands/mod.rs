pub mod run;

use clap::Parser;
use config::CliOverrides;

#[derive(Parser, Debug)]
#[command(
    name = "graphctl",
    author,
    version,
    about = "graphctl - Microsoft Graph tenant maintenance and provisioning",
    long_about = "Authenticates with the client-credentials grant and either runs one named \
                  action or, without --action, the full maintenance routine.\n\nCredentials \
                  come from the tenant_id, client_id, client_secret and username environment \
                  variables unless given as flags."
)]
pub struct Cli {
    /// Application (client) id
    #[arg(long)]
    pub client_id: Option<String>,

    /// Application secret
    #[arg(long)]
    pub client_secret: Option<String>,

    /// Directory (tenant) id
    #[arg(long)]
    pub tenant_id: Option<String>,

    /// Principal whose drive and mailbox are used
    #[arg(long)]
    pub username: Option<String>,

    /// Action to run instead of the maintenance routine (e.g. user_list,
    /// subscribed_list, create_user)
    #[arg(long)]
    pub action: Option<String>
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            tenant_id: self.tenant_id.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            username: self.username.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "graphctl",
            "--client-id",
            "app",
            "--client-secret",
            "secret",
            "--tenant-id",
            "contoso",
            "--username",
            "admin@contoso.com",
            "--action",
            "user_list",
        ])
        .unwrap();

        assert_eq!(cli.action.as_deref(), Some("user_list"));
        let overrides = cli.overrides();
        assert_eq!(overrides.tenant_id.as_deref(), Some("contoso"));
        assert_eq!(overrides.username.as_deref(), Some("admin@contoso.com"));
    }

    #[test]
    fn test_parse_no_flags() {
        let cli = Cli::try_parse_from(["graphctl"]).unwrap();
        assert!(cli.action.is_none());
        assert!(cli.overrides().client_secret.is_none());
    }
}
