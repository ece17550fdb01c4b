//! Named actions that can be invoked directly instead of the maintenance
//! routine.

use crate::client::GraphClient;
use crate::error::{GraphError, GraphResult};
use crate::maintenance::MaintenanceDriver;
use crate::provisioning::{NewUserRequest, create_user};
use crate::random::Randomness;
use config::MaintenanceConfig;
use serde_json::Value;
use std::io::Write;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    FileList,
    MailList,
    SiteList,
    UserList,
    SubscribedList,
    GetDefaultDomain,
    CreateUser
}

impl Action {
    /// Unknown names are rejected instead of silently doing nothing.
    pub fn parse(name: &str) -> GraphResult<Self> {
        Self::from_str(name.trim()).map_err(|_| GraphError::UnknownAction(name.to_string()))
    }

    pub fn names() -> Vec<String> {
        Self::iter().map(|a| a.to_string()).collect()
    }

    pub async fn run(self, client: &GraphClient, rng: &mut dyn Randomness) -> GraphResult<Value> {
        info!(action = %self, "Running action");
        let value = match self {
            Self::FileList => serde_json::to_value(client.file_list().await?)?,
            Self::MailList => serde_json::to_value(client.mail_list().await?)?,
            Self::SiteList => serde_json::to_value(client.site_list().await?)?,
            Self::UserList => serde_json::to_value(client.user_list().await?)?,
            Self::SubscribedList => serde_json::to_value(client.subscribed_list().await?)?,
            Self::GetDefaultDomain => serde_json::to_value(client.get_default_domain().await?)?,
            Self::CreateUser => {
                serde_json::to_value(create_user(client, rng, NewUserRequest::default()).await?)?
            }
        };
        Ok(value)
    }
}

/// Run the named action, or the whole maintenance routine when none is
/// given. `out` receives the routine's subscription summary.
pub async fn dispatch(
    action: Option<Action>,
    client: &GraphClient,
    maintenance: MaintenanceConfig,
    rng: &mut dyn Randomness,
    out: &mut dyn Write
) -> GraphResult<Value> {
    match action {
        Some(action) => action.run(client, rng).await,
        None => {
            let report = MaintenanceDriver::new(client, maintenance)
                .run(rng, out)
                .await?;
            Ok(serde_json::to_value(report)?)
        }
    }
}
