//! Create a user, then license it.
//!
//! The steps run strictly in order and nothing is rolled back. A user whose
//! license assignment fails stays behind enabled and unlicensed.

use crate::client::GraphClient;
use crate::error::{GraphError, GraphResult};
use crate::models::NewUserPayload;
use crate::random::{LETTERS, Randomness, password_charset};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const USERNAME_LENGTH: usize = 6;
pub const PASSWORD_LENGTH: usize = 10;

/// Caller-supplied identity. Anything left `None` is generated.
#[derive(Debug, Clone, Default)]
pub struct NewUserRequest {
    pub username: Option<String>,
    pub password: Option<String>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedUser {
    pub id: Option<String>,
    pub user_principal_name: String,
    pub password: String,
    /// License assigned to the user, if one was available.
    pub sku_id: Option<String>
}

pub fn generate_username(rng: &mut dyn Randomness) -> String {
    rng.sample_string(LETTERS, USERNAME_LENGTH)
}

pub fn generate_password(rng: &mut dyn Randomness) -> String {
    rng.sample_string(&password_charset(), PASSWORD_LENGTH)
}

pub async fn create_user(
    client: &GraphClient,
    rng: &mut dyn Randomness,
    request: NewUserRequest
) -> GraphResult<ProvisionedUser> {
    let skus = client.subscribed_list().await?;
    let selected = rng.pick_index(skus.len()).and_then(|idx| skus.get(idx)).cloned();

    let domain = client
        .get_default_domain()
        .await?
        .ok_or(GraphError::NoDefaultDomain)?;

    let username = request
        .username
        .unwrap_or_else(|| generate_username(&mut *rng));
    let password = request
        .password
        .unwrap_or_else(|| generate_password(&mut *rng));
    let user_principal_name = format!("{}@{}", username, domain);

    let payload = NewUserPayload::new(&username, &user_principal_name, &password);
    let created = client.create_directory_user(&payload).await?;
    info!(
        user = %user_principal_name,
        password = %password,
        "User created"
    );

    let sku_id = selected.map(|s| s.sku_id).filter(|id| !id.is_empty());
    if let Some(sku_id) = &sku_id {
        if let Err(err) = client.assign_license(&user_principal_name, sku_id).await {
            warn!(
                user = %user_principal_name,
                sku_id = %sku_id,
                error = %err,
                "License assignment failed; user left enabled without a license"
            );
            return Err(err);
        }
        info!(user = %user_principal_name, sku_id = %sku_id, "License assigned");
    } else {
        info!(user = %user_principal_name, "No assignable license; skipping assignment");
    }

    Ok(ProvisionedUser {
        id: created.id,
        user_principal_name,
        password,
        sku_id
    })
}
