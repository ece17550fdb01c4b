pub mod action;
pub mod auth;
pub mod client;
pub mod directory;
pub mod error;
pub mod maintenance;
pub mod models;
pub mod provisioning;
pub mod random;
pub mod transport;

pub use action::{Action, dispatch};
pub use auth::{AccessToken, get_token};
pub use client::{ApiResponse, GraphClient, build_url};
pub use error::{GraphError, GraphResult};
pub use maintenance::{MaintenanceDriver, MaintenanceReport};
pub use provisioning::{NewUserRequest, ProvisionedUser, create_user};
pub use random::{Randomness, ScriptedRandom, ThreadRandom};
pub use transport::{RequestBody, RequestOptions, Transport};
