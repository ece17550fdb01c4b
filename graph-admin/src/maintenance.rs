//! The unattended maintenance routine.
//!
//! Steps run in a fixed order and the first failure aborts the run:
//! 1. marker file round-trip (write, upload, remove locally, delete remotely)
//! 2. file pruning above the threshold
//! 3. mail listing
//! 4. subscription summary dump
//! 5. user pruning above the threshold, on a coin flip

use crate::client::GraphClient;
use crate::error::GraphResult;
use crate::models::SkuSummary;
use crate::random::Randomness;
use chrono::Utc;
use config::MaintenanceConfig;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceReport {
    pub marker_file: String,
    pub files_listed: usize,
    pub files_deleted: usize,
    pub messages_listed: usize,
    pub skus: Vec<SkuSummary>,
    pub user_prune_attempted: bool,
    pub users_listed: usize,
    pub users_deleted: usize,
    pub users_protected: usize
}

pub struct MaintenanceDriver<'a> {
    client: &'a GraphClient,
    config: MaintenanceConfig
}

impl<'a> MaintenanceDriver<'a> {
    pub fn new(client: &'a GraphClient, config: MaintenanceConfig) -> Self {
        Self { client, config }
    }

    /// Run every step. The subscription summary is written to `out` as
    /// pretty JSON.
    pub async fn run(
        &self,
        rng: &mut dyn Randomness,
        out: &mut dyn Write
    ) -> GraphResult<MaintenanceReport> {
        let mut report = MaintenanceReport::default();
        info!("Starting maintenance run");

        report.marker_file = self.round_trip_marker().await?;
        self.prune_files(&mut report).await?;

        let messages = self.client.mail_list().await?;
        report.messages_listed = messages.len();
        debug!(count = report.messages_listed, "Listed mail");

        report.skus = self.client.subscribed_list().await?;
        serde_json::to_writer_pretty(&mut *out, &report.skus)?;
        writeln!(out)?;

        if rng.chance(self.config.user_prune_probability) {
            self.prune_users(&mut report).await?;
        } else {
            debug!("Skipping user pruning this run");
        }

        info!(
            files_deleted = report.files_deleted,
            users_deleted = report.users_deleted,
            users_protected = report.users_protected,
            "Maintenance completed"
        );
        Ok(report)
    }

    async fn round_trip_marker(&self) -> GraphResult<String> {
        let stamp = Utc::now().timestamp();
        let name = format!("{}.txt", stamp);
        let path = self.config.marker_dir().join(&name);

        tokio::fs::write(&path, stamp.to_string()).await?;
        let content = tokio::fs::read(&path).await?;
        let uploaded = self.client.upload_file(&name, content).await;
        tokio::fs::remove_file(&path).await?;
        uploaded?;
        self.client.delete_file(&name).await?;

        debug!(name = %name, "Marker file round-trip complete");
        Ok(name)
    }

    async fn prune_files(&self, report: &mut MaintenanceReport) -> GraphResult<()> {
        let files = self.client.file_list().await?;
        report.files_listed = files.len();

        if files.len() <= self.config.file_prune_threshold {
            return Ok(());
        }

        info!(count = files.len(), "File count above threshold, pruning");
        for file in &files {
            self.client.delete_file(&file.name).await?;
            report.files_deleted += 1;
        }
        Ok(())
    }

    async fn prune_users(&self, report: &mut MaintenanceReport) -> GraphResult<()> {
        report.user_prune_attempted = true;
        let users = self.client.user_list().await?;
        report.users_listed = users.len();

        if users.len() <= self.config.user_prune_threshold {
            return Ok(());
        }

        info!(count = users.len(), "User count above threshold, pruning");
        for user in &users {
            // Substring match: any name containing the marker is protected.
            if user
                .user_principal_name
                .contains(&self.config.protected_substring)
            {
                report.users_protected += 1;
                continue;
            }
            self.client.delete_user(&user.user_principal_name).await?;
            report.users_deleted += 1;
        }
        Ok(())
    }
}
