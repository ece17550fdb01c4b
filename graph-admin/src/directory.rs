//! Catalog of single-purpose directory calls.
//!
//! Each operation is a thin composition over [`GraphClient::api`] and only
//! ever reads the first page of a collection.

use crate::client::{ApiResponse, GraphClient};
use crate::error::GraphResult;
use crate::models::{
    AssignLicensePayload, CreatedUser, DirectoryUser, Domain, DriveItem, ListResponse, Message,
    NewUserPayload, Site, SkuSummary, SubscribedSku,
};
use crate::transport::RequestBody;
use reqwest::Method;
use tracing::debug;

pub const FILE_PAGE_SIZE: &str = "10";
pub const MAIL_PAGE_SIZE: &str = "10";
pub const SITE_PAGE_SIZE: &str = "10";
pub const USER_PAGE_SIZE: &str = "25";

impl GraphClient {
    fn drive_root(&self) -> String {
        format!("/users/{}/drive/root", self.credentials().username)
    }

    fn drive_item_content(&self, name: &str) -> String {
        format!("{}:/{}:/content", self.drive_root(), name)
    }

    /// PUT raw content into the principal's drive root. Overwrite behavior
    /// is whatever the backend does.
    pub async fn upload_file(&self, name: &str, content: Vec<u8>) -> GraphResult<ApiResponse> {
        debug!(name, bytes = content.len(), "Uploading file");
        self.api(
            &self.drive_item_content(name),
            &[],
            RequestBody::Bytes(content),
            Some(Method::PUT)
        )
        .await
    }

    pub async fn delete_file(&self, name: &str) -> GraphResult<ApiResponse> {
        debug!(name, "Deleting file");
        self.api(
            &self.drive_item_content(name),
            &[],
            RequestBody::Empty,
            Some(Method::DELETE)
        )
        .await
    }

    pub async fn file_list(&self) -> GraphResult<Vec<DriveItem>> {
        let page: ListResponse<DriveItem> = self
            .get_json(
                &format!("{}/children", self.drive_root()),
                &[("$select", "id,name"), ("$top", FILE_PAGE_SIZE)]
            )
            .await?;
        Ok(page.value)
    }

    pub async fn mail_list(&self) -> GraphResult<Vec<Message>> {
        let page: ListResponse<Message> = self
            .get_json(
                &format!("/users/{}/messages", self.credentials().username),
                &[("$select", "id,subject"), ("$top", MAIL_PAGE_SIZE)]
            )
            .await?;
        Ok(page.value)
    }

    pub async fn site_list(&self) -> GraphResult<Vec<Site>> {
        let page: ListResponse<Site> = self
            .get_json("/sites", &[("search", "*"), ("$top", SITE_PAGE_SIZE)])
            .await?;
        Ok(page.value)
    }

    pub async fn user_list(&self) -> GraphResult<Vec<DirectoryUser>> {
        let page: ListResponse<DirectoryUser> = self
            .get_json(
                "/users",
                &[("$select", "id,userPrincipalName"), ("$top", USER_PAGE_SIZE)]
            )
            .await?;
        Ok(page.value)
    }

    /// `user` may be an object id or a user principal name.
    pub async fn delete_user(&self, user: &str) -> GraphResult<ApiResponse> {
        debug!(user, "Deleting user");
        self.api(
            &format!("/users/{}", user),
            &[],
            RequestBody::Empty,
            Some(Method::DELETE)
        )
        .await
    }

    /// Enabled subscriptions, minus the excluded trial SKU.
    pub async fn subscribed_list(&self) -> GraphResult<Vec<SkuSummary>> {
        let page: ListResponse<SubscribedSku> = self.get_json("/subscribedSkus", &[]).await?;
        Ok(assignable_skus(&page.value))
    }

    /// `id` of the domain flagged as default, if any.
    pub async fn get_default_domain(&self) -> GraphResult<Option<String>> {
        let page: ListResponse<Domain> = self.get_json("/domains", &[]).await?;
        Ok(default_domain(page.value))
    }

    pub async fn create_directory_user(&self, payload: &NewUserPayload) -> GraphResult<CreatedUser> {
        let response = self.post_json("/users", payload).await?;
        let created = match response.into_body() {
            Some(body) => serde_json::from_value(body)?,
            None => CreatedUser::default()
        };
        Ok(created)
    }

    pub async fn assign_license(
        &self,
        user_principal_name: &str,
        sku_id: &str
    ) -> GraphResult<ApiResponse> {
        self.post_json(
            &format!("/users/{}/assignLicense", user_principal_name),
            &AssignLicensePayload::add(sku_id)
        )
        .await
    }
}

pub fn assignable_skus(skus: &[SubscribedSku]) -> Vec<SkuSummary> {
    skus.iter()
        .filter(|sku| sku.is_assignable())
        .map(SkuSummary::from)
        .collect()
}

pub fn default_domain(domains: Vec<Domain>) -> Option<String> {
    domains.into_iter().find(|d| d.is_default).map(|d| d.id)
}
