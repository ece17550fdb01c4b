#![allow(dead_code)]

use config::{Credentials, GraphEndpoints};
use graph_admin::{AccessToken, GraphClient};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "admin@contoso.com";
pub const TENANT: &str = "contoso-tenant";
pub const TOKEN: &str = "test-token";

pub fn credentials() -> Credentials {
    Credentials {
        tenant_id: TENANT.to_string(),
        client_id: "client-app".to_string(),
        client_secret: "client-secret".to_string(),
        username: USERNAME.to_string()
    }
}

pub fn endpoints(server: &MockServer) -> GraphEndpoints {
    GraphEndpoints {
        api_base_url: format!("{}/v1.0/", server.uri()),
        login_authority: server.uri(),
        ..GraphEndpoints::default()
    }
}

pub fn unauthenticated_client(server: &MockServer) -> GraphClient {
    GraphClient::new(credentials(), endpoints(server)).unwrap()
}

pub fn client(server: &MockServer) -> GraphClient {
    unauthenticated_client(server).with_token(AccessToken::new(TOKEN))
}

pub fn bearer() -> String {
    format!("Bearer {}", TOKEN)
}

pub fn token_path() -> String {
    format!("/{}/oauth2/v2.0/token", TENANT)
}

pub fn drive_content_path(name: &str) -> String {
    format!("/v1.0/users/{}/drive/root:/{}:/content", USERNAME, name)
}

pub const MARKER_PATH_REGEX: &str =
    r"^/v1\.0/users/admin@contoso\.com/drive/root:/\d+\.txt:/content$";

pub fn list(value: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "@odata.context": "https://graph.microsoft.com/v1.0/$metadata",
        "value": value
    }))
}

pub fn files(names: &[String]) -> Value {
    Value::Array(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| json!({"id": format!("item-{}", i), "name": name}))
            .collect()
    )
}

pub fn users(principal_names: &[String]) -> Value {
    Value::Array(
        principal_names
            .iter()
            .enumerate()
            .map(|(i, upn)| json!({"id": format!("user-{}", i), "userPrincipalName": upn}))
            .collect()
    )
}

pub fn sku(sku_id: &str, status: &str, consumed: i64, enabled: i64) -> Value {
    json!({
        "skuId": sku_id,
        "skuPartNumber": "ENTERPRISEPACK",
        "capabilityStatus": status,
        "consumedUnits": consumed,
        "prepaidUnits": {"enabled": enabled, "suspended": 0, "warning": 0}
    })
}

pub async fn mount_skus(server: &MockServer, skus: Value) {
    Mock::given(method("GET"))
        .and(path("/v1.0/subscribedSkus"))
        .respond_with(list(skus))
        .mount(server)
        .await;
}

pub async fn mount_domains(server: &MockServer, domains: Value) {
    Mock::given(method("GET"))
        .and(path("/v1.0/domains"))
        .respond_with(list(domains))
        .mount(server)
        .await;
}

pub async fn mount_mail(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/v1.0/users/{}/messages", USERNAME)))
        .respond_with(list(json!([{"id": "m-1", "subject": "Welcome"}])))
        .mount(server)
        .await;
}
