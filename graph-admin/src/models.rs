//! Typed request and response records for the Graph endpoints in use.

use serde::{Deserialize, Serialize};

/// SKU that can never be handed out by random license selection.
pub const EXCLUDED_SKU_ID: &str = "6470687e-a428-4b7a-bef2-8a291ad947c9";

pub const USAGE_LOCATION: &str = "HK";
pub const PASSWORD_POLICIES: &str = "DisablePasswordExpiration, DisableStrongPassword";

/// One page of a collection. `@odata.nextLink` is deliberately not read.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub value: Vec<T>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveItem {
    pub id: String,
    pub name: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    pub id: String,
    pub user_principal_name: String
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: String,
    #[serde(default)]
    pub is_default: bool
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedSku {
    pub sku_id: String,
    pub capability_status: String,
    #[serde(default)]
    pub sku_part_number: Option<String>,
    #[serde(default)]
    pub consumed_units: i64,
    #[serde(default)]
    pub prepaid_units: PrepaidUnits
}

impl SubscribedSku {
    /// Enabled and not the excluded trial SKU.
    pub fn is_assignable(&self) -> bool {
        self.capability_status == "Enabled" && self.sku_id != EXCLUDED_SKU_ID
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PrepaidUnits {
    #[serde(default)]
    pub enabled: i64
}

/// Simplified subscription entry as printed by the maintenance routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuSummary {
    pub status: String,
    pub sku_id: String,
    /// `consumed/prepaid-enabled`
    pub units: String
}

impl From<&SubscribedSku> for SkuSummary {
    fn from(sku: &SubscribedSku) -> Self {
        Self {
            status: sku.capability_status.clone(),
            sku_id: sku.sku_id.clone(),
            units: format!("{}/{}", sku.consumed_units, sku.prepaid_units.enabled)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserPayload {
    pub account_enabled: bool,
    pub display_name: String,
    pub mail_nickname: String,
    pub password_policies: String,
    pub password_profile: PasswordProfile,
    pub user_principal_name: String,
    pub usage_location: String
}

impl NewUserPayload {
    pub fn new(username: &str, user_principal_name: &str, password: &str) -> Self {
        Self {
            account_enabled: true,
            display_name: username.to_string(),
            mail_nickname: username.to_string(),
            password_policies: PASSWORD_POLICIES.to_string(),
            password_profile: PasswordProfile {
                password: password.to_string(),
                force_change_password_next_sign_in: false
            },
            user_principal_name: user_principal_name.to_string(),
            usage_location: USAGE_LOCATION.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordProfile {
    pub password: String,
    pub force_change_password_next_sign_in: bool
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignLicensePayload {
    pub add_licenses: Vec<AssignedLicense>,
    pub remove_licenses: Vec<String>
}

impl AssignLicensePayload {
    pub fn add(sku_id: &str) -> Self {
        Self {
            add_licenses: vec![AssignedLicense {
                disabled_plans: Vec::new(),
                sku_id: sku_id.to_string()
            }],
            remove_licenses: Vec::new()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedLicense {
    pub disabled_plans: Vec<String>,
    pub sku_id: String
}

/// The parts of a freshly created user the workflow cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_principal_name: Option<String>
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_user_payload_shape() {
        let payload = NewUserPayload::new("abcDEF", "abcDEF@contoso.com", "p@ss");
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            json!({
                "accountEnabled": true,
                "displayName": "abcDEF",
                "mailNickname": "abcDEF",
                "passwordPolicies": "DisablePasswordExpiration, DisableStrongPassword",
                "passwordProfile": {
                    "password": "p@ss",
                    "forceChangePasswordNextSignIn": false
                },
                "userPrincipalName": "abcDEF@contoso.com",
                "usageLocation": "HK"
            })
        );
    }

    #[test]
    fn test_assign_license_payload_shape() {
        let value = serde_json::to_value(AssignLicensePayload::add("sku-1")).unwrap();
        assert_eq!(
            value,
            json!({
                "addLicenses": [{"disabledPlans": [], "skuId": "sku-1"}],
                "removeLicenses": []
            })
        );
    }

    #[test]
    fn test_sku_summary_units() {
        let sku: SubscribedSku = serde_json::from_value(json!({
            "skuId": "sku-1",
            "skuPartNumber": "ENTERPRISEPACK",
            "capabilityStatus": "Enabled",
            "consumedUnits": 3,
            "prepaidUnits": {"enabled": 25, "suspended": 0, "warning": 0}
        }))
        .unwrap();

        let summary = SkuSummary::from(&sku);
        assert_eq!(summary.units, "3/25");
        assert_eq!(summary.status, "Enabled");
        assert!(sku.is_assignable());
    }

    #[test]
    fn test_excluded_and_disabled_skus_not_assignable() {
        let excluded: SubscribedSku = serde_json::from_value(json!({
            "skuId": EXCLUDED_SKU_ID,
            "capabilityStatus": "Enabled"
        }))
        .unwrap();
        let suspended: SubscribedSku = serde_json::from_value(json!({
            "skuId": "sku-2",
            "capabilityStatus": "Suspended"
        }))
        .unwrap();

        assert!(!excluded.is_assignable());
        assert!(!suspended.is_assignable());
    }

    #[test]
    fn test_list_response_requires_value() {
        let result: Result<ListResponse<DriveItem>, _> =
            serde_json::from_value(json!({"@odata.context": "x"}));
        assert!(result.is_err());
    }
}
