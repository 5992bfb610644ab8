//! Supported network share types, read from the manager resource.

use serde_json::Value;

use crate::redfish::{RedfishClient, RedfishError};

/// Import action keys under `Actions.Oem`, oldest schema revision first.
const IMPORT_ACTION_KEYS: [&str; 2] = [
    "OemManager.v1_0_0#OemManager.ImportSystemConfiguration",
    "OemManager.v1_1_0#OemManager.ImportSystemConfiguration",
];

const ALLOWABLE_SHARE_TYPES: &str = "ShareType@Redfish.AllowableValues";

/// Pseudo share type for files uploaded to the controller itself.
const LOCAL_SHARE_TYPE: &str = "LOCAL";

/// Network share types advertised in a manager document, `LOCAL` excluded.
pub fn supported_share_types(manager: &Value) -> Result<Vec<String>, RedfishError> {
    let oem_actions = manager.pointer("/Actions/Oem").ok_or_else(|| {
        RedfishError::MalformedResponse("manager resource has no Actions.Oem".to_string())
    })?;

    let action = IMPORT_ACTION_KEYS
        .iter()
        .find_map(|key| oem_actions.get(*key))
        .ok_or_else(|| {
            RedfishError::MalformedResponse(
                "manager does not advertise ImportSystemConfiguration".to_string(),
            )
        })?;

    let allowable = action
        .get("ShareParameters")
        .and_then(|p| p.get(ALLOWABLE_SHARE_TYPES))
        .and_then(Value::as_array)
        .ok_or_else(|| {
            RedfishError::MalformedResponse(format!(
                "ImportSystemConfiguration has no {ALLOWABLE_SHARE_TYPES}"
            ))
        })?;

    Ok(allowable
        .iter()
        .filter_map(Value::as_str)
        .filter(|t| *t != LOCAL_SHARE_TYPE)
        .map(str::to_owned)
        .collect())
}

pub async fn fetch(client: &RedfishClient) -> Result<Vec<String>, RedfishError> {
    let manager = client.get_manager().await?;
    supported_share_types(&manager)
}
