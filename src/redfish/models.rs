//! Wire types for the iDRAC ImportSystemConfiguration action and task resources.

use std::fmt;
use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use super::RedfishError;

/// Vendor namespace under `Oem` holding the job details.
pub const OEM_VENDOR: &str = "Dell";

static JOB_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"JID_[^/?#\s,']+").expect("job id pattern is valid"));

/// Network share protocol hosting the configuration profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum ShareType {
    #[serde(rename = "NFS")]
    #[value(name = "NFS")]
    Nfs,
    #[serde(rename = "CIFS")]
    #[value(name = "CIFS")]
    Cifs,
    #[serde(rename = "HTTP")]
    #[value(name = "HTTP")]
    Http,
    #[serde(rename = "HTTPS")]
    #[value(name = "HTTPS")]
    Https,
}

impl ShareType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nfs => "NFS",
            Self::Cifs => "CIFS",
            Self::Http => "HTTP",
            Self::Https => "HTTPS",
        }
    }
}

/// Component category the profile is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum Target {
    #[serde(rename = "ALL")]
    #[value(name = "ALL")]
    All,
    #[value(name = "System")]
    System,
    #[serde(rename = "BIOS")]
    #[value(name = "BIOS")]
    Bios,
    #[serde(rename = "IDRAC")]
    #[value(name = "IDRAC")]
    Idrac,
    #[serde(rename = "NIC")]
    #[value(name = "NIC")]
    Nic,
    #[serde(rename = "FC")]
    #[value(name = "FC")]
    Fc,
    #[value(name = "LifecycleController")]
    LifecycleController,
    #[serde(rename = "RAID")]
    #[value(name = "RAID")]
    Raid,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::System => "System",
            Self::Bios => "BIOS",
            Self::Idrac => "IDRAC",
            Self::Nic => "NIC",
            Self::Fc => "FC",
            Self::LifecycleController => "LifecycleController",
            Self::Raid => "RAID",
        }
    }
}

/// How the host is shut down to apply the changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum ShutdownType {
    #[value(name = "Graceful")]
    Graceful,
    #[value(name = "Forced")]
    Forced,
    /// Changes are staged and applied on the next manual reboot.
    #[value(name = "NoReboot")]
    NoReboot,
}

/// Host power state once the import finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum HostPowerState {
    #[value(name = "On")]
    On,
    #[value(name = "Off")]
    Off,
}

/// Whether the controller ignores certificate warnings from an HTTPS share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum CertificateWarning {
    #[value(name = "Enabled")]
    Enabled,
    #[value(name = "Disabled")]
    Disabled,
}

/// Location of the configuration profile and how to reach it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShareParameters {
    pub target: Target,
    #[serde(rename = "IPAddress", skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_type: Option<ShareType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_certificate_warning: Option<CertificateWarning>,
}

impl ShareParameters {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            ip_address: None,
            share_type: None,
            share_name: None,
            file_name: None,
            user_name: None,
            password: None,
            workgroup: None,
            ignore_certificate_warning: None,
        }
    }
}

/// Body of the ImportSystemConfiguration action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImportRequest {
    pub share_parameters: ShareParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutdown_type: Option<ShutdownType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_power_state: Option<HostPowerState>,
}

impl ImportRequest {
    pub fn new(share_parameters: ShareParameters) -> Self {
        Self {
            share_parameters,
            shutdown_type: None,
            host_power_state: None,
        }
    }
}

/// Identifier of the asynchronous import job, e.g. `JID_467767920358`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle(String);

impl JobHandle {
    /// Finds the first `JID_...` token in `text`, typically a `Location` header.
    pub fn extract(text: &str) -> Option<Self> {
        JOB_ID_PATTERN
            .find(text)
            .map(|m| Self(m.as_str().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One poll of the task resource.
///
/// `details` keeps every field of the vendor block in document order so the
/// final report can print all of them. `item_results` holds the vendor block
/// of each entry in `Messages`, one per configuration item acted upon.
#[derive(Debug, Clone)]
pub struct JobStatusSnapshot {
    pub message: String,
    pub job_state: Option<String>,
    pub percent_complete: Option<Value>,
    pub details: Map<String, Value>,
    pub item_results: Vec<Map<String, Value>>,
}

impl JobStatusSnapshot {
    pub fn from_value(document: &Value) -> Result<Self, RedfishError> {
        let vendor_pointer = format!("/Oem/{OEM_VENDOR}");

        let details = document
            .pointer(&vendor_pointer)
            .and_then(Value::as_object)
            .cloned()
            .ok_or_else(|| {
                RedfishError::MalformedResponse(format!(
                    "task resource has no Oem.{OEM_VENDOR} block"
                ))
            })?;

        let message = details
            .get("Message")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                RedfishError::MalformedResponse("task resource has no Message".to_string())
            })?
            .to_string();

        let job_state = details
            .get("JobState")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let percent_complete = details.get("PercentComplete").cloned();

        let item_results = document
            .get("Messages")
            .and_then(Value::as_array)
            .map(|messages| {
                messages
                    .iter()
                    .filter_map(|m| m.pointer(&vendor_pointer).and_then(Value::as_object))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            message,
            job_state,
            percent_complete,
            details,
            item_results,
        })
    }

    pub fn percent_display(&self) -> String {
        self.percent_complete
            .as_ref()
            .map(display_value)
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Renders a JSON value for operators: strings without quotes, rest as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_omits_unset_fields() {
        let mut share = ShareParameters::new(Target::Bios);
        share.ip_address = Some("192.0.2.10".to_string());
        share.share_type = Some(ShareType::Nfs);
        share.share_name = Some("/nfs".to_string());
        share.file_name = Some("scp.xml".to_string());

        let body = serde_json::to_value(ImportRequest::new(share)).unwrap();

        assert_eq!(
            body,
            json!({
                "ShareParameters": {
                    "Target": "BIOS",
                    "IPAddress": "192.0.2.10",
                    "ShareType": "NFS",
                    "ShareName": "/nfs",
                    "FileName": "scp.xml"
                }
            })
        );
    }

    #[test]
    fn request_carries_optional_directives() {
        let mut share = ShareParameters::new(Target::All);
        share.share_type = Some(ShareType::Https);
        share.user_name = Some("administrator".to_string());
        share.password = Some("secret".to_string());
        share.workgroup = Some("WORKGROUP".to_string());
        share.ignore_certificate_warning = Some(CertificateWarning::Disabled);

        let mut request = ImportRequest::new(share);
        request.shutdown_type = Some(ShutdownType::NoReboot);
        request.host_power_state = Some(HostPowerState::Off);

        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["ShutdownType"], "NoReboot");
        assert_eq!(body["HostPowerState"], "Off");
        assert_eq!(body["ShareParameters"]["Target"], "ALL");
        assert_eq!(body["ShareParameters"]["ShareType"], "HTTPS");
        assert_eq!(body["ShareParameters"]["UserName"], "administrator");
        assert_eq!(body["ShareParameters"]["Workgroup"], "WORKGROUP");
        assert_eq!(body["ShareParameters"]["IgnoreCertificateWarning"], "Disabled");
    }

    #[test]
    fn target_wire_names_match_controller_vocabulary() {
        for target in Target::value_variants() {
            let wire = serde_json::to_value(target).unwrap();
            assert_eq!(wire, target.as_str());
        }
    }

    #[test]
    fn job_handle_from_location_header() {
        let job = JobHandle::extract("/redfish/v1/TaskService/Tasks/JID_467767920358").unwrap();
        assert_eq!(job.as_str(), "JID_467767920358");
    }

    #[test]
    fn job_handle_missing() {
        assert!(JobHandle::extract("/redfish/v1/TaskService/Tasks/").is_none());
        assert!(JobHandle::extract("").is_none());
    }

    #[test]
    fn snapshot_keeps_vendor_fields_in_order() {
        let document = json!({
            "Id": "JID_1",
            "Oem": {
                "Dell": {
                    "JobState": "Running",
                    "Message": "Applying all changes to BIOS",
                    "PercentComplete": 40,
                    "Name": "Import Configuration"
                }
            },
            "Messages": [
                {
                    "Message": "generic",
                    "Oem": { "Dell": { "Name": "BIOS.Setup.1-1", "Status": "Success" } }
                },
                { "Message": "no vendor block" }
            ]
        });

        let snapshot = JobStatusSnapshot::from_value(&document).unwrap();

        assert_eq!(snapshot.message, "Applying all changes to BIOS");
        assert_eq!(snapshot.job_state.as_deref(), Some("Running"));
        assert_eq!(snapshot.percent_display(), "40");
        let keys: Vec<&str> = snapshot.details.keys().map(String::as_str).collect();
        assert_eq!(keys, ["JobState", "Message", "PercentComplete", "Name"]);
        assert_eq!(snapshot.item_results.len(), 1);
        assert_eq!(snapshot.item_results[0]["Status"], "Success");
    }

    #[test]
    fn snapshot_without_vendor_block_is_malformed() {
        let err = JobStatusSnapshot::from_value(&json!({ "Id": "JID_1" })).unwrap_err();
        assert!(matches!(err, RedfishError::MalformedResponse(_)));
    }
}
