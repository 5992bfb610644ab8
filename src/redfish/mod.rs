//! Redfish transport for the iDRAC management controller.
//!
//! ## Endpoints
//!
//! - `POST /redfish/v1/Managers/iDRAC.Embedded.1/Actions/Oem/EID_674_Manager.ImportSystemConfiguration`
//! - `GET /redfish/v1/TaskService/Tasks/{job_id}`
//! - `GET /redfish/v1/Managers/iDRAC.Embedded.1`

pub mod client;
mod error;
pub mod models;

pub use client::{Credentials, RedfishClient};
pub use error::RedfishError;
pub use models::{
    CertificateWarning, HostPowerState, ImportRequest, JobHandle, JobStatusSnapshot,
    ShareParameters, ShareType, ShutdownType, Target,
};

pub const MANAGER_PATH: &str = "/redfish/v1/Managers/iDRAC.Embedded.1";
pub const IMPORT_ACTION_PATH: &str =
    "/redfish/v1/Managers/iDRAC.Embedded.1/Actions/Oem/EID_674_Manager.ImportSystemConfiguration";
pub const TASKS_PATH: &str = "/redfish/v1/TaskService/Tasks";
