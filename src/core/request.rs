//! Submission of the import request.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use super::report;
use crate::redfish::{ImportRequest, JobHandle, RedfishClient};

/// Echo `request` to `out` with the password masked, submit it, and return
/// the job the controller created.
///
/// A rejected submission or a response without a job ID is returned as an
/// error; no job handle exists in that case, so nothing can be polled.
pub async fn submit<W: Write + Send>(
    client: &RedfishClient,
    request: &ImportRequest,
    out: &mut W,
) -> Result<JobHandle> {
    report::write_request_echo(out, request)?;

    info!(
        controller = %client.base_url(),
        target = request.share_parameters.target.as_str(),
        share_type = request.share_parameters.share_type.map(|t| t.as_str()),
        "Submitting ImportSystemConfiguration"
    );

    let job = client
        .import_system_configuration(request)
        .await
        .context("ImportSystemConfiguration was not accepted")?;

    info!(job_id = %job, "Import job created");
    report::write_job_created(out, &job)?;

    Ok(job)
}
