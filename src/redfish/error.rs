use thiserror::Error;

/// Failures talking to the management controller.
///
/// Every variant is terminal for the run; nothing here is retried.
#[derive(Debug, Error)]
pub enum RedfishError {
    #[error("request to management controller failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("import request rejected with status {status}: {body}")]
    SubmissionRejected { status: u16, body: String },

    #[error("no job ID found in import response: {body}")]
    MissingJobId { body: String },

    #[error("query of job {job_id} failed with status {status}")]
    PollFailed { job_id: String, status: u16 },

    #[error("unexpected response from management controller: {0}")]
    MalformedResponse(String),
}
