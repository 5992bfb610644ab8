//! Fixed-interval polling of an import job until it reaches a terminal state.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use tracing::{debug, info, warn};

use super::classifier::{JobClass, classify};
use super::report;
use crate::redfish::{JobHandle, JobStatusSnapshot, RedfishError};

/// Anything that can report the current state of a job.
#[async_trait]
pub trait JobStatusSource: Send + Sync {
    async fn job_status(&self, job: &JobHandle) -> Result<JobStatusSnapshot, RedfishError>;
}

/// Terminal result of a polled job.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub job: JobHandle,
    pub class: JobClass,
    /// The snapshot that produced the terminal classification.
    pub snapshot: JobStatusSnapshot,
    pub elapsed: TimeDelta,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.class.is_success()
    }
}

pub struct JobPoller {
    source: Arc<dyn JobStatusSource>,
    interval: Duration,
}

impl JobPoller {
    pub fn new(source: Arc<dyn JobStatusSource>, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Poll `job` until its message classifies as terminal.
    ///
    /// A progress line is written to `out` for every in-progress snapshot.
    /// Transport errors end polling immediately.
    pub async fn run<W: Write + Send>(&self, job: JobHandle, out: &mut W) -> Result<JobOutcome> {
        let started = Utc::now();
        let mut polls: u64 = 0;

        info!(job_id = %job, interval_ms = self.interval.as_millis() as u64, "Polling job status");

        loop {
            polls += 1;
            let snapshot = self
                .source
                .job_status(&job)
                .await
                .with_context(|| format!("Failed to query status of job {job}"))?;

            let class = classify(&snapshot.message);
            debug!(
                job_id = %job,
                poll = polls,
                class = ?class,
                message = %snapshot.message,
                "Job status"
            );

            if class.is_terminal() {
                let elapsed = Utc::now() - started;
                if class.is_success() {
                    info!(job_id = %job, class = ?class, polls, "Job finished");
                } else {
                    warn!(job_id = %job, message = %snapshot.message, polls, "Job reported failure");
                }
                return Ok(JobOutcome {
                    job,
                    class,
                    snapshot,
                    elapsed,
                });
            }

            report::write_progress(out, &job, &snapshot)?;
            tokio::time::sleep(self.interval).await;
        }
    }
}
