//! Operator-facing output: the request echo, progress lines and final reports.

use std::io::{self, Write};

use chrono::TimeDelta;
use serde_json::{Map, Value};

use super::classifier::JobClass;
use super::poller::JobOutcome;
use crate::redfish::models::display_value;
use crate::redfish::{ImportRequest, JobHandle, JobStatusSnapshot};

const SEPARATOR_WIDTH: usize = 80;
const MASKED_PASSWORD: &str = "**********";

/// `Key: Value` lines for every field sent to the controller, in payload
/// order, with the share password masked.
pub fn request_echo_lines(request: &ImportRequest) -> Vec<String> {
    let Ok(Value::Object(payload)) = serde_json::to_value(request) else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    for (key, value) in &payload {
        match value {
            Value::Object(share) if key == "ShareParameters" => {
                for (share_key, share_value) in share {
                    if share_key == "Password" {
                        lines.push(format!("{share_key}: {MASKED_PASSWORD}"));
                    } else {
                        lines.push(format!("{share_key}: {}", display_value(share_value)));
                    }
                }
            }
            other => lines.push(format!("{key}: {}", display_value(other))),
        }
    }
    lines
}

pub fn write_request_echo<W: Write>(out: &mut W, request: &ImportRequest) -> io::Result<()> {
    writeln!(out, "\n- Arguments and values for ImportSystemConfiguration\n")?;
    for line in request_echo_lines(request) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

pub fn write_job_created<W: Write>(out: &mut W, job: &JobHandle) -> io::Result<()> {
    writeln!(
        out,
        "\n- Job ID \"{job}\" successfully created for ImportSystemConfiguration\n"
    )
}

pub fn write_progress<W: Write>(
    out: &mut W,
    job: &JobHandle,
    snapshot: &JobStatusSnapshot,
) -> io::Result<()> {
    writeln!(
        out,
        "- Job {job} not completed, current status: \"{}\", percent complete: \"{}\"",
        snapshot.message,
        snapshot.percent_display()
    )
}

/// Final report for a terminal outcome.
pub fn write_outcome<W: Write>(out: &mut W, outcome: &JobOutcome) -> io::Result<()> {
    let job = &outcome.job;
    let snapshot = &outcome.snapshot;

    match outcome.class {
        JobClass::Failed => {
            writeln!(
                out,
                "- FAIL, job {job} marked as {} but detected issue(s). See detailed job results below\n",
                snapshot.job_state.as_deref().unwrap_or("unknown")
            )?;
            write_details(out, job, &snapshot.details)?;
            write_item_results(out, job, &snapshot.item_results)?;
        }
        JobClass::Deferred => {
            writeln!(
                out,
                "- PASS, job {job} marked completed. NoReboot requested, config changes will not be applied until the next manual server reboot\n"
            )?;
            write_details(out, job, &snapshot.details)?;
        }
        JobClass::Applied => {
            writeln!(out, "- PASS, job {job} successfully marked completed\n")?;
            write_details(out, job, &snapshot.details)?;
            writeln!(out, "\n- {job} completed in: {}", format_elapsed(outcome.elapsed))?;
            write_item_results(out, job, &snapshot.item_results)?;
        }
        JobClass::NoChanges => {
            writeln!(out, "- PASS, job {job} marked completed, no changes applied\n")?;
            write_details(out, job, &snapshot.details)?;
        }
        JobClass::InProgress => write_progress(out, job, snapshot)?,
    }
    Ok(())
}

pub fn write_share_types<W: Write>(
    out: &mut W,
    controller: &str,
    share_types: &[String],
) -> io::Result<()> {
    writeln!(
        out,
        "\n- ImportSystemConfiguration supported share types for iDRAC {controller}\n"
    )?;
    for share_type in share_types {
        writeln!(out, "{share_type}")?;
    }
    Ok(())
}

fn write_details<W: Write>(
    out: &mut W,
    job: &JobHandle,
    details: &Map<String, Value>,
) -> io::Result<()> {
    writeln!(out, "- Detailed job results for job {job}\n")?;
    write_fields(out, details)
}

fn write_item_results<W: Write>(
    out: &mut W,
    job: &JobHandle,
    items: &[Map<String, Value>],
) -> io::Result<()> {
    writeln!(out, "\n- Config results for job {job}\n")?;
    for item in items {
        writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        write_fields(out, item)?;
    }
    Ok(())
}

fn write_fields<W: Write>(out: &mut W, fields: &Map<String, Value>) -> io::Result<()> {
    for (key, value) in fields {
        writeln!(out, "{key}: {}", display_value(value))?;
    }
    Ok(())
}

/// Formats a duration as `H:MM:SS`, dropping sub-second precision.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let total = elapsed.num_seconds().max(0);
    format!(
        "{}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redfish::{ShareParameters, ShareType, ShutdownType, Target};
    use serde_json::json;

    fn snapshot(message: &str) -> JobStatusSnapshot {
        JobStatusSnapshot::from_value(&json!({
            "Oem": { "Dell": {
                "JobState": "Completed",
                "Message": message,
                "PercentComplete": 100
            }},
            "Messages": [
                { "Oem": { "Dell": { "Name": "NIC.Integrated.1-1-1", "Status": "Success" } } },
                { "Oem": { "Dell": { "Name": "BIOS.Setup.1-1", "Status": "Failure" } } }
            ]
        }))
        .unwrap()
    }

    fn outcome(class: JobClass, message: &str) -> JobOutcome {
        JobOutcome {
            job: JobHandle::extract("JID_123").unwrap(),
            class,
            snapshot: snapshot(message),
            elapsed: TimeDelta::seconds(83),
        }
    }

    fn render(outcome: &JobOutcome) -> String {
        let mut out = Vec::new();
        write_outcome(&mut out, outcome).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn echo_masks_password_and_keeps_order() {
        let mut share = ShareParameters::new(Target::Bios);
        share.ip_address = Some("192.0.2.140".to_string());
        share.share_type = Some(ShareType::Cifs);
        share.user_name = Some("administrator".to_string());
        share.password = Some("hunter2".to_string());
        let mut request = ImportRequest::new(share);
        request.shutdown_type = Some(ShutdownType::Forced);

        let lines = request_echo_lines(&request);

        assert_eq!(
            lines,
            [
                "Target: BIOS",
                "IPAddress: 192.0.2.140",
                "ShareType: CIFS",
                "UserName: administrator",
                "Password: **********",
                "ShutdownType: Forced",
            ]
        );
        assert!(!lines.iter().any(|l| l.contains("hunter2")));
    }

    #[test]
    fn failure_report_lists_every_item() {
        let text = render(&outcome(
            JobClass::Failed,
            "Import of Server Configuration Profile operation completed with errors",
        ));

        assert!(text.contains("- FAIL, job JID_123 marked as Completed"));
        assert!(text.contains("PercentComplete: 100"));
        assert_eq!(text.matches(&"-".repeat(SEPARATOR_WIDTH)).count(), 2);
        assert!(text.contains("Name: BIOS.Setup.1-1"));
        assert!(text.contains("Status: Failure"));
    }

    #[test]
    fn applied_report_includes_elapsed_time() {
        let text = render(&outcome(JobClass::Applied, "Successfully imported"));

        assert!(text.contains("- PASS, job JID_123 successfully marked completed"));
        assert!(text.contains("JID_123 completed in: 0:01:23"));
        assert!(text.contains("Name: NIC.Integrated.1-1-1"));
    }

    #[test]
    fn deferred_and_no_change_reports_skip_item_results() {
        for (class, message) in [
            (JobClass::Deferred, "No reboot Server"),
            (JobClass::NoChanges, "No changes"),
        ] {
            let text = render(&outcome(class, message));
            assert!(text.contains("- PASS"));
            assert!(text.contains(&format!("Message: {message}")));
            assert!(!text.contains("Config results"));
        }
    }

    #[test]
    fn progress_line_shows_percent() {
        let mut out = Vec::new();
        let job = JobHandle::extract("JID_9").unwrap();
        write_progress(&mut out, &job, &snapshot("Applying all changes to BIOS")).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"Applying all changes to BIOS\""));
        assert!(text.contains("percent complete: \"100\""));
    }

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(TimeDelta::milliseconds(900)), "0:00:00");
        assert_eq!(format_elapsed(TimeDelta::seconds(83)), "0:01:23");
        assert_eq!(format_elapsed(TimeDelta::seconds(3 * 3600 + 5)), "3:00:05");
    }
}
