//! Maps the free-text job message reported by the controller to an outcome.
//!
//! The controller does not expose a closed set of status codes for SCP
//! imports, only human-readable messages. Matching is case-sensitive
//! substring search, and rules are checked in order so that a failure marker
//! always beats success wording in the same message.

/// Outcome category of a job status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobClass {
    /// The controller reported a failure or partial failure.
    Failed,
    /// Import accepted with `NoReboot`; changes apply on the next reboot.
    Deferred,
    /// Profile imported and applied.
    Applied,
    /// Nothing in the profile differed from the current configuration.
    NoChanges,
    InProgress,
}

impl JobClass {
    pub fn is_terminal(self) -> bool {
        self != JobClass::InProgress
    }

    pub fn is_success(self) -> bool {
        matches!(
            self,
            JobClass::Deferred | JobClass::Applied | JobClass::NoChanges
        )
    }
}

const RULES: &[(JobClass, &[&str])] = &[
    (
        JobClass::Failed,
        &[
            "failed",
            "completed with errors",
            "Not one",
            "not compliant",
            "Unable",
            "The system could not be shut down",
        ],
    ),
    (JobClass::Deferred, &["No reboot Server"]),
    (JobClass::Applied, &["Successfully imported"]),
    (
        JobClass::NoChanges,
        &["No changes", "No configuration changes"],
    ),
];

pub fn classify(message: &str) -> JobClass {
    RULES
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| message.contains(m)))
        .map(|(class, _)| *class)
        .unwrap_or(JobClass::InProgress)
}
