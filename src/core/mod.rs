pub mod classifier;
pub mod poller;
pub mod report;
pub mod request;
pub mod share_types;

pub use classifier::{JobClass, classify};
pub use poller::{JobOutcome, JobPoller, JobStatusSource};
