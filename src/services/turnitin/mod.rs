pub mod download;
pub mod lifecycle;
pub mod poller;
pub mod queries;

pub use download::{FileFetcher, HttpFileFetcher};
pub use lifecycle::{LifecycleReport, SubmissionLifecycle, UnitOutcome};
pub use poller::{CompletionPoller, Sleeper, TokioSleeper};
pub use queries::{Lookup, ReportQueries};
