//! Application services for job reporting and approval.

mod reporting;

pub use reporting::{
    BulkDecisionOutcome, JobReportingError, JobReportingResult, JobReportingService,
    SubmitJobRequest,
};
