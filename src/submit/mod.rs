//! Submission state machine, policy switches, and the acceptance endpoint.

mod controller;
mod endpoint;

pub use controller::{
    ErrorReportingPolicy, ErrorVisibilityPolicy, FAILURE_MESSAGE, OperatingMode, Status,
    StatusKind, SubmissionController, SubmissionState, SUCCESS_MESSAGE,
};
pub use endpoint::{AcceptanceEndpoint, DEFAULT_ENDPOINT, HttpEndpoint, TransportError};
