use tracing::{debug, error, warn};

use crate::model::{FieldName, FormFields, ValidationErrors, validate};

use super::endpoint::AcceptanceEndpoint;

/// Status message shown after a successful submission.
pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// Status message shown when a submission fails and the policy reports it.
pub const FAILURE_MESSAGE: &str =
    "Failed to submit form. Please check your connection and try again.";

/// Which failure path a submission exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperatingMode {
    /// Exercise the validation path only; a valid form makes no network call.
    #[default]
    ValidationScenario,
    /// Exercise the network path against the acceptance endpoint.
    NetworkScenario,
}

/// Whether validation errors are surfaced to the caller on a failed submit.
///
/// `Suppress` reproduces the "nothing happens on submit" defect class for
/// diagnostic exercises; production use defaults to `Surface`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorVisibilityPolicy {
    #[default]
    Surface,
    Suppress,
}

/// Whether a failed network submission is reported to the caller.
///
/// `Silent` logs the failure and leaves no visible status, reproducing the
/// silent network-failure defect class; production use defaults to `Report`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorReportingPolicy {
    #[default]
    Report,
    Silent,
}

/// Where a submission attempt currently stands.
///
/// `Succeeded` and `Failed` are terminal for one attempt but are retained
/// for display until the next submit overwrites them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    /// Returns `true` while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

/// Kind of a user-visible status payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// User-visible outcome of the last completed submission, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

/// Orchestrates validation, policy decisions, and the submission state
/// machine for one contact form.
///
/// Owns the field store, the current validation errors and their visibility
/// flag, and the submission state. The presentation layer drives it through
/// [`set_field`](Self::set_field), [`set_mode`](Self::set_mode), and
/// [`submit`](Self::submit), and renders from the getters.
#[derive(Debug)]
pub struct SubmissionController<E> {
    endpoint: E,
    fields: FormFields,
    errors: ValidationErrors,
    errors_visible: bool,
    state: SubmissionState,
    mode: OperatingMode,
    visibility: ErrorVisibilityPolicy,
    reporting: ErrorReportingPolicy,
}

impl<E: AcceptanceEndpoint> SubmissionController<E> {
    /// Creates a controller with the production-safe default policies.
    pub fn new(endpoint: E) -> Self {
        Self::with_policies(
            endpoint,
            ErrorVisibilityPolicy::default(),
            ErrorReportingPolicy::default(),
        )
    }

    /// Creates a controller with explicit policy switches.
    ///
    /// Setting both to their unsafe values (`Suppress` + `Silent`)
    /// reproduces a fully silent failing form.
    pub fn with_policies(
        endpoint: E,
        visibility: ErrorVisibilityPolicy,
        reporting: ErrorReportingPolicy,
    ) -> Self {
        Self {
            endpoint,
            fields: FormFields::default(),
            errors: ValidationErrors::default(),
            errors_visible: false,
            state: SubmissionState::default(),
            mode: OperatingMode::default(),
            visibility,
            reporting,
        }
    }

    /// Replaces the initial field values, e.g. to seed demo data.
    pub fn with_fields(mut self, fields: FormFields) -> Self {
        self.fields = fields;
        self
    }

    /// Current field values.
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Current validation errors (may be populated but not visible).
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Whether the caller should render the validation errors.
    pub fn errors_visible(&self) -> bool {
        self.errors_visible
    }

    /// Current submission state.
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Returns `true` while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    /// Current operating mode.
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// User-visible status derived from the submission state.
    pub fn status(&self) -> Option<Status> {
        match &self.state {
            SubmissionState::Succeeded => Some(Status {
                kind: StatusKind::Success,
                message: SUCCESS_MESSAGE.to_string(),
            }),
            SubmissionState::Failed(reason) => Some(Status {
                kind: StatusKind::Error,
                message: reason.clone(),
            }),
            SubmissionState::Idle | SubmissionState::Submitting => None,
        }
    }

    /// Updates one field, clearing any recorded error for it.
    ///
    /// The clearance is a responsiveness optimization for the caller's
    /// rendering; the next submit recomputes the full error mapping.
    pub fn set_field(&mut self, field: FieldName, value: impl Into<String>) {
        self.fields.set(field, value);
        self.errors.clear_field(field);
    }

    /// Switches the operating mode, clearing errors and any prior status.
    ///
    /// Always resets, even when re-selecting the active mode.
    pub fn set_mode(&mut self, mode: OperatingMode) {
        self.mode = mode;
        self.state = SubmissionState::Idle;
        self.errors = ValidationErrors::default();
        self.errors_visible = false;
    }

    /// Runs one submission attempt.
    ///
    /// Validation failures halt before any state transition; whether they
    /// are surfaced is the visibility policy's call. A clean form passes
    /// through `Submitting` and ends at a terminal state or back at `Idle`
    /// before this returns. A submit issued while one is already in flight
    /// is ignored.
    pub async fn submit(&mut self) {
        if self.state.is_submitting() {
            debug!("submit ignored: already submitting");
            return;
        }

        let errors = validate(&self.fields);
        if !errors.is_empty() {
            match self.visibility {
                ErrorVisibilityPolicy::Surface => {
                    debug!(count = errors.len(), "validation failed");
                    self.errors = errors;
                    self.errors_visible = true;
                }
                ErrorVisibilityPolicy::Suppress => {
                    warn!(count = errors.len(), "validation failed; errors suppressed by policy");
                }
            }
            return;
        }

        self.errors = errors;
        self.errors_visible = false;
        self.state = SubmissionState::Submitting;

        if self.mode == OperatingMode::ValidationScenario {
            // No network behavior is defined for this mode; a valid form
            // simply returns to idle with no status.
            self.state = SubmissionState::Idle;
            return;
        }

        let result = self.endpoint.submit(&self.fields).await;

        self.state = match result {
            Ok(body) => {
                debug!(%body, "submission accepted");
                SubmissionState::Succeeded
            }
            Err(err) => match self.reporting {
                ErrorReportingPolicy::Report => SubmissionState::Failed(FAILURE_MESSAGE.to_string()),
                ErrorReportingPolicy::Silent => {
                    error!(%err, "submission failed; status suppressed by policy");
                    SubmissionState::Idle
                }
            },
        };
    }
}
