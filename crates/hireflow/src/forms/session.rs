use thiserror::Error;

use super::assembler::{build_payload, SubmissionPayload};
use super::controls::{render_controls, FormControl};
use super::registry::FieldRegistry;
use super::resolver::ResolvedForm;
use super::schema::ApplicationForm;
use super::state::{FormState, PhotoAttachment};
use super::validator::{validate_field, validate_form, FieldError, ValidationReport};

/// Lifecycle of one application attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the job's schema to arrive.
    Loading,
    /// Form resolved and editable.
    Ready,
    /// A submission is in flight; input is frozen.
    Submitting,
    /// Terminal. The application was accepted.
    Success,
    /// The last submission was rejected; input is editable again.
    Failed,
}

impl SessionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Loading => "loading",
            SessionPhase::Ready => "ready",
            SessionPhase::Submitting => "submitting",
            SessionPhase::Success => "success",
            SessionPhase::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Pairs a schema fetch with the session generation that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

/// Pairs an in-flight submission with the session generation that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitToken(u64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("form is not ready (currently {phase})")]
    NotReady { phase: SessionPhase },
    #[error("a submission is already in flight")]
    SubmitInFlight,
    #[error("application already submitted")]
    Completed,
    #[error("submission blocked by {} invalid field(s)", .0.len())]
    Invalid(ValidationReport),
}

/// Drives one applicant's journey from schema load to submission outcome.
///
/// Every async boundary is tokenized: schema responses and submission
/// outcomes only apply when their token matches the session's current
/// generation, so a response from before a [`reset`](Self::reset) or a
/// superseded attempt is discarded instead of clobbering newer state.
///
/// There is no submission timeout. If the transport never reports back,
/// the session stays in [`SessionPhase::Submitting`] until `reset`.
#[derive(Debug, Clone)]
pub struct ApplicationSession {
    registry: FieldRegistry,
    phase: SessionPhase,
    epoch: u64,
    form: Option<ResolvedForm>,
    state: FormState,
    submit_error: Option<String>,
    application_id: Option<String>,
}

impl ApplicationSession {
    /// Opens a session in `Loading` and hands back the token the schema
    /// fetch must return with.
    pub fn new(registry: FieldRegistry) -> (Self, FetchToken) {
        let session = Self {
            registry,
            phase: SessionPhase::Loading,
            epoch: 0,
            form: None,
            state: FormState::new(),
            submit_error: None,
            application_id: None,
        };
        let token = FetchToken(session.epoch);
        (session, token)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn form(&self) -> Option<&ResolvedForm> {
        self.form.as_ref()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn application_id(&self) -> Option<&str> {
        self.application_id.as_deref()
    }

    /// Applies a schema response. Returns `false` when the token is stale
    /// or the session already moved on, in which case nothing changes.
    pub fn schema_loaded(&mut self, token: FetchToken, schema: Option<ApplicationForm>) -> bool {
        if token.0 != self.epoch || self.phase != SessionPhase::Loading {
            return false;
        }

        self.form = Some(ResolvedForm::resolve(&self.registry, schema.as_ref()));
        self.phase = SessionPhase::Ready;
        true
    }

    /// Applies a failed schema fetch by resolving the default field set.
    /// The applicant can still fill and submit the form.
    pub fn load_failed(&mut self, token: FetchToken) -> bool {
        if token.0 != self.epoch || self.phase != SessionPhase::Loading {
            return false;
        }

        self.form = Some(ResolvedForm::resolve(&self.registry, None));
        self.phase = SessionPhase::Ready;
        true
    }

    /// Widgets for the resolved form, empty while still loading.
    pub fn controls(&self) -> Vec<FormControl> {
        match &self.form {
            Some(form) => render_controls(&self.registry, form),
            None => Vec::new(),
        }
    }

    /// Validates the whole form as it stands.
    pub fn validate(&self) -> ValidationReport {
        match &self.form {
            Some(form) => validate_form(form, &self.state),
            None => ValidationReport::default(),
        }
    }

    /// Validates a single field, for inline feedback while typing.
    pub fn validate_field(&self, key: &str) -> Option<FieldError> {
        self.form
            .as_ref()
            .and_then(|form| validate_field(form, &self.state, key))
    }

    pub fn set_value(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.state.set_value(key, value);
        Ok(())
    }

    pub fn touch(&mut self, key: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.state.touch(key);
        Ok(())
    }

    pub fn attach_photo(&mut self, photo: PhotoAttachment) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.state.attach_photo(photo);
        Ok(())
    }

    pub fn clear_photo(&mut self) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.state.clear_photo();
        Ok(())
    }

    /// Validates and, when clean, freezes the form and assembles the
    /// payload to post. The returned token must accompany the outcome.
    ///
    /// Allowed from `Ready` and from `Failed`, so a rejected attempt can
    /// be corrected and retried without losing any input.
    pub fn begin_submit(&mut self) -> Result<(SubmitToken, SubmissionPayload), SessionError> {
        self.ensure_editable()?;

        let form = match &self.form {
            Some(form) => form,
            None => {
                return Err(SessionError::NotReady { phase: self.phase });
            }
        };

        let report = validate_form(form, &self.state);
        if !report.is_valid() {
            return Err(SessionError::Invalid(report));
        }

        let payload = build_payload(form, &self.state);
        self.epoch += 1;
        self.phase = SessionPhase::Submitting;
        self.submit_error = None;
        Ok((SubmitToken(self.epoch), payload))
    }

    /// Records a successful submission. Stale tokens are discarded.
    pub fn submit_succeeded(&mut self, token: SubmitToken, application_id: impl Into<String>) -> bool {
        if token.0 != self.epoch || self.phase != SessionPhase::Submitting {
            return false;
        }

        self.phase = SessionPhase::Success;
        self.application_id = Some(application_id.into());
        true
    }

    /// Records a rejected submission. The form keeps everything the
    /// applicant entered and becomes editable again.
    pub fn submit_failed(&mut self, token: SubmitToken, message: impl Into<String>) -> bool {
        if token.0 != self.epoch || self.phase != SessionPhase::Submitting {
            return false;
        }

        self.phase = SessionPhase::Failed;
        self.submit_error = Some(message.into());
        true
    }

    /// Abandons the current attempt and starts over in `Loading`. Any
    /// response still in flight for the old generation will be ignored.
    pub fn reset(&mut self) -> FetchToken {
        self.epoch += 1;
        self.phase = SessionPhase::Loading;
        self.form = None;
        self.state = FormState::new();
        self.submit_error = None;
        self.application_id = None;
        FetchToken(self.epoch)
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Ready | SessionPhase::Failed => Ok(()),
            SessionPhase::Loading => Err(SessionError::NotReady { phase: self.phase }),
            SessionPhase::Submitting => Err(SessionError::SubmitInFlight),
            SessionPhase::Success => Err(SessionError::Completed),
        }
    }
}
