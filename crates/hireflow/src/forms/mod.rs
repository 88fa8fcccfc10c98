//! Schema-driven application forms: resolving a job's field schema into a
//! renderable form, validating applicant input, and assembling the final
//! submission document.

pub mod assembler;
pub mod controls;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod session;
pub mod state;
pub mod validator;

#[cfg(test)]
mod tests;

pub use assembler::{build_payload, SubmissionPayload};
pub use controls::{render_controls, FormControl};
pub use registry::{
    humanize_key, CountryCode, FieldKind, FieldRegistry, FieldSpec, COUNTRY_CODES,
    DEFAULT_COUNTRY_CODE, DOMICILE_OPTIONS, GENDER_OPTIONS,
};
pub use resolver::{FieldOrigin, ResolvedField, ResolvedForm};
pub use schema::{ApplicationForm, FieldDescriptor, FieldValidation};
pub use session::{
    ApplicationSession, FetchToken, SessionError, SessionPhase, SubmitToken,
};
pub use state::{FormState, PhotoAttachment};
pub use validator::{validate_field, validate_form, FieldError, ValidationReport};
