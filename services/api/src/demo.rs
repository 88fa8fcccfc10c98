use crate::infra::{seed_demo_portal, InMemoryCandidateRepository, InMemoryJobRepository};
use clap::Args;
use hireflow::error::AppError;
use hireflow::forms::{ApplicationSession, FieldRegistry, PhotoAttachment, SessionError};
use hireflow::jobs::{CandidateQuery, CandidateView, JobDraft, JobQuery, JobView, PortalService};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Attach this file as the applicant's photo (content type guessed from the name).
    #[arg(long)]
    pub(crate) photo: Option<PathBuf>,
    /// Skip the candidate intake portion of the demo.
    #[arg(long)]
    pub(crate) skip_intake: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { photo, skip_intake } = args;

    println!("Recruitment portal demo");
    let jobs = Arc::new(InMemoryJobRepository::default());
    let candidates = Arc::new(InMemoryCandidateRepository::default());
    let service = PortalService::new(jobs, candidates);

    let postings = seed_demo_portal(&service)?;
    let frontend = match postings.first() {
        Some(posting) => posting.clone(),
        None => {
            println!("  Seeding produced no postings");
            return Ok(());
        }
    };

    println!("\nPosting draft check");
    let mut draft = JobDraft {
        title: "Data Analyst".to_string(),
        department: "Analytics".to_string(),
        description: "Own BI".to_string(),
        salary_min: Some(6_000_000),
        salary_max: Some(7_500_000),
        ..JobDraft::default()
    };
    for (field, message) in draft.validate() {
        println!("  - {field}: {message}");
    }
    draft.description = "Own the reporting pipelines and the hiring analytics dashboards.".to_string();
    if draft.validate().is_empty() {
        let posting = service.create_job(draft)?;
        println!(
            "  Corrected draft stores as {} [{}]",
            posting.slug, posting.list_card.badge
        );
    }

    let listing = service.list_jobs(&JobQuery::default())?;
    println!("\nJob postings (newest first)");
    for posting in &listing {
        render_posting_card(posting);
    }

    let roster = service.list_candidates(&frontend.id, &CandidateQuery::default())?;
    println!("\nCandidates for {}", frontend.title);
    for candidate in &roster {
        render_candidate_row(candidate);
    }

    if skip_intake {
        return Ok(());
    }

    println!("\nCandidate intake walkthrough");
    let detail = service.get_job(&frontend.id)?;
    let (mut session, fetch) = ApplicationSession::new(FieldRegistry::new());
    session.schema_loaded(fetch, detail.application_form.clone());

    let controls = session.controls();
    println!("  Schema resolved into {} controls:", controls.len());
    for control in &controls {
        let marker = if control.is_required() {
            " (required)"
        } else {
            ""
        };
        println!("    - {} [{}]{}", control.label(), control.key(), marker);
    }

    if let Err(err) = fill_sample_answers(&mut session) {
        println!("  Intake halted: {err}");
        return Ok(());
    }

    let attachment = match photo {
        Some(path) => {
            let bytes = std::fs::read(&path)?;
            let content_type = mime_guess::from_path(&path).first_or_octet_stream();
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("photo")
                .to_string();
            PhotoAttachment::new(file_name, content_type, bytes)
        }
        None => PhotoAttachment::new(
            "headshot.png",
            mime_guess::mime::IMAGE_PNG,
            vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a],
        ),
    };
    if let Err(err) = session.attach_photo(attachment) {
        println!("  Intake halted: {err}");
        return Ok(());
    }

    let (token, payload) = match session.begin_submit() {
        Ok(pair) => pair,
        Err(SessionError::Invalid(report)) => {
            println!("  Submission blocked by {} field(s):", report.len());
            for (key, error) in report.errors() {
                println!("    - {key}: {error}");
            }
            return Ok(());
        }
        Err(err) => {
            println!("  Submission blocked: {err}");
            return Ok(());
        }
    };

    let document = payload.into_json();
    match serde_json::to_string_pretty(&redacted_preview(&document)) {
        Ok(json) => println!("  Assembled submission document:\n{}", json),
        Err(err) => println!("  Assembled submission document unavailable: {}", err),
    }

    let record = match service.submit_application(&frontend.id, document) {
        Ok(record) => record,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            session.submit_failed(token, err.to_string());
            return Ok(());
        }
    };
    session.submit_succeeded(token, record.id.0.clone());
    println!(
        "- Application {} accepted (session now {})",
        record.id.0,
        session.phase()
    );

    let roster = service.list_candidates(&frontend.id, &CandidateQuery::default())?;
    println!("\nCandidates for {} after intake", frontend.title);
    for candidate in &roster {
        render_candidate_row(candidate);
    }

    Ok(())
}

/// Fills the resolved form the way a browser session would, including one
/// typo the validator catches before it is corrected.
fn fill_sample_answers(session: &mut ApplicationSession) -> Result<(), SessionError> {
    session.set_value("email", "siti.rahma@")?;
    session.touch("email")?;
    if let Some(error) = session.validate_field("email") {
        println!("  Validation flags the unfinished email: {error}");
    }

    session.set_value("full_name", "Siti Rahma")?;
    session.set_value("email", "siti.rahma@example.com")?;
    session.set_value("gender", "Female")?;
    session.set_value("domicile", "Surabaya")?;
    session.set_value("phone_country_code", "+62")?;
    session.set_value("phone_number", "821 9876 5432")?;
    session.set_value("linkedin_link", "https://linkedin.com/in/sitirahma")?;
    session.set_value("date_of_birth", "1997-03-14")?;
    Ok(())
}

fn render_posting_card(posting: &JobView) {
    println!(
        "- {} | {} | {} [{}]",
        posting.title, posting.department, posting.salary_range.display_text, posting.list_card.badge
    );
    println!(
        "  {} application(s) | {} | {}",
        posting.count.applications, posting.slug, posting.list_card.started_on_text
    );
}

fn render_candidate_row(candidate: &CandidateView) {
    println!("- {}", candidate.id.0);
    for attribute in &candidate.attributes {
        println!(
            "    {}: {}",
            attribute.label,
            attribute_preview(&attribute.value)
        );
    }
}

/// Shortens long values (the photo data URI in particular) for terminal output.
fn attribute_preview(value: &str) -> String {
    const LIMIT: usize = 48;
    if value.chars().count() > LIMIT {
        let mut preview: String = value.chars().take(LIMIT).collect();
        preview.push_str("...");
        preview
    } else {
        value.to_string()
    }
}

fn redacted_preview(document: &serde_json::Map<String, Value>) -> Value {
    let mut preview = document.clone();
    for value in preview.values_mut() {
        if let Value::String(text) = value {
            let shortened = attribute_preview(text);
            if shortened.len() != text.len() {
                *value = Value::String(shortened);
            }
        }
    }
    Value::Object(preview)
}
