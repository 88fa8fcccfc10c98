use clap::Args;
use hireflow::error::AppError;
use hireflow::forms::{render_controls, ApplicationForm, FieldOrigin, FieldRegistry, ResolvedForm};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct PreviewArgs {
    /// Schema document to resolve (JSON). Omit to preview the built-in fallback form.
    #[arg(long)]
    pub(crate) schema: Option<PathBuf>,
}

/// Resolves a schema document the same way the portal does for a posting and
/// prints the resulting field list plus the rendered controls.
pub(crate) fn run_form_preview(args: PreviewArgs) -> Result<(), AppError> {
    let PreviewArgs { schema } = args;

    let registry = FieldRegistry::new();
    let document = match schema {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            let value: serde_json::Value = serde_json::from_str(&raw)?;
            let parsed = ApplicationForm::from_value(&value);
            if parsed.is_none() {
                println!("Document carries no usable field list; showing the default form instead");
            }
            parsed
        }
        None => None,
    };

    let resolved = ResolvedForm::resolve(&registry, document.as_ref());
    match resolved.origin() {
        FieldOrigin::Schema => println!("Resolved {} schema field(s)", resolved.len()),
        FieldOrigin::Fallback => println!(
            "Using the built-in fallback form ({} field(s))",
            resolved.len()
        ),
    }
    for field in resolved.fields() {
        let marker = if field.required { " (required)" } else { "" };
        println!("- {} [{}]{}", field.label, field.key, marker);
    }

    let controls = render_controls(&registry, &resolved);
    match serde_json::to_string_pretty(&controls) {
        Ok(json) => println!("\nRendered controls:\n{}", json),
        Err(err) => println!("\nRendered controls unavailable: {}", err),
    }

    Ok(())
}
