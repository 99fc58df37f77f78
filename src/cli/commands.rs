use std::path::Path;

use crate::cli::config::{AppConfig, ValidatorKind, build_validator};
use crate::domain::resolver::can_autofill;
use crate::service::cancel::CancellationSignal;
use crate::service::fill::{FillOutcome, FillRequest, FillService, SaveOutcome};
use crate::structure::structure_model::AssistStructure;
use crate::trace::logger::ParseTraceLogger;

/// Read a structure snapshot. YAML for `.yaml`/`.yml`, JSON otherwise.
pub fn load_structure(path: &str) -> Result<AssistStructure, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read structure {}: {}", path, e))?;

    let is_yaml = matches!(
        Path::new(path).extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    let structure = if is_yaml {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(structure)
}

// ============================================================================
// fill subcommand
// ============================================================================

/// Build a fill request from a structure file, optionally replacing the
/// requesting package.
pub fn load_fill_request(
    structure_path: &str,
    manual: bool,
    package: Option<&str>,
) -> Result<FillRequest, Box<dyn std::error::Error>> {
    let mut structure = load_structure(structure_path)?;
    if let Some(package) = package {
        structure.package_name = package.to_string();
    }
    Ok(FillRequest::new(structure, manual))
}

/// Run a fill request and print its outcome. Returns whether it succeeded.
pub fn cmd_fill(
    structure_path: &str,
    manual: bool,
    package: Option<&str>,
    validator_name: Option<&str>,
    format: &str,
    own_package: &str,
    config: &AppConfig,
) -> Result<bool, Box<dyn std::error::Error>> {
    let kind = match validator_name {
        Some(name) => ValidatorKind::parse(name)
            .ok_or_else(|| format!("unknown validator '{}'", name))?,
        None => config.validator,
    };
    let validator = build_validator(kind, config);

    let tracer = match &config.trace_path {
        Some(path) => ParseTraceLogger::open(path),
        None => ParseTraceLogger::disabled(),
    };

    let request = load_fill_request(structure_path, manual, package)?;
    let service = FillService::new(own_package, validator.as_ref()).with_tracer(tracer);
    let outcome = service.handle_fill_request(&request, &CancellationSignal::new());

    match format {
        "text" => print!("{}", format_outcome_text(&outcome)),
        _ => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    Ok(!matches!(outcome, FillOutcome::Failure { .. }))
}

pub fn format_outcome_text(outcome: &FillOutcome) -> String {
    let mut out = String::new();
    match outcome {
        FillOutcome::AuthenticatedPlaceholder { query, is_manual, ids } => {
            out.push_str(&format!("query: {}\n", query));
            out.push_str(&format!(
                "response: authenticated placeholder ({})\n",
                if *is_manual { "manual" } else { "auto" }
            ));
            for id in ids {
                out.push_str(&format!("  {}\n", id));
            }
        }
        FillOutcome::Direct { query, fields } => {
            out.push_str(&format!("query: {}\n", query));
            out.push_str("response: direct\n");
            for field in fields {
                out.push_str(&format!(
                    "  {} {:?} [{}]\n",
                    field.id,
                    field.role,
                    field.hints.join(", ")
                ));
            }
        }
        FillOutcome::Failure { message } => {
            out.push_str(&format!("failure: {}\n", message));
        }
    }
    out
}

// ============================================================================
// save subcommand
// ============================================================================

pub fn cmd_save(structure_path: &str, own_package: &str) -> Result<bool, Box<dyn std::error::Error>> {
    load_structure(structure_path)?;

    let validator = crate::domain::validator::AllowAll;
    let SaveOutcome::Failure { message } = FillService::new(own_package, &validator).handle_save_request();
    eprintln!("{}", message);
    Ok(false)
}

// ============================================================================
// check subcommand
// ============================================================================

pub fn cmd_check(identifier: &str, own_package: &str) -> bool {
    let allowed = can_autofill(identifier, own_package);
    println!(
        "{}: {}",
        identifier,
        if allowed { "autofill allowed" } else { "autofill suppressed" }
    );
    allowed
}
