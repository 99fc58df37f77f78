use autofill_parser::{
    classify::field_model::FieldRole::{Hinted, Password, Username},
    domain::validator::{AllowAll, AssociationValidator, StaticAssociations, ValidationError},
    parse_for_fill,
    parser::{error::ParseError, structure_parser::StructureParser},
    structure::structure_model::AssistStructure,
};

use crate::common::builders::{PACKAGE, edit_text, layout, password_edit_text, roles, structure_of};

mod common;

struct FailingValidator;

impl AssociationValidator for FailingValidator {
    fn is_valid(&self, web_domain: &str, _package_name: &str) -> Result<bool, ValidationError> {
        Err(ValidationError::Status {
            domain: web_domain.to_string(),
            status: 503,
        })
    }
}

fn web_structure(domain: &str) -> AssistStructure {
    AssistStructure::new(PACKAGE).with_window(
        layout(1)
            .with_web_domain(domain)
            .with_child(edit_text(2))
            .with_child(password_edit_text(3)),
    )
}

// =========================================================================
// Classification flow
// =========================================================================

#[test]
fn username_then_password_scenario() {
    let structure = structure_of(vec![edit_text(1), password_edit_text(2)]);
    let result = parse_for_fill(&structure, false, &AllowAll).unwrap();
    assert_eq!(roles(&result.fields), vec![(2, Password), (1, Username)]);
}

#[test]
fn lone_plain_field_on_auto_request_yields_nothing() {
    let structure = structure_of(vec![edit_text(1)]);
    let result = parse_for_fill(&structure, false, &AllowAll).unwrap();
    assert!(result.fields.is_empty());
}

#[test]
fn explicit_hints_suppress_heuristics() {
    let structure = structure_of(vec![
        edit_text(1).with_autofill_hints(&["username"]),
        edit_text(2),
        password_edit_text(3),
        edit_text(4).with_autofill_hints(&["password"]),
    ]);
    let result = parse_for_fill(&structure, false, &AllowAll).unwrap();
    assert_eq!(roles(&result.fields), vec![(1, Hinted), (4, Hinted)]);
}

#[test]
fn manual_request_adds_focused_field_next_to_hinted_ones() {
    let structure = structure_of(vec![
        edit_text(1).with_autofill_hints(&["username"]),
        password_edit_text(2).focused(),
    ]);

    let auto = parse_for_fill(&structure, false, &AllowAll).unwrap();
    assert_eq!(roles(&auto.fields), vec![(1, Hinted)]);

    let manual = parse_for_fill(&structure, true, &AllowAll).unwrap();
    assert_eq!(roles(&manual.fields), vec![(1, Hinted), (2, Password)]);
}

#[test]
fn manual_request_fills_focused_off_field() {
    let structure = structure_of(vec![edit_text(1).with_autofill_hints(&["off"]).focused()]);
    let result = parse_for_fill(&structure, true, &AllowAll).unwrap();
    // Lone-field fallback plus the focus override both report it.
    assert_eq!(roles(&result.fields), vec![(1, Username), (1, Username)]);
    assert_eq!(result.fields.autofill_ids().len(), 1);
}

#[test]
fn only_first_focused_field_is_added() {
    let structure = structure_of(vec![
        edit_text(1).with_autofill_hints(&["username"]),
        edit_text(2).focused(),
        edit_text(3).focused(),
    ]);
    let result = parse_for_fill(&structure, true, &AllowAll).unwrap();
    assert_eq!(roles(&result.fields), vec![(1, Hinted), (2, Username)]);
}

#[test]
fn parsing_is_idempotent() {
    let structure = web_structure("example.com");
    let parser = StructureParser::new(&structure, &AllowAll);
    let first = parser.parse_for_fill(true).unwrap();
    let second = parser.parse_for_fill(true).unwrap();
    assert_eq!(first, second);
}

// =========================================================================
// Session identifier
// =========================================================================

#[test]
fn missing_domain_falls_back_to_package() {
    let structure = structure_of(vec![edit_text(1), password_edit_text(2)]);
    let result = parse_for_fill(&structure, false, &AllowAll).unwrap();
    assert_eq!(result.session.as_str(), "app:com.example.shop");
    assert!(result.session.is_package_fallback());
}

#[test]
fn validated_domain_becomes_session_identifier() {
    let validator = StaticAssociations::default().with("example.com", PACKAGE);
    let result = parse_for_fill(&web_structure("example.com"), false, &validator).unwrap();
    assert_eq!(result.session.as_str(), "example.com");
    assert_eq!(roles(&result.fields), vec![(3, Password), (2, Username)]);
}

#[test]
fn rejected_domain_is_downgraded_to_package() {
    let validator = StaticAssociations::default().with("example.com", "com.someone.else");
    let result = parse_for_fill(&web_structure("example.com"), false, &validator).unwrap();
    assert_eq!(result.session.as_str(), "app:com.example.shop");
    assert_eq!(result.fields.len(), 2, "fields survive a rejected domain");
}

#[test]
fn validator_failure_is_not_fatal() {
    let result = parse_for_fill(&web_structure("example.com"), false, &FailingValidator).unwrap();
    assert_eq!(result.session.as_str(), "app:com.example.shop");
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn domain_conflict_aborts_the_parse() {
    let structure = AssistStructure::new(PACKAGE)
        .with_window(layout(1).with_web_domain("example.com").with_child(edit_text(2)))
        .with_window(layout(3).with_web_domain("example.com").with_child(password_edit_text(4)));

    let err = parse_for_fill(&structure, false, &AllowAll).unwrap_err();
    assert!(matches!(err, ParseError::DomainConflict { .. }));
}

#[test]
fn save_path_is_unsupported() {
    let structure = structure_of(vec![edit_text(1).with_autofill_hints(&["username"])]);
    let parser = StructureParser::new(&structure, &AllowAll);
    assert_eq!(parser.parse_for_save(), Err(ParseError::UnsupportedPath));
}
