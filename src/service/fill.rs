use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classify::field_model::FieldMetadataCollection;
use crate::domain::resolver::can_autofill;
use crate::domain::validator::AssociationValidator;
use crate::parser::structure_parser::StructureParser;
use crate::service::cancel::CancellationSignal;
use crate::structure::structure_model::{AssistStructure, AutofillId};
use crate::trace::logger::ParseTraceLogger;
use crate::trace::trace::ParseTraceEvent;

pub const FLAG_MANUAL_REQUEST: u32 = 0x1;
pub const PLACEHOLDER_VALUE: &str = "PLACEHOLDER";
pub const SAVE_UNSUPPORTED_MESSAGE: &str = "Saving data is currently not implemented.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillContext {
    pub structure: AssistStructure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillRequest {
    #[serde(default)]
    pub flags: u32,
    pub contexts: Vec<FillContext>,
}

impl FillRequest {
    pub fn new(structure: AssistStructure, is_manual: bool) -> Self {
        Self {
            flags: if is_manual { FLAG_MANUAL_REQUEST } else { 0 },
            contexts: vec![FillContext { structure }],
        }
    }

    pub fn is_manual(&self) -> bool {
        self.flags & FLAG_MANUAL_REQUEST != 0
    }

    /// The most recent structure is the one to fill.
    pub fn structure(&self) -> Option<&AssistStructure> {
        self.contexts.last().map(|c| &c.structure)
    }
}

/// What the host should send back for a fill request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillOutcome {
    /// One dataset behind the authentication gate, every field set to
    /// [`PLACEHOLDER_VALUE`] so it can be filled right after the user picks
    /// a credential.
    AuthenticatedPlaceholder {
        query: String,
        is_manual: bool,
        ids: Vec<AutofillId>,
    },
    /// Hand the fields to the response builder unchanged.
    Direct {
        query: String,
        fields: FieldMetadataCollection,
    },
    Failure { message: String },
}

impl FillOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            FillOutcome::AuthenticatedPlaceholder { .. } => "authenticated_placeholder",
            FillOutcome::Direct { .. } => "direct",
            FillOutcome::Failure { .. } => "failure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SaveOutcome {
    Failure { message: String },
}

/// Handles fill requests for one credential provider package.
pub struct FillService<'a> {
    own_package: String,
    validator: &'a dyn AssociationValidator,
    tracer: ParseTraceLogger,
}

impl<'a> FillService<'a> {
    pub fn new(own_package: &str, validator: &'a dyn AssociationValidator) -> Self {
        Self {
            own_package: own_package.to_string(),
            validator,
            tracer: ParseTraceLogger::disabled(),
        }
    }

    pub fn with_tracer(mut self, tracer: ParseTraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn handle_fill_request(
        &self,
        request: &FillRequest,
        cancel: &CancellationSignal,
    ) -> FillOutcome {
        let is_manual = request.is_manual();
        debug!("onFillRequest {}", if is_manual { "manual" } else { "auto" });

        let Some(structure) = request.structure() else {
            warn!("fill request carries no structure");
            return FillOutcome::Failure {
                message: "Fill request carries no structure".to_string(),
            };
        };

        // Fingerprinting serializes the whole structure; skip it when nobody records it.
        let trace = self
            .tracer
            .is_enabled()
            .then(|| ParseTraceEvent::now(structure, is_manual));
        let parsed = StructureParser::new(structure, self.validator).parse_for_fill(is_manual);

        if cancel.is_cancelled() {
            warn!("fill request was cancelled during parsing; responding anyway");
        }

        let result = match parsed {
            Ok(result) => result,
            // No partial dataset: credential context cannot be trusted.
            Err(e) => {
                warn!("Security exception handling request: {}", e);
                if let Some(trace) = trace {
                    self.tracer.log(&trace.with_outcome("failure").with_error(&e));
                }
                return FillOutcome::Failure {
                    message: e.to_string(),
                };
            }
        };

        let ids = result.fields.autofill_ids();
        let query = result.session.to_string();
        let trace = trace.map(|t| {
            t.with_session(&query)
                .with_field_count(result.fields.len())
        });

        let outcome = if !ids.is_empty() && can_autofill(&query, &self.own_package) {
            FillOutcome::AuthenticatedPlaceholder {
                query,
                is_manual,
                ids,
            }
        } else {
            FillOutcome::Direct {
                query,
                fields: result.fields,
            }
        };

        if let Some(trace) = trace {
            self.tracer.log(&trace.with_outcome(outcome.kind()));
        }
        outcome
    }

    pub fn handle_save_request(&self) -> SaveOutcome {
        SaveOutcome::Failure {
            message: SAVE_UNSUPPORTED_MESSAGE.to_string(),
        }
    }
}
