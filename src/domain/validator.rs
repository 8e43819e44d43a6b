//! Batch validation of flat question records.
//!
//! A batch accumulator, never fail-fast: every detected problem lands in the
//! report, so callers can always surface the complete list instead of the
//! first hit.

use std::collections::HashSet;

use itertools::Itertools;
use serde::Serialize;
use tracing::instrument;

use crate::domain::entities::{ContentKind, QuestionRecord};

/// Verdict plus the complete, ordered list of human-readable problems.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Check a flat record set for integrity violations before any tree is built.
///
/// Checks per record are independent, so one record can contribute several
/// error lines. Never mutates its input and never errors on content; the
/// `order` validity check of the sheet format is statically guaranteed by the
/// typed field (coercion happens at parse time).
#[instrument(level = "debug", skip_all, fields(records = records.len()))]
pub fn validate(records: &[QuestionRecord]) -> ValidationReport {
    let mut errors = Vec::new();

    if records.is_empty() {
        errors.push("No questions found".to_string());
        return ValidationReport {
            valid: false,
            errors,
        };
    }

    // One aggregated error naming each distinct duplicated id.
    let duplicates: Vec<&str> = records.iter().map(|r| r.id.as_str()).duplicates().collect();
    if !duplicates.is_empty() {
        errors.push(format!(
            "Duplicate IDs found: {}",
            duplicates.iter().join(", ")
        ));
    }

    let known_ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();

    for (index, record) in records.iter().enumerate() {
        if record.id.trim().is_empty() {
            errors.push(format!("Question at index {index}: ID is required"));
        }

        if record.label_primary.is_empty() && record.label_secondary.is_empty() {
            errors.push(format!(
                "Question {}: At least one label (en/fr) is required",
                record.id
            ));
        }

        if let Some(parent_id) = &record.parent_id {
            if !known_ids.contains(parent_id.as_str()) {
                errors.push(format!(
                    "Question {}: Parent \"{}\" does not exist",
                    record.id, parent_id
                ));
            }
        }

        match record.content_kind() {
            None => errors.push(format!(
                "Question {}: Invalid content type \"{}\"",
                record.id, record.content
            )),
            Some(ContentKind::Enum) => {
                if !has_options(&record.enum_options_primary)
                    && !has_options(&record.enum_options_secondary)
                {
                    errors.push(format!("Question {}: Enum type requires options", record.id));
                }
            }
            Some(_) => {}
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

// Absent and empty option lists are equivalent for the "has options" check.
fn has_options(options: &Option<Vec<String>>) -> bool {
    options.as_ref().is_some_and(|o| !o.is_empty())
}
