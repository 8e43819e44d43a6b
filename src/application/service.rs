//! Dataset service: the load pipeline and the currently served tree.
//!
//! Each load runs the full pipeline (parse, validate, build) start-to-finish
//! and either yields a complete dataset or fails entirely; there is no
//! partial result. The "current dataset" is an explicitly owned, swappable
//! value, not a hidden singleton, and a failed load leaves the previous
//! dataset untouched.

use std::path::Path;

use tracing::{debug, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::{validate, DomainError, QuestionNode, QuestionParser, QuestionRecord, TreeBuilder};

/// Upload size cap for in-memory payloads.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// One loaded questionnaire: the flat records and the derived tree.
///
/// Immutable after construction; rebuilt from source text on every load.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<QuestionRecord>,
    tree: Vec<QuestionNode>,
}

impl Dataset {
    /// Load a named dataset from disk.
    #[instrument(level = "debug", skip(parser))]
    pub fn load_path(parser: &QuestionParser, path: &Path) -> ApplicationResult<Self> {
        let records = parser.parse_path(path)?;
        Self::from_records(records)
    }

    /// Load an uploaded payload. The payload is size-capped and restricted to
    /// `.csv` names before any parsing happens.
    #[instrument(level = "debug", skip(parser, bytes), fields(size = bytes.len()))]
    pub fn load_bytes(parser: &QuestionParser, name: &str, bytes: &[u8]) -> ApplicationResult<Self> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ApplicationError::PayloadTooLarge {
                size: bytes.len(),
                limit: MAX_UPLOAD_BYTES,
            });
        }
        if !name.to_ascii_lowercase().ends_with(".csv") {
            return Err(ApplicationError::UnsupportedUpload(name.to_string()));
        }
        let records = parser.parse_bytes(bytes)?;
        Self::from_records(records)
    }

    /// Run validation and tree construction. The builder is never invoked on
    /// unvalidated data in this path; the failure carries the complete error
    /// list, never just the first.
    pub fn from_records(records: Vec<QuestionRecord>) -> ApplicationResult<Self> {
        let report = validate(&records);
        if !report.valid {
            return Err(DomainError::ValidationFailed {
                errors: report.errors,
            }
            .into());
        }

        let forest = TreeBuilder::new().build(&records);
        let tree = forest.to_nodes();
        debug!(questions = records.len(), roots = tree.len(), "dataset loaded");

        Ok(Self { records, tree })
    }

    /// Flat records in original sheet order.
    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    /// The ordered question forest.
    pub fn tree(&self) -> &[QuestionNode] {
        &self.tree
    }

    pub fn find(&self, id: &str) -> Option<&QuestionRecord> {
        self.records.iter().find(|record| record.id == id)
    }
}

/// Explicitly owned slot for the currently served dataset.
///
/// The caller guarantees at most one in-flight load replaces the slot at a
/// time; `replace` swaps a fully built dataset in one move, so readers never
/// observe a partially built tree.
#[derive(Debug, Default)]
pub struct DatasetSession {
    current: Option<Dataset>,
}

impl DatasetSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new dataset, returning the displaced one.
    pub fn replace(&mut self, dataset: Dataset) -> Option<Dataset> {
        self.current.replace(dataset)
    }

    pub fn current(&self) -> Option<&Dataset> {
        self.current.as_ref()
    }

    /// The served tree; empty before the first successful load.
    pub fn tree(&self) -> &[QuestionNode] {
        self.current.as_ref().map(Dataset::tree).unwrap_or(&[])
    }
}
