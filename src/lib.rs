//! questree: questionnaire ingestion pipeline.
//!
//! Parses flat, semicolon-delimited question sheets, validates the record
//! set (batch, never fail-fast), and builds an ordered forest of question
//! nodes. The pipeline is synchronous and stateless: parse → validate →
//! build, fresh on every load.

pub mod application;
pub mod cli;
pub mod domain;
pub mod exitcode;

pub use application::{Dataset, DatasetSession};
pub use domain::{
    validate, ContentKind, QuestionForest, QuestionNode, QuestionParser, QuestionRecord,
    TreeBuilder, ValidationReport,
};
