//! Delimited-text parser for question sheets.
//!
//! Turns raw text or bytes into flat [`QuestionRecord`]s in original row
//! order. Columns are addressed by header name, not position; the row
//! delimiter (`;` by default) must stay distinct from `,`, which is the
//! sub-delimiter inside enum option cells. No structural validation happens
//! here beyond type coercion.

use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use crate::domain::entities::QuestionRecord;
use crate::domain::error::{DomainError, DomainResult};

/// Row delimiter of the sheet format.
pub const DEFAULT_DELIMITER: char = ';';

const COL_ID: &str = "ID";
const COL_LABEL_PRIMARY: &str = "question label en";
const COL_LABEL_SECONDARY: &str = "question label fr";
const COL_CONTENT: &str = "content";
const COL_PARENT: &str = "relatedQuestion ID";
const COL_ORDER: &str = "order";
const COL_UNIT: &str = "unit";
const COL_ENUM_PRIMARY: &str = "enum en";
const COL_ENUM_SECONDARY: &str = "enum fr";

/// Parses question sheets into flat records.
#[derive(Debug, Clone)]
pub struct QuestionParser {
    delimiter: char,
}

impl Default for QuestionParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Column positions resolved from the header row. A missing column reads as
/// the field's default, matching sheets written before a column existed.
struct Columns {
    id: Option<usize>,
    label_primary: Option<usize>,
    label_secondary: Option<usize>,
    content: Option<usize>,
    parent: Option<usize>,
    order: Option<usize>,
    unit: Option<usize>,
    enum_primary: Option<usize>,
    enum_secondary: Option<usize>,
}

impl Columns {
    fn resolve(header: &[&str]) -> Self {
        let pos = |name: &str| header.iter().position(|h| *h == name);
        Self {
            id: pos(COL_ID),
            label_primary: pos(COL_LABEL_PRIMARY),
            label_secondary: pos(COL_LABEL_SECONDARY),
            content: pos(COL_CONTENT),
            parent: pos(COL_PARENT),
            order: pos(COL_ORDER),
            unit: pos(COL_UNIT),
            enum_primary: pos(COL_ENUM_PRIMARY),
            enum_secondary: pos(COL_ENUM_SECONDARY),
        }
    }
}

impl QuestionParser {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Parse a sheet from disk.
    ///
    /// Fails with [`DomainError::SourceUnavailable`] when the file does not
    /// exist or cannot be read.
    #[instrument(level = "debug", skip(self))]
    pub fn parse_path(&self, path: &Path) -> DomainResult<Vec<QuestionRecord>> {
        if !path.exists() {
            return Err(DomainError::SourceUnavailable(path.to_path_buf()));
        }
        let bytes =
            fs::read(path).map_err(|_| DomainError::SourceUnavailable(path.to_path_buf()))?;
        self.parse_bytes(&bytes)
    }

    /// Parse a sheet from an in-memory byte buffer (e.g., an upload).
    ///
    /// Fails with [`DomainError::MalformedInput`] when the bytes cannot be
    /// decoded as UTF-8.
    pub fn parse_bytes(&self, bytes: &[u8]) -> DomainResult<Vec<QuestionRecord>> {
        let text = std::str::from_utf8(bytes).map_err(|e| DomainError::MalformedInput {
            reason: format!("invalid UTF-8 at byte {}", e.valid_up_to()),
        })?;
        Ok(self.parse_str(text))
    }

    /// Parse a sheet from text. Infallible on content: ragged rows are
    /// tolerated, empty lines skipped, and an absent header row simply yields
    /// zero records (the validator reports the empty set).
    #[instrument(level = "debug", skip_all)]
    pub fn parse_str(&self, text: &str) -> Vec<QuestionRecord> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = text.lines().filter(|line| !line.trim().is_empty());

        let Some(header_line) = lines.next() else {
            return Vec::new();
        };
        let header: Vec<&str> = header_line.split(self.delimiter).map(str::trim).collect();
        let columns = Columns::resolve(&header);

        let mut records = Vec::new();
        for line in lines {
            let cells: Vec<&str> = line.split(self.delimiter).map(str::trim).collect();
            // Ragged rows are fine: cells past the end read as empty.
            let cell =
                |column: Option<usize>| column.and_then(|i| cells.get(i)).copied().unwrap_or("");

            records.push(QuestionRecord {
                id: cell(columns.id).to_string(),
                label_primary: cell(columns.label_primary).to_string(),
                label_secondary: cell(columns.label_secondary).to_string(),
                content: cell(columns.content).to_string(),
                order: parse_order(cell(columns.order)),
                parent_id: non_empty(cell(columns.parent)),
                unit: non_empty(cell(columns.unit)),
                enum_options_primary: split_options(cell(columns.enum_primary)),
                enum_options_secondary: split_options(cell(columns.enum_secondary)),
            });
        }

        debug!(records = records.len(), "parsed question sheet");
        records
    }
}

/// Coerce an order cell to an integer. Non-numeric or missing cells fall back
/// to 0 rather than surfacing an error; the fallback is part of the sheet
/// contract and pinned by tests.
fn parse_order(cell: &str) -> i32 {
    cell.trim().parse().unwrap_or(0)
}

fn non_empty(cell: &str) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

/// Split an enum option cell on `,`, trimming pieces and dropping empties.
/// An empty cell is `None`, never `Some(vec![])`.
fn split_options(cell: &str) -> Option<Vec<String>> {
    if cell.is_empty() {
        return None;
    }
    let options: Vec<String> = cell
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect();
    if options.is_empty() {
        None
    } else {
        Some(options)
    }
}
