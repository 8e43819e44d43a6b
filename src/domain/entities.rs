//! Domain entities: core data structures

use serde::{Deserialize, Serialize};

/// Closed set of content kinds a question can carry.
///
/// The wire tags are fixed by the sheet format and are case-sensitive:
/// `Table`, `number`, `Text`, `enum`, and the empty string. `Table` and
/// the empty tag denote grouping ("section") nodes with no direct input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Table,
    Number,
    Text,
    Enum,
    Empty,
}

impl ContentKind {
    /// Parse a raw cell value into a content kind. Unknown tags yield `None`;
    /// whether that is an error is the validator's call, not the parser's.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Table" => Some(ContentKind::Table),
            "number" => Some(ContentKind::Number),
            "Text" => Some(ContentKind::Text),
            "enum" => Some(ContentKind::Enum),
            "" => Some(ContentKind::Empty),
            _ => None,
        }
    }

    /// The exact wire tag for this kind.
    pub fn as_tag(&self) -> &'static str {
        match self {
            ContentKind::Table => "Table",
            ContentKind::Number => "number",
            ContentKind::Text => "Text",
            ContentKind::Enum => "enum",
            ContentKind::Empty => "",
        }
    }

    /// Grouping nodes carry no direct input.
    pub fn is_section(&self) -> bool {
        matches!(self, ContentKind::Table | ContentKind::Empty)
    }
}

/// One flat, unvalidated row-derived description of a question.
///
/// `content` keeps the raw tag as read from the sheet so that set membership
/// stays a validation concern; [`QuestionRecord::content_kind`] gives the
/// typed view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: String,
    /// Primary-language label (`question label en` column)
    pub label_primary: String,
    /// Secondary-language label (`question label fr` column)
    pub label_secondary: String,
    /// Raw content tag, one of [`ContentKind`]'s wire tags once validated
    pub content: String,
    /// Sibling ordering only, never global sequencing
    pub order: i32,
    /// Empty/missing cell means root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Meaningful for `number` kind only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_options_primary: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_options_secondary: Option<Vec<String>>,
}

impl QuestionRecord {
    /// Typed view of the raw content tag, `None` for tags outside the closed set.
    pub fn content_kind(&self) -> Option<ContentKind> {
        ContentKind::from_tag(&self.content)
    }

    /// Primary label, falling back to the secondary one when empty.
    pub fn display_label(&self) -> &str {
        if self.label_primary.is_empty() {
            &self.label_secondary
        } else {
            &self.label_primary
        }
    }
}

/// A record augmented with an ordered list of child nodes.
///
/// `children` is always present, possibly empty; absence of input capability
/// is encoded by the content kind, never by childlessness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionNode {
    #[serde(flatten)]
    pub record: QuestionRecord,
    pub children: Vec<QuestionNode>,
}

impl QuestionNode {
    /// Number of nodes in this subtree, including the node itself.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(QuestionNode::subtree_len)
            .sum::<usize>()
    }
}
