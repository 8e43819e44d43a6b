//! Domain layer: records, validation, and tree construction
//!
//! This layer is independent of external concerns (no CLI, no terminal
//! output; the parser's only side effect is reading the input it is given).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod parser;
pub mod validator;

pub use arena::{ForestNode, QuestionForest};
pub use builder::TreeBuilder;
pub use entities::{ContentKind, QuestionNode, QuestionRecord};
pub use error::{DomainError, DomainResult};
pub use parser::{QuestionParser, DEFAULT_DELIMITER};
pub use validator::{validate, ValidationReport};
