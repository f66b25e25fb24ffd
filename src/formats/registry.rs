//! Name lookup for the output formats
//!
//! `treenum convert --format <name>` resolves names here. The registry is built once with every
//! format this crate ships, ordered by name, and remembers which of them read back through
//! [`crate::parse`]: prefix, bracket and decimal do, treeviz and json are for people.

use crate::settings::FillMode;
use crate::tree::Tree;
use std::collections::BTreeMap;
use std::fmt;

use super::{BracketFormatter, DecimalFormatter, JsonFormatter, PrefixFormatter, TreevizFormatter};

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No format answers to this name
    UnknownFormat(String),
    /// A format could not render the tree
    Render {
        format: &'static str,
        reason: String,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownFormat(name) => {
                write!(f, "unknown format '{name}' (see treenum list-formats)")
            }
            FormatError::Render { format, reason } => {
                write!(f, "cannot render {format}: {reason}")
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// One way of writing a tree out as text
pub trait Formatter: Send + Sync {
    /// Name used on the command line and in `output.formats`
    fn name(&self) -> &'static str;

    fn render(&self, tree: &Tree) -> Result<String, FormatError>;

    /// One line shown by `treenum list-formats`
    fn summary(&self) -> &'static str;

    /// Whether parsing the rendered text always gives the same tree back
    fn round_trips(&self) -> bool {
        false
    }
}

pub struct FormatRegistry {
    formats: BTreeMap<&'static str, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// All built-in formats, with treeviz marking nodes according to `fill`
    pub fn new(fill: FillMode) -> Self {
        let builtin: [Box<dyn Formatter>; 5] = [
            Box::new(PrefixFormatter),
            Box::new(BracketFormatter),
            Box::new(DecimalFormatter),
            Box::new(TreevizFormatter::new(fill)),
            Box::new(JsonFormatter),
        ];
        let formats = builtin
            .into_iter()
            .map(|format| (format.name(), format))
            .collect();
        FormatRegistry { formats }
    }

    pub fn get(&self, name: &str) -> Result<&dyn Formatter, FormatError> {
        self.formats
            .get(name)
            .map(|format| &**format)
            .ok_or_else(|| FormatError::UnknownFormat(name.to_string()))
    }

    pub fn render(&self, tree: &Tree, name: &str) -> Result<String, FormatError> {
        self.get(name)?.render(tree)
    }

    /// Formats in name order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Formatter> + '_ {
        self.formats.values().map(|format| &**format)
    }

    /// Names of the formats the grammar reads back
    pub fn round_trip_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter()
            .filter(|format| format.round_trips())
            .map(|format| format.name())
    }
}
