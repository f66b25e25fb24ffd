//! JSON rendering of the tree: `"Empty"` or `{"Node": [left, right]}`, pretty printed

use super::registry::{FormatError, Formatter};
use crate::tree::Tree;

pub fn to_json_str(tree: &Tree) -> Result<String, FormatError> {
    serde_json::to_string_pretty(tree).map_err(|e| FormatError::Render {
        format: "json",
        reason: e.to_string(),
    })
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, tree: &Tree) -> Result<String, FormatError> {
        to_json_str(tree)
    }

    fn summary(&self) -> &'static str {
        "Pretty printed JSON"
    }
}
