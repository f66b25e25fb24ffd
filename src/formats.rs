//! Output formats for trees
//!
//! Every notation the grammar reads has a serializer here (prefix, bracket, decimal), and
//! `parse(serialize(tree)) == tree` holds for each of them. Two more formats are for people
//! rather than for the parser: treeviz (one line per node) and json.

pub mod bracket;
pub mod decimal;
pub mod json;
pub mod prefix;
pub mod registry;
pub mod treeviz;

pub use bracket::{to_bracket_str, BracketFormatter};
pub use decimal::{to_decimal_str, DecimalFormatter};
pub use json::{to_json_str, JsonFormatter};
pub use prefix::{to_prefix_str, PrefixFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
