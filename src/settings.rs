//! Configuration loader
//!
//! `defaults/treenum.default.toml` is embedded into every binary so that docs and runtime
//! behavior stay in sync. [`Sources`] names what goes on top of them (a local file, an explicit
//! file, a fill mode from the command line) and deserializes the result into [`TreeConfig`].

use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::PathBuf;

use crate::tree::Tree;

const DEFAULT_TOML: &str = include_str!("../defaults/treenum.default.toml");

/// Top-level configuration consumed by treenum applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeConfig {
    pub output: OutputConfig,
    pub layout: LayoutConfig,
}

/// What `treenum convert` prints by default.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub formats: Vec<String>,
}

/// Drawing parameters for whatever renders a tree. None of them affects the tree's shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayoutConfig {
    pub stroke_width: f64,
    pub margin_width: f64,
    pub cell_size: f64,
    /// Extra vertical room per level, as a fraction of `cell_size`
    pub extra_height: f64,
    pub fill: FillMode,
}

/// Which nodes a renderer fills in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum FillMode {
    /// Every interior node
    #[default]
    #[serde(rename = "all")]
    All,
    /// Only nodes with at least one empty child
    #[serde(rename = "frontier")]
    Frontier,
    /// No node
    #[serde(rename = "none")]
    Off,
}

impl FillMode {
    /// Whether `tree` (as a node of a larger drawing) is filled. Empty trees never are.
    pub fn fills(self, tree: &Tree) -> bool {
        let Some((left, right)) = tree.children() else {
            return false;
        };
        match self {
            FillMode::All => true,
            FillMode::Frontier => left.is_empty() || right.is_empty(),
            FillMode::Off => false,
        }
    }
}

/// Where configuration is read from, weakest first. The embedded defaults sit underneath all of
/// them, so every key has a value even when nothing else is given.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    /// Layered when the file exists, skipped otherwise
    pub local: Option<PathBuf>,
    /// Must exist and parse
    pub explicit: Option<PathBuf>,
    /// Replaces `layout.fill` after all files are read
    pub fill: Option<String>,
}

impl Sources {
    pub fn load(&self) -> Result<TreeConfig, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        if let Some(path) = &self.local {
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }
        if let Some(path) = &self.explicit {
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
        }
        if let Some(fill) = &self.fill {
            builder = builder.set_override("layout.fill", fill.as_str())?;
        }
        builder.build()?.try_deserialize()
    }
}
