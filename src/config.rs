use std::path::PathBuf;

use serde::Deserialize;

use crate::color::ColorStrategy;
use crate::data::loader::LoadOptions;
use crate::data::model::{CaseFolding, MergePolicy};
use crate::render::OutputFormat;

pub const DEFAULT_TITLE: &str = "Tally Charts";

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one `*.txt` tally file per dataset.
    pub data_dir: PathBuf,
    /// Output file; `None` means the format's default.
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub palette: ColorStrategy,
    pub merge: MergePolicy,
    pub case: CaseFolding,
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output: None,
            format: OutputFormat::default(),
            palette: ColorStrategy::default(),
            merge: MergePolicy::default(),
            case: CaseFolding::default(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl Config {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.format.default_output())
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            merge: self.merge,
            case: self.case,
        }
    }
}
