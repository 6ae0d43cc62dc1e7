/// Output layer: turn a [`Report`] into text for the browser.
///
/// * [`html`]   – standalone page with one Chart.js chart per dataset and per label
/// * [`script`] – `js/data.js` style file for a hand-written page
pub mod html;
pub mod script;
mod template;

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};
use crate::report::Report;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Html,
    Js,
}

impl OutputFormat {
    /// Where output goes when no path is given.
    pub fn default_output(self) -> PathBuf {
        match self {
            OutputFormat::Html => PathBuf::from("charts.html"),
            OutputFormat::Js => Path::new("js").join("data.js"),
        }
    }
}

/// Render `report` in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => html::render_page(report),
        OutputFormat::Js => script::render_data_script(report),
    }
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source| TallyError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }
    fs::write(path, contents).map_err(write_err)
}

/// Escape text for HTML element content and attribute values.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON that is safe to place inside a `<script>` element.
fn script_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json.replace("</", "<\\/"))
}
