use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::data::loader::load_dir;
use crate::render::{render, write_output};
use crate::report::Report;

// ---------------------------------------------------------------------------
// One run: load → colour → render → write
// ---------------------------------------------------------------------------

/// Run with a resolved configuration and return the path that was written.
pub fn run(config: &Config) -> Result<PathBuf> {
    log::debug!("Running with {config:?}");

    let collection = load_dir(&config.data_dir, &config.load_options())
        .with_context(|| format!("loading datasets from '{}'", config.data_dir.display()))?;

    let report = Report::new(config.title.clone(), collection, config.palette, config.case);
    log::info!(
        "Assigned {} colours using {:?}",
        report.color_map.len(),
        report.color_map.strategy()
    );

    let contents = render(&report, config.format).context("rendering output")?;

    let output = config.output_path();
    write_output(&output, &contents)
        .with_context(|| format!("writing {:?} output", config.format))?;

    log::info!("Wrote {} bytes to {}", contents.len(), output.display());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tempfile::TempDir;

    use crate::error::TallyError;
    use crate::render::OutputFormat;

    fn config_in(dir: &TempDir, format: OutputFormat) -> Config {
        Config {
            data_dir: dir.path().join("data"),
            output: Some(dir.path().join("out").join(match format {
                OutputFormat::Html => "charts.html",
                OutputFormat::Js => "data.js",
            })),
            format,
            ..Config::default()
        }
    }

    fn write_data(dir: &TempDir) {
        let data = dir.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("alice.txt"), "Hornet: 3\nMoss Mother: 1\n").unwrap();
        fs::write(data.join("bob.txt"), "hornet: 5\n").unwrap();
    }

    #[test]
    fn writes_html_page() {
        let dir = TempDir::new().unwrap();
        write_data(&dir);
        let config = config_in(&dir, OutputFormat::Html);

        let written = run(&config).unwrap();
        assert_eq!(written, config.output_path());
        let page = fs::read_to_string(&written).unwrap();
        assert!(page.contains("<h3>alice</h3>"));
        assert!(page.contains("<h3>bob</h3>"));
    }

    #[test]
    fn writes_js_data_file() {
        let dir = TempDir::new().unwrap();
        write_data(&dir);
        let config = config_in(&dir, OutputFormat::Js);

        let written = run(&config).unwrap();
        let js = fs::read_to_string(written).unwrap();
        assert!(js.starts_with("const datasetsJS = {"));
        assert!(js.contains("const colorMapJS = {"));
        assert!(js.contains("\"moss mother\""));
    }

    #[test]
    fn missing_data_dir_is_reported() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, OutputFormat::Html);

        let err = run(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TallyError>(),
            Some(TallyError::DataDirMissing(_))
        ));
        assert!(!config.output_path().exists());
    }
}
