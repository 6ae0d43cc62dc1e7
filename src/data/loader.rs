use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::model::{CaseFolding, Dataset, DatasetCollection, MergePolicy};
use crate::error::{Result, TallyError};

/// Per-run parsing choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub merge: MergePolicy,
    pub case: CaseFolding,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load every `*.txt` file directly inside `dir`, one dataset per file.
///
/// Files are read in sorted path order and named after their stem
/// (`data/alice.txt` → `alice`).
pub fn load_dir(dir: &Path, opts: &LoadOptions) -> Result<DatasetCollection> {
    let files = discover_files(dir)?;
    if files.is_empty() {
        return Err(TallyError::NoDatasets(dir.to_path_buf()));
    }

    let datasets = files
        .iter()
        .map(|path| load_file(path, opts))
        .collect::<Result<Vec<_>>>()?;

    let collection = DatasetCollection::from_datasets(datasets);
    log::info!(
        "Loaded {} datasets with {} distinct labels from {}",
        collection.len(),
        collection.labels().len(),
        dir.display()
    );
    Ok(collection)
}

/// Load a single tally file.
pub fn load_file(path: &Path, opts: &LoadOptions) -> Result<Dataset> {
    let text = fs::read_to_string(path).map_err(|source| TallyError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let dataset = parse_counts(&name, &text, opts);
    log::debug!("{}: {} labels", path.display(), dataset.len());
    Ok(dataset)
}

/// Sorted `*.txt` files (extension case-insensitive) directly inside `dir`.
pub fn discover_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(dir).map_err(|source| match source.kind() {
        ErrorKind::NotFound => TallyError::DataDirMissing(dir.to_path_buf()),
        _ => TallyError::FileRead {
            path: dir.to_path_buf(),
            source,
        },
    })?;
    if !metadata.is_dir() {
        return Err(TallyError::NotADirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| TallyError::FileRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| TallyError::FileRead {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        if !is_tally_file(&path) {
            continue;
        }
        // follows symlinks; a dangling one is an error, not a skip
        let metadata = fs::metadata(&path).map_err(|source| TallyError::FileRead {
            path: path.clone(),
            source,
        })?;
        if metadata.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

/// Parse the body of a tally file.
///
/// Malformed lines are skipped; see [`parse_line`].
pub fn parse_counts(name: &str, text: &str, opts: &LoadOptions) -> Dataset {
    let mut dataset = Dataset::new(name);
    for (line_no, line) in text.lines().enumerate() {
        match parse_line(line, opts.case) {
            Some((label, count)) => dataset.record(label, count, opts.merge),
            None => {
                if !line.trim().is_empty() {
                    log::debug!("{name}:{}: skipping malformed line {line:?}", line_no + 1);
                }
            }
        }
    }
    dataset
}

/// Split `label: count` on the first colon.
///
/// Returns `None` when there is no colon, the label is empty, or the count
/// is not a non-negative integer.
pub fn parse_line(line: &str, case: CaseFolding) -> Option<(String, u64)> {
    let (label, count) = line.split_once(':')?;
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    let count = count.trim().parse::<u64>().ok()?;
    Some((case.apply(label), count))
}

fn is_tally_file(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}
