//! Loading raw records from documentation generator output.
//!
//! A data source is a single file or a directory. Directories are walked
//! recursively and every supported file is read in path order, so the
//! ingestion order (and with it the order of overloads) is deterministic.

pub mod doxygen;
pub mod json;

use crate::error::{QuickSearchError, Result};
use quicksearch_api::{Category, SymbolRecord};
use std::fs;
use std::hash::Hasher;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use xxhash_rust::xxh3::Xxh3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Doxygen `var searchData = [...]` script.
    SearchData,
    /// JSON array of [`SymbolRecord`].
    Json,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "js" => Some(Self::SearchData),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Records read from a data source, plus the fingerprint of its content.
#[derive(Debug, Clone, Default)]
pub struct LoadedSource {
    pub records: Vec<SymbolRecord>,
    pub files: Vec<PathBuf>,
    pub fingerprint: u64,
}

pub fn is_relevant_path(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        if name.starts_with('.') || name.ends_with(".tmp") {
            return false;
        }
    }
    SourceFormat::from_path(path).is_some()
}

/// Supported files under `root`, sorted by path.
pub fn collect_paths(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(QuickSearchError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("data source not found: {}", root.display()),
        )));
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.starts_with('.'))
        })
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if entry.file_type().is_file() && is_relevant_path(path) {
                return Some(path.to_path_buf());
            }
            None
        })
        .collect();
    paths.sort();
    Ok(paths)
}

/// Read every file of the data source.
///
/// When the source is a directory, files that fail to parse are skipped with
/// a warning (generated `search` directories also carry unrelated scripts).
/// A single-file source must parse.
pub fn load(root: &Path) -> Result<LoadedSource> {
    let paths = collect_paths(root)?;
    let single_file = root.is_file();

    let mut hasher = Xxh3::new();
    let mut loaded = LoadedSource::default();

    for path in paths {
        let bytes = fs::read(&path)?;
        hash_file(&mut hasher, &path, &bytes);

        match parse_file(&path, &bytes) {
            Ok(records) => {
                tracing::debug!("Read {} records from {}", records.len(), path.display());
                loaded.records.extend(records);
                loaded.files.push(path);
            }
            Err(e) if !single_file => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
            }
            Err(e) => return Err(e),
        }
    }

    loaded.fingerprint = hasher.finish();
    tracing::info!(
        "Loaded {} records from {} files under {}",
        loaded.records.len(),
        loaded.files.len(),
        root.display()
    );
    Ok(loaded)
}

/// Content fingerprint of the data source without parsing it.
pub fn fingerprint(root: &Path) -> Result<u64> {
    let mut hasher = Xxh3::new();
    for path in collect_paths(root)? {
        let bytes = fs::read(&path)?;
        hash_file(&mut hasher, &path, &bytes);
    }
    Ok(hasher.finish())
}

fn hash_file(hasher: &mut Xxh3, path: &Path, bytes: &[u8]) {
    hasher.write(path.to_string_lossy().as_bytes());
    hasher.write_u64(bytes.len() as u64);
    hasher.write(bytes);
}

/// Parse one file according to its extension.
pub fn parse_file(path: &Path, bytes: &[u8]) -> Result<Vec<SymbolRecord>> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        QuickSearchError::Parsing(format!("{} is not UTF-8: {}", path.display(), e))
    })?;

    match SourceFormat::from_path(path) {
        Some(SourceFormat::SearchData) => {
            let category = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(Category::from_file_stem);
            doxygen::parse_search_data(text, category.as_ref())
        }
        Some(SourceFormat::Json) => json::parse_records(text),
        None => Err(QuickSearchError::Parsing(format!(
            "unsupported data file: {}",
            path.display()
        ))),
    }
}
