//! Corpus loader.
//!
//! Builds the ordered, immutable collection of reference licenses the
//! detector matches against. This is the one place in the crate that
//! touches the filesystem; once built, a `Corpus` is read-only and safe to
//! share across an unbounded number of concurrent detections.

use std::path::{Path, PathBuf};

use crate::error::DetectError;
use crate::license_detection::reference::{IDENTIFIER_PATTERN, License};

const TAIL_MARKER: &str = "END OF TERMS AND CONDITIONS";

/// The ordered collection of reference licenses loaded from one or more
/// directories, frozen after construction.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    licenses: Vec<License>,
}

impl Corpus {
    /// Reference licenses, sorted by identifier.
    pub fn licenses(&self) -> &[License] {
        &self.licenses
    }

    /// Wrap an already-parsed set of licenses into a frozen corpus, sorting
    /// by identifier. Mainly useful for tests and for callers embedding a
    /// fixed fixture corpus rather than reading one from disk.
    pub fn from_licenses(mut licenses: Vec<License>) -> Corpus {
        licenses.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        Corpus { licenses }
    }

    /// Load a corpus from one or more directories.
    ///
    /// For each directory (non-recursive): every file must end in `.txt`,
    /// its filename stem becomes the SPDX identifier and must match
    /// `[A-Za-z0-9._+-]+`, and its contents must be valid UTF-8. If a
    /// file's raw content contains the literal phrase
    /// `"END OF TERMS AND CONDITIONS"`, two `License`s are emitted for it:
    /// one from the full text, one truncated to end with that phrase
    /// (AGPL-3.0's optional-tail situation).
    ///
    /// The result is sorted by identifier and frozen. Any violation of the
    /// above is a [`DetectError::CorpusMalformed`] and aborts the whole
    /// load; a partially loaded corpus is never returned.
    pub fn load<P: AsRef<Path>>(directories: impl IntoIterator<Item = P>) -> Result<Corpus, DetectError> {
        let mut licenses = Vec::new();

        for dir in directories {
            let dir = dir.as_ref();
            let entries = std::fs::read_dir(dir).map_err(|source| DetectError::Io {
                path: dir.to_path_buf(),
                source,
            })?;

            let mut paths: Vec<PathBuf> = Vec::new();
            for entry in entries {
                let entry = entry.map_err(|source| DetectError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
                let path = entry.path();
                if path.is_dir() {
                    continue;
                }
                paths.push(path);
            }
            paths.sort();

            for path in paths {
                licenses.extend(load_one(&path)?);
            }
        }

        log::debug!("loaded corpus with {} reference licenses", licenses.len());
        Ok(Corpus::from_licenses(licenses))
    }
}

fn load_one(path: &Path) -> Result<Vec<License>, DetectError> {
    if path.extension().and_then(|e| e.to_str()) != Some("txt") {
        return Err(DetectError::CorpusMalformed {
            path: path.to_path_buf(),
            reason: "reference directories may only contain .txt files".to_string(),
        });
    }

    let identifier = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| DetectError::CorpusMalformed {
            path: path.to_path_buf(),
            reason: "filename is not valid UTF-8".to_string(),
        })?
        .to_string();

    if !IDENTIFIER_PATTERN.is_match(&identifier) {
        return Err(DetectError::CorpusMalformed {
            path: path.to_path_buf(),
            reason: format!("'{identifier}' is not a valid SPDX identifier"),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| DetectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = String::from_utf8(bytes).map_err(|_| DetectError::CorpusMalformed {
        path: path.to_path_buf(),
        reason: "file is not valid UTF-8".to_string(),
    })?;

    let mut out = vec![License::parse(identifier.clone(), &raw)];
    if let Some(pos) = raw.find(TAIL_MARKER) {
        let end = pos + TAIL_MARKER.len();
        out.push(License::parse(identifier, &raw[..end]));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_txt_files_sorted_by_identifier() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("MIT.txt"), "MIT license text").unwrap();
        fs::write(dir.path().join("Apache-2.0.txt"), "Apache license text").unwrap();

        let corpus = Corpus::load([dir.path()]).unwrap();
        let ids: Vec<&str> = corpus.licenses().iter().map(|l| l.identifier.as_str()).collect();
        assert_eq!(ids, vec!["Apache-2.0", "MIT"]);
    }

    #[test]
    fn rejects_non_txt_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "not a license").unwrap();

        let err = Corpus::load([dir.path()]).unwrap_err();
        assert!(matches!(err, DetectError::CorpusMalformed { .. }));
    }

    #[test]
    fn rejects_invalid_identifiers() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("not a license.txt"), "text").unwrap();

        let err = Corpus::load([dir.path()]).unwrap_err();
        assert!(matches!(err, DetectError::CorpusMalformed { .. }));
    }

    #[test]
    fn splits_tail_marker_into_two_licenses() {
        let dir = tempdir().unwrap();
        let text = format!(
            "Preamble text.\n\n{}\n\nOptional additional terms follow here.",
            TAIL_MARKER
        );
        fs::write(dir.path().join("AGPL-3.0.txt"), &text).unwrap();

        let corpus = Corpus::load([dir.path()]).unwrap();
        let agpl: Vec<&License> = corpus
            .licenses()
            .iter()
            .filter(|l| l.identifier == "AGPL-3.0")
            .collect();
        assert_eq!(agpl.len(), 2);
        assert!(agpl.iter().any(|l| l.content.contains("Optional additional")));
        assert!(agpl.iter().any(|l| !l.content.contains("Optional additional")));
    }

    #[test]
    fn load_from_empty_directory_yields_empty_corpus() {
        let dir = tempdir().unwrap();
        let corpus = Corpus::load([dir.path()]).unwrap();
        assert!(corpus.licenses().is_empty());
    }
}
