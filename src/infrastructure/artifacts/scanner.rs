//! Artifact scanner - discovers compiled contract ABIs on the filesystem
//!
//! Used to cross-check the embedded registry against the build output it
//! was generated from: every descriptor must reproduce its originating
//! artifact field-for-field.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_json::Value;
use walkdir::WalkDir;

use crate::domain::abi::registry;

/// One discovered artifact: the contract name and its raw ABI value.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub name: String,
    pub abi: Value,
    pub source: PathBuf,
}

/// Result of scanning an artifact tree
#[derive(Debug, Default)]
pub struct ArtifactSet {
    pub artifacts: Vec<Artifact>,
    pub scanned_files: usize,
    pub errors: Vec<String>,
    pub scan_ms: u128,
}

impl ArtifactSet {
    /// Find an artifact by contract name (first match wins).
    pub fn find(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.name == name)
    }
}

/// Outcome of comparing the embedded registry against an artifact tree
#[derive(Debug, Default)]
pub struct VerifyReport {
    /// Contracts whose embedded ABI equals the on-disk artifact
    pub matched: Vec<&'static str>,
    /// Contracts whose embedded ABI differs from the on-disk artifact
    pub mismatched: Vec<&'static str>,
    /// Contracts with no artifact in the scanned tree
    pub missing: Vec<&'static str>,
}

impl VerifyReport {
    /// True when every contract matched its artifact.
    pub fn is_clean(&self) -> bool {
        self.mismatched.is_empty() && self.missing.is_empty()
    }
}

/// Artifact file scanner
pub struct ArtifactScanner;

impl ArtifactScanner {
    /// Scan a root directory for artifact JSON files
    pub fn scan(root: impl AsRef<Path>) -> ArtifactSet {
        let started = Instant::now();
        let root = root.as_ref();
        let mut set = ArtifactSet::default();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !Self::is_ignored_dir(e.path()))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    set.errors.push(err.to_string());
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            // Skip files larger than 5MB
            let metadata = match entry.metadata() {
                Ok(meta) => meta,
                Err(err) => {
                    set.errors.push(format!("{}: {}", path.display(), err));
                    continue;
                }
            };
            if metadata.len() > 5 * 1024 * 1024 {
                continue;
            }

            set.scanned_files += 1;

            match Self::load_artifact(path) {
                Ok(Some(artifact)) => set.artifacts.push(artifact),
                Ok(None) => {}
                Err(err) => set.errors.push(format!("{}: {}", path.display(), err)),
            }
        }

        set.scan_ms = started.elapsed().as_millis();
        set
    }

    /// Compare every embedded descriptor against the artifacts under `root`.
    pub fn verify(root: impl AsRef<Path>) -> VerifyReport {
        let set = Self::scan(root);
        let mut report = VerifyReport::default();

        for desc in registry::contracts() {
            let Some(artifact) = set.find(desc.name) else {
                report.missing.push(desc.name);
                continue;
            };
            let embedded: Value = serde_json::from_str(desc.artifact_json())
                .expect("embedded artifact is valid JSON");
            if embedded == artifact.abi {
                report.matched.push(desc.name);
            } else {
                report.mismatched.push(desc.name);
            }
        }

        report
    }

    /// Load a single artifact file
    ///
    /// Accepts a raw ABI array (the contract name then comes from the file
    /// stem, the Foundry layout) or an object with `abi` and optionally
    /// `contractName` (the Hardhat layout).
    fn load_artifact(path: &Path) -> anyhow::Result<Option<Artifact>> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;

        let (abi, name) = if value.is_array() {
            (value, None)
        } else if let Some(abi) = value.get("abi") {
            let name = value
                .get("contractName")
                .and_then(|n| n.as_str())
                .map(|n| n.to_string());
            (abi.clone(), name)
        } else {
            return Ok(None); // No ABI found, skip silently
        };

        let name = match name.or_else(|| Self::stem_name(path)) {
            Some(name) => name,
            None => return Ok(None),
        };

        Ok(Some(Artifact {
            name,
            abi,
            source: path.to_path_buf(),
        }))
    }

    /// Contract name from the file stem ("Counter.json" -> "Counter")
    fn stem_name(path: &Path) -> Option<String> {
        path.file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
    }

    /// Check if a path should be ignored
    fn is_ignored_dir(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|name| {
                matches!(
                    name,
                    ".git" | "target" | "node_modules" | ".next" | "dist" | "build"
                )
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abis_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("abis")
    }

    #[test]
    fn test_scan_embedded_artifacts() {
        let set = ArtifactScanner::scan(abis_dir());
        assert_eq!(set.scanned_files, 5);
        assert!(set.errors.is_empty(), "scan errors: {:?}", set.errors);
        assert!(set.find("Counter").is_some());
        assert!(set.find("ModuleFactory").is_some());
    }

    #[test]
    fn test_verify_registry_round_trip() {
        let report = ArtifactScanner::verify(abis_dir());
        assert!(
            report.is_clean(),
            "mismatched: {:?}, missing: {:?}",
            report.mismatched,
            report.missing
        );
        assert_eq!(report.matched.len(), 5);
    }

    #[test]
    fn test_is_ignored_dir() {
        assert!(ArtifactScanner::is_ignored_dir(Path::new(".git")));
        assert!(ArtifactScanner::is_ignored_dir(Path::new("node_modules")));
        assert!(!ArtifactScanner::is_ignored_dir(Path::new("out")));
        assert!(!ArtifactScanner::is_ignored_dir(Path::new("abis")));
    }
}
