//! Package classification
//!
//! Decides whether a directory entry is a Python package and, if not, why.
//! Discovery keeps the reasons so skipped directories can be reported.

use crate::workspace::package::{parse_requirements, Package, REQUIREMENTS_FILE, SETUP_FILE};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Why a candidate path is not a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Path is a file or does not exist
    NotADirectory,
    /// No `setup.py` directly inside the directory
    MissingSetup,
    /// No `requirements.txt` directly inside the directory
    MissingRequirements,
    /// `requirements.txt` exists but could not be read
    UnreadableManifest(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADirectory => write!(f, "not a directory"),
            Self::MissingSetup => write!(f, "missing {}", SETUP_FILE),
            Self::MissingRequirements => write!(f, "missing {}", REQUIREMENTS_FILE),
            Self::UnreadableManifest(reason) => {
                write!(f, "cannot read {}: {}", REQUIREMENTS_FILE, reason)
            }
        }
    }
}

/// A path that failed classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// Absolute path of the candidate
    pub path: PathBuf,
    /// Why it was rejected
    pub reason: Rejection,
}

/// Result of classifying one candidate path
#[derive(Debug)]
pub enum Candidate {
    /// A valid package
    Package(Package),
    /// Not a package, with the reason
    Rejected(Rejected),
}

/// Classify a candidate path.
///
/// A path is a package iff it is a directory directly containing both
/// `setup.py` and `requirements.txt`. The manifest is decoded lossily, so
/// stray non-UTF-8 bytes never disqualify a package.
pub fn classify(path: &Path) -> Candidate {
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let reject = |path: PathBuf, reason| Candidate::Rejected(Rejected { path, reason });

    if !path.is_dir() {
        return reject(path, Rejection::NotADirectory);
    }
    if !path.join(SETUP_FILE).is_file() {
        return reject(path, Rejection::MissingSetup);
    }

    let manifest = path.join(REQUIREMENTS_FILE);
    if !manifest.is_file() {
        return reject(path, Rejection::MissingRequirements);
    }

    match fs::read(&manifest) {
        Ok(bytes) => {
            let content = String::from_utf8_lossy(&bytes);
            Candidate::Package(Package::from_parts(path, parse_requirements(&content)))
        }
        Err(e) => reject(path, Rejection::UnreadableManifest(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rejection(candidate: Candidate) -> Rejection {
        match candidate {
            Candidate::Rejected(r) => r.reason,
            Candidate::Package(p) => panic!("expected rejection, got {}", p.path().display()),
        }
    }

    #[test]
    fn classify_package() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("setup.py"), "").unwrap();
        fs::write(temp.path().join("requirements.txt"), "six==1.10\n").unwrap();

        match classify(temp.path()) {
            Candidate::Package(p) => {
                assert_eq!(p.path(), temp.path());
                assert!(p.requirements().contains("six==1.10"));
            }
            Candidate::Rejected(r) => panic!("unexpected rejection: {}", r.reason),
        }
    }

    #[test]
    fn classify_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("README.md");
        fs::write(&file, "# hi").unwrap();
        assert_eq!(rejection(classify(&file)), Rejection::NotADirectory);
    }

    #[test]
    fn classify_missing_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");
        assert_eq!(rejection(classify(&missing)), Rejection::NotADirectory);
    }

    #[test]
    fn classify_missing_setup() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requirements.txt"), "").unwrap();
        assert_eq!(rejection(classify(temp.path())), Rejection::MissingSetup);
    }

    #[test]
    fn classify_missing_requirements() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("setup.py"), "").unwrap();
        assert_eq!(
            rejection(classify(temp.path())),
            Rejection::MissingRequirements
        );
    }

    #[test]
    fn classify_requirements_directory_is_missing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("setup.py"), "").unwrap();
        fs::create_dir(temp.path().join("requirements.txt")).unwrap();
        assert_eq!(
            rejection(classify(temp.path())),
            Rejection::MissingRequirements
        );
    }

    #[test]
    fn classify_non_utf8_manifest_is_package() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("setup.py"), "").unwrap();
        fs::write(temp.path().join("requirements.txt"), b"# caf\xe9\nsix==1.10\n").unwrap();

        match classify(temp.path()) {
            Candidate::Package(p) => {
                assert_eq!(p.requirements().len(), 1);
                assert!(p.requirements().contains("six==1.10"));
            }
            Candidate::Rejected(r) => panic!("unexpected rejection: {}", r.reason),
        }
    }

    #[test]
    fn rejection_display() {
        assert_eq!(Rejection::MissingSetup.to_string(), "missing setup.py");
        assert_eq!(
            Rejection::MissingRequirements.to_string(),
            "missing requirements.txt"
        );
    }
}
