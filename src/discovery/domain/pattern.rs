//! Filesystem discovery patterns and source matching.

use super::DiscoveryDomainError;
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static SERVICE_STRUCT: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\bstruct\s+([A-Za-z_][A-Za-z0-9_]*Service)\b"));

/// Where to look for services and what makes a type count as one.
#[derive(Debug, Clone)]
pub struct DiscoveryPattern {
    directory: Utf8PathBuf,
    filename_glob: String,
    expected_base: String,
    realm: String,
    filename: Regex,
    implementors: Regex,
}

fn glob_to_regex(glob: &str) -> String {
    let mut pattern = String::from("^");
    for ch in glob.chars() {
        match ch {
            '*' => pattern.push_str("[^/]*"),
            '?' => pattern.push_str("[^/]"),
            other => pattern.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    pattern.push('$');
    pattern
}

impl DiscoveryPattern {
    /// Creates a pattern scanning `directory` for files matching
    /// `filename_glob` that declare `struct <Name>Service` and
    /// `impl <expected_base> for <Name>Service`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryDomainError`] when the base is blank or the glob
    /// cannot be compiled.
    pub fn new(
        directory: impl Into<Utf8PathBuf>,
        filename_glob: &str,
        expected_base: &str,
        realm: &str,
    ) -> Result<Self, DiscoveryDomainError> {
        let dir = directory.into();
        let base = expected_base.trim();
        if base.is_empty() {
            return Err(DiscoveryDomainError::EmptyExpectedBase {
                directory: dir.to_string(),
            });
        }
        let invalid = |err: regex::Error| DiscoveryDomainError::InvalidGlob {
            glob: filename_glob.to_owned(),
            reason: err.to_string(),
        };
        let filename = Regex::new(&glob_to_regex(filename_glob)).map_err(invalid)?;
        let implementors = Regex::new(&format!(
            r"\bimpl(?:\s*<[^>]*>)?\s+(?:[A-Za-z_][A-Za-z0-9_]*::)*{}\b(?:\s*<[^>]*>)?\s+for\s+([A-Za-z_][A-Za-z0-9_]*)\b",
            regex::escape(base)
        ))
        .map_err(invalid)?;
        Ok(Self {
            directory: dir,
            filename_glob: filename_glob.to_owned(),
            expected_base: base.to_owned(),
            realm: realm.trim().to_owned(),
            filename,
            implementors,
        })
    }

    /// Directory the pattern scans.
    #[must_use]
    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    /// Filename glob.
    #[must_use]
    pub fn filename_glob(&self) -> &str {
        &self.filename_glob
    }

    /// Base services must implement.
    #[must_use]
    pub fn expected_base(&self) -> &str {
        &self.expected_base
    }

    /// Realm assigned to matches.
    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Whether a file name matches the glob.
    #[must_use]
    pub fn matches_file(&self, file_name: &str) -> bool {
        self.filename.is_match(file_name)
    }

    /// Names of services declared in `source` that implement the base.
    #[must_use]
    pub fn services_in(&self, source: &str) -> Vec<String> {
        let Ok(structs) = SERVICE_STRUCT.as_ref() else {
            return Vec::new();
        };
        let implemented: BTreeSet<&str> = self
            .implementors
            .captures_iter(source)
            .filter_map(|captures| captures.get(1).map(|name| name.as_str()))
            .collect();
        let mut seen = BTreeSet::new();
        structs
            .captures_iter(source)
            .filter_map(|captures| captures.get(1).map(|name| name.as_str()))
            .filter(|name| implemented.contains(name) && seen.insert(*name))
            .map(str::to_owned)
            .collect()
    }
}
