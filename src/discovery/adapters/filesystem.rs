//! Best-effort source-tree scanner.

use crate::discovery::{
    domain::{DiscoveredService, DiscoveryFailure, DiscoveryPattern, ScanOutcome},
    ports::ServiceSource,
};
use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::sync::Arc;
use tracing::{debug, warn};

/// Reads source files matching [`DiscoveryPattern`]s and reports the services
/// they declare.
#[derive(Debug, Clone, Default)]
pub struct FilesystemScanner {
    patterns: Arc<Vec<DiscoveryPattern>>,
}

impl FilesystemScanner {
    /// Creates a scanner for `patterns`, consulted in order.
    #[must_use]
    pub fn new(patterns: impl IntoIterator<Item = DiscoveryPattern>) -> Self {
        Self {
            patterns: Arc::new(patterns.into_iter().collect()),
        }
    }

    /// Number of configured patterns.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

fn scan_pattern(pattern: &DiscoveryPattern, outcome: &mut ScanOutcome) {
    let directory = pattern.directory();
    let dir = match Dir::open_ambient_dir(directory, ambient_authority()) {
        Ok(opened) => opened,
        Err(err) => {
            outcome.failed.push(DiscoveryFailure::new(directory.as_str(), err));
            return;
        }
    };
    let entries = match dir.entries() {
        Ok(listing) => listing,
        Err(err) => {
            outcome.failed.push(DiscoveryFailure::new(directory.as_str(), err));
            return;
        }
    };

    let mut file_names: Vec<String> = Vec::new();
    for entry in entries {
        match entry.and_then(|item| {
            let is_file = item.file_type()?.is_file();
            Ok((item.file_name()?, is_file))
        }) {
            Ok((name, true)) if pattern.matches_file(&name) => file_names.push(name),
            Ok(_) => {}
            Err(err) => outcome.failed.push(DiscoveryFailure::new(directory.as_str(), err)),
        }
    }
    file_names.sort();

    for name in file_names {
        let location = directory.join(&name);
        match dir.read_to_string(&name) {
            Ok(source) => {
                for service in pattern.services_in(&source) {
                    outcome.found.push(DiscoveredService {
                        name: service,
                        location: location.to_string(),
                        kind: pattern.expected_base().to_owned(),
                        realm: pattern.realm().to_owned(),
                    });
                }
            }
            Err(err) => outcome
                .failed
                .push(DiscoveryFailure::new(location.as_str(), err)),
        }
    }
}

fn scan_all(patterns: &[DiscoveryPattern]) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for pattern in patterns {
        scan_pattern(pattern, &mut outcome);
    }
    outcome
}

#[async_trait]
impl ServiceSource for FilesystemScanner {
    fn label(&self) -> &'static str {
        "filesystem"
    }

    async fn scan(&self) -> ScanOutcome {
        let patterns = Arc::clone(&self.patterns);
        match tokio::task::spawn_blocking(move || scan_all(&patterns)).await {
            Ok(outcome) => {
                debug!(
                    found = outcome.found.len(),
                    failed = outcome.failed.len(),
                    "filesystem scan completed"
                );
                outcome
            }
            Err(err) => {
                warn!(error = %err, "filesystem scan task failed");
                ScanOutcome {
                    found: Vec::new(),
                    failed: vec![DiscoveryFailure::new("filesystem scan", err)],
                }
            }
        }
    }
}
