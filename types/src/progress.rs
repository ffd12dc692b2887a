//! Per-file progress for an in-flight plan build.

use std::collections::HashMap;

/// Streamed token count and completion flag for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileProgress {
    pub tokens: u32,
    pub finished: bool,
}

/// Tracks which files a build has touched and how far each has streamed.
///
/// The tracker only stores the path to progress association. Display order
/// is computed by [`BuildTracker::snapshot`] on every call.
#[derive(Debug, Clone, Default)]
pub struct BuildTracker {
    files: HashMap<String, FileProgress>,
}

impl BuildTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` streamed tokens to `path`, creating the entry if needed.
    ///
    /// Finished files do not resume counting; returns `false` when the
    /// update was ignored for that reason.
    pub fn record_tokens(&mut self, path: &str, delta: u32) -> bool {
        let entry = self.files.entry(path.to_owned()).or_default();
        if entry.finished {
            return false;
        }
        entry.tokens = entry.tokens.saturating_add(delta);
        true
    }

    /// Mark `path` as finished. Idempotent.
    pub fn mark_finished(&mut self, path: &str) {
        self.files.entry(path.to_owned()).or_default().finished = true;
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<FileProgress> {
        self.files.get(path).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Copy of the current progress, sorted lexicographically by path.
    #[must_use]
    pub fn snapshot(&self) -> BuildSnapshot {
        let mut files: Vec<(String, FileProgress)> = self
            .files
            .iter()
            .map(|(path, progress)| (path.clone(), *progress))
            .collect();
        files.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        BuildSnapshot { files }
    }
}

/// Read-only, display-ordered view of a [`BuildTracker`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSnapshot {
    files: Vec<(String, FileProgress)>,
}

impl BuildSnapshot {
    pub fn iter(&self) -> impl Iterator<Item = (&str, FileProgress)> {
        self.files
            .iter()
            .map(|(path, progress)| (path.as_str(), *progress))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
