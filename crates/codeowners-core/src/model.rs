use serde::{Deserialize, Serialize};

/// Canonical rules file name
pub const CODEOWNERS_FILENAME: &str = "CODEOWNERS";

/// Comment marker at line start
pub const HASH: char = '#';

/// Line separator used when writing entries
pub const NEWLINE: &str = "\n";

/// Fully resolved settings (all config layers merged, defaults applied)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub append: AppendSettings,
    pub file: FileSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendSettings {
    pub insert_at_cursor: bool,
    pub ignore_duplicates: bool,
    pub ignore_comments: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSettings {
    pub name: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self { name: CODEOWNERS_FILENAME.to_string() }
    }
}

/// One config layer as read from disk; every field is optional so that
/// local files only need to carry the keys they override
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PartialSettings {
    pub append: Option<PartialAppend>,
    pub file: Option<PartialFile>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PartialAppend {
    #[serde(rename = "insertAtCursor")]
    pub insert_at_cursor: Option<bool>,
    #[serde(rename = "ignoreDuplicates")]
    pub ignore_duplicates: Option<bool>,
    #[serde(rename = "ignoreComments")]
    pub ignore_comments: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PartialFile {
    pub name: Option<String>,
}

/// Policy flags for a single merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergePolicy {
    /// Insert at the cursor line start instead of the document end
    pub insert_at_cursor: bool,
    /// Drop candidate lines already present in the document
    pub ignore_duplicates: bool,
    /// Drop comment and blank lines from candidates
    pub ignore_comments: bool,
}

impl From<&AppendSettings> for MergePolicy {
    fn from(s: &AppendSettings) -> Self {
        Self {
            insert_at_cursor: s.insert_at_cursor,
            ignore_duplicates: s.ignore_duplicates,
            ignore_comments: s.ignore_comments,
        }
    }
}

/// Candidate entries in insertion order, without repeats
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    items: Vec<String>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate; returns false if it was already present
    pub fn insert(&mut self, candidate: impl Into<String>) -> bool {
        let candidate = candidate.into();
        if self.contains(&candidate) {
            return false;
        }
        self.items.push(candidate);
        true
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.items.iter().any(|c| c == candidate)
    }

    pub fn remove(&mut self, candidate: &str) -> bool {
        match self.items.iter().position(|c| c == candidate) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

/// Build a rule line from a pattern and its owners
pub fn compose_entry(pattern: &str, owners: &[String]) -> String {
    if owners.is_empty() {
        return pattern.to_string();
    }
    format!("{} {}", pattern, owners.join(" "))
}
