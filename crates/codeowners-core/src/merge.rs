// Append candidate entries to a rules document: dedupe, strip comments, place text

use crate::document::{CursorProvider, Document, DocumentError};
use crate::model::{CandidateSet, MergePolicy, HASH, NEWLINE};
use crate::notify::Notifier;
use crate::parser;
use std::collections::HashSet;

/// What a merge changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Offset the first block was inserted at
    pub start_offset: usize,
    /// Offset just past the last inserted block
    pub end_offset: usize,
    /// Text blocks actually inserted, in order
    pub inserted: Vec<String>,
    /// Candidates dropped because the file already has them as entries
    pub skipped: Vec<String>,
}

impl MergeOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.inserted.is_empty()
    }
}

pub struct EntryMerger<'a> {
    policy: MergePolicy,
    cursor: Option<&'a dyn CursorProvider>,
    notifier: &'a dyn Notifier,
    location: String,
}

impl<'a> EntryMerger<'a> {
    pub fn new(policy: MergePolicy, notifier: &'a dyn Notifier) -> Self {
        Self { policy, cursor: None, notifier, location: String::new() }
    }

    pub fn with_cursor(mut self, cursor: &'a dyn CursorProvider) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Location shown in duplicate warnings, usually the file path relative to the project root
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Insert `candidates` into `document` and commit it.
    ///
    /// Candidates that already exist verbatim as entries are reported through the
    /// notifier and skipped. An insert failure aborts the merge; blocks inserted
    /// before the failure stay in the document.
    pub fn merge(
        &self,
        document: &mut dyn Document,
        mut candidates: CandidateSet,
    ) -> Result<MergeOutcome, DocumentError> {
        let mut outcome = MergeOutcome {
            start_offset: document.text_length(),
            end_offset: document.text_length(),
            ..Default::default()
        };

        if candidates.is_empty() {
            return Ok(outcome);
        }

        parser::for_each_top_level_entry(document.text(), |entry| {
            if candidates.remove(&entry.text) {
                self.notifier.warn(
                    &format!("Entry \"{}\" already exists", entry.text),
                    &format!("in {}", self.location),
                );
                outcome.skipped.push(entry.text.clone());
            }
        });

        let mut offset = self.resolve_offset(document);
        outcome.start_offset = offset;
        tracing::debug!(offset, candidates = candidates.len(), "resolved insertion offset");

        for candidate in candidates.iter() {
            let entry = self.resolve_text(document, offset, candidate);
            if entry.is_empty() {
                tracing::debug!(candidate, "candidate resolved to nothing");
                continue;
            }

            document.insert_string(offset, &entry)?;
            offset += entry.len();
            outcome.inserted.push(entry);
        }

        outcome.end_offset = offset;
        document.commit()?;

        Ok(outcome)
    }

    fn resolve_offset(&self, document: &dyn Document) -> usize {
        if self.policy.insert_at_cursor {
            let line = self.cursor.and_then(|c| c.primary_selection_start_line());
            if let Some(line) = line {
                return document.line_start_offset(line);
            }
        }
        document.text_length()
    }

    fn resolve_text(&self, document: &dyn Document, offset: usize, candidate: &str) -> String {
        let mut entry = candidate.to_string();

        if self.policy.ignore_duplicates {
            entry = drop_duplicate_lines(document.text(), &entry);
        }
        if self.policy.ignore_comments {
            entry = strip_comments(&entry);
        }

        entry = entry.replace('\r', "");
        if entry.is_empty() {
            return entry;
        }
        entry.push_str(NEWLINE);

        // Text landing at the end of a document without a trailing separator
        // would be glued onto the last line
        let at_end = offset == document.text_length();
        let glued = document.text_length() > 0 && !document.ends_with_separator();
        if at_end && glued {
            entry.insert_str(0, NEWLINE);
        }

        entry
    }
}

fn is_blank_or_comment(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.starts_with(HASH)
}

/// Remove candidate lines already present in `existing`, or earlier in the candidate.
/// Blank and comment lines are never treated as duplicates. Only candidate lines
/// are trimmed; document lines are compared as written.
pub fn drop_duplicate_lines(existing: &str, candidate: &str) -> String {
    let mut seen: HashSet<&str> = existing
        .split(NEWLINE)
        .filter(|line| !line.is_empty() && !line.starts_with(HASH))
        .collect();

    candidate
        .split(NEWLINE)
        .filter(|line| {
            let trimmed = line.trim();
            is_blank_or_comment(trimmed) || seen.insert(trimmed)
        })
        .collect::<Vec<_>>()
        .join(NEWLINE)
}

/// Remove blank and comment lines
pub fn strip_comments(candidate: &str) -> String {
    candidate
        .split(NEWLINE)
        .filter(|line| !is_blank_or_comment(line.trim()))
        .collect::<Vec<_>>()
        .join(NEWLINE)
}
