pub mod config;
pub mod model;
pub mod document;
pub mod parser;
pub mod notify;
pub mod merge;
pub mod resolver;
pub mod lint;
pub mod interactive;

use anyhow::{Context, Result};
use document::{Document, FileDocument, FixedCursor};
use merge::{EntryMerger, MergeOutcome};
use model::{compose_entry, CandidateSet, MergePolicy, Settings};
use notify::{ConsoleNotifier, Notifier};
use resolver::{FileResolver, FsResolver};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for `codeowners append`
#[derive(Debug, Clone, Default)]
pub struct AppendOptions {
    /// Rules file; discovered from the standard locations when absent
    pub file: Option<PathBuf>,
    pub entries: Vec<String>,
    /// Owners added to every single-line entry
    pub owners: Vec<String>,
    /// 1-based line to insert at; enables insert-at-cursor
    pub line: Option<usize>,
    pub ignore_duplicates: bool,
    pub ignore_comments: bool,
    /// Create the rules file if it does not exist
    pub create: bool,
}

impl AppendOptions {
    /// Flags can only switch config defaults on
    pub fn policy(&self, settings: &Settings) -> MergePolicy {
        let base = MergePolicy::from(&settings.append);
        MergePolicy {
            insert_at_cursor: base.insert_at_cursor || self.line.is_some(),
            ignore_duplicates: base.ignore_duplicates || self.ignore_duplicates,
            ignore_comments: base.ignore_comments || self.ignore_comments,
        }
    }

    pub fn candidates(&self) -> CandidateSet {
        self.entries
            .iter()
            .map(|entry| {
                if self.owners.is_empty() || entry.contains('\n') {
                    entry.clone()
                } else {
                    compose_entry(entry.trim(), &self.owners)
                }
            })
            .collect()
    }
}

/// Split text into candidates, one per blank-line-separated block
pub fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks
}

fn display_path(path: &Path) -> String {
    path.strip_prefix(".").unwrap_or(path).display().to_string()
}

/// Merge `candidates` into the rules file at `path` and write it back
pub fn append_to_file(
    path: &Path,
    candidates: CandidateSet,
    policy: MergePolicy,
    cursor_line: Option<usize>,
    notifier: &dyn Notifier,
) -> Result<MergeOutcome> {
    let mut document = FileDocument::open(path)?;
    let cursor = cursor_line.map(FixedCursor);

    let mut merger = EntryMerger::new(policy, notifier).with_location(display_path(path));
    if let Some(ref cursor) = cursor {
        merger = merger.with_cursor(cursor);
    }

    let outcome = merger
        .merge(&mut document, candidates)
        .with_context(|| format!("Failed to update {}", path.display()))?;

    tracing::debug!(
        path = %document.path().display(),
        inserted = outcome.inserted.len(),
        skipped = outcome.skipped.len(),
        length = document.text_length(),
        "append finished"
    );

    Ok(outcome)
}

/// Find the rules file to work on, creating it when allowed
fn resolve_target(file: Option<&Path>, settings: &Settings, create: bool) -> Result<PathBuf> {
    let name = settings.file.name.as_str();

    let existing = match file {
        Some(path) => path.is_file().then(|| path.to_path_buf()),
        None => resolver::discover_rules_file(Path::new("."), name),
    };
    if let Some(path) = existing {
        return Ok(path);
    }

    let (dir, file_name) = match file {
        Some(path) => {
            let file_name = path
                .file_name()
                .and_then(|f| f.to_str())
                .ok_or_else(|| anyhow::anyhow!("Invalid rules file path: {}", path.display()))?;
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            (dir.to_path_buf(), file_name.to_string())
        }
        None => (PathBuf::from(".github"), name.to_string()),
    };
    let target = dir.join(&file_name);

    let should_create = create
        || (interactive::is_interactive()
            && interactive::prompt_confirm(&format!("{} does not exist. Create it?", display_path(&target)), true)?);
    if !should_create {
        anyhow::bail!(
            "No {} file found.\n\nUse --create, or run 'codeowners create' first.",
            name
        );
    }

    let path = resolver::locate_or_create(&FsResolver::new(dir), &file_name)?;
    interactive::print_success(&format!("Created {}", display_path(&path)));
    Ok(path)
}

/// Append entries to the rules file
pub fn cmd_append(options: &AppendOptions) -> Result<MergeOutcome> {
    let settings = config::load_settings()?;
    let candidates = options.candidates();

    if candidates.is_empty() {
        interactive::print_info("No entries given - nothing to do");
        return Ok(MergeOutcome::default());
    }

    let path = resolve_target(options.file.as_deref(), &settings, options.create)?;
    let policy = options.policy(&settings);
    let cursor_line = options.line.map(|l| l.saturating_sub(1));

    let outcome = append_to_file(&path, candidates, policy, cursor_line, &ConsoleNotifier)?;

    if outcome.is_unchanged() {
        interactive::print_info(&format!("{} already up to date", display_path(&path)));
    } else {
        interactive::print_success(&format!("Updated {}", display_path(&path)));
        println!();
        for line in outcome.inserted.iter().flat_map(|block| block.lines()).filter(|l| !l.is_empty()) {
            interactive::print_added(line);
        }
    }

    Ok(outcome)
}

/// Find or create the rules file in `dir`
pub fn cmd_create(dir: &str) -> Result<PathBuf> {
    let settings = config::load_settings()?;
    let dir_resolver = FsResolver::new(dir);
    let name = settings.file.name.as_str();

    if let Some(existing) = dir_resolver.find_file(name) {
        interactive::print_warning(&format!("{} already exists", display_path(&existing)));
        return Ok(existing);
    }

    let path = resolver::locate_or_create(&dir_resolver, name)?;
    interactive::print_success(&format!("Created {}", display_path(&path)));
    Ok(path)
}

/// Validate the rules file
pub fn cmd_lint(file: Option<&str>) -> Result<lint::LintResult> {
    use owo_colors::OwoColorize;

    let settings = config::load_settings()?;
    let path = match file {
        Some(f) => PathBuf::from(f),
        None => resolver::discover_rules_file(Path::new("."), &settings.file.name)
            .ok_or_else(|| anyhow::anyhow!("No {} file found", settings.file.name))?,
    };

    println!("{} {}", "▸".bright_cyan(), format!("Linting {}...", display_path(&path)).bright_cyan().bold());
    println!();

    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let result = lint::lint_text(&text);
    result.print(&display_path(&path));

    if result.has_errors() {
        anyhow::bail!("Lint failed with {} errors", result.error_count());
    }

    Ok(result)
}
