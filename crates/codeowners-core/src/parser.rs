// Line-level CODEOWNERS parsing: classify lines, walk top-level entries

use crate::model::HASH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Entry,
}

/// A rule line: a path pattern followed by zero or more owners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// 0-based line number
    pub line: usize,
    /// Line text without surrounding whitespace
    pub text: String,
    pub pattern: String,
    pub owners: Vec<String>,
}

pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.starts_with(HASH) {
        LineKind::Comment
    } else {
        LineKind::Entry
    }
}

/// Call `callback` for each top-level entry, in document order
pub fn for_each_top_level_entry<F>(text: &str, mut callback: F)
where
    F: FnMut(&Entry),
{
    for (line, raw) in text.lines().enumerate() {
        if let Some(entry) = parse_line(line, raw) {
            callback(&entry);
        }
    }
}

pub fn parse(text: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    for_each_top_level_entry(text, |entry| entries.push(entry.clone()));
    entries
}

fn parse_line(line: usize, raw: &str) -> Option<Entry> {
    if classify(raw) != LineKind::Entry {
        return None;
    }

    let text = raw.trim();
    let mut tokens = text.split_whitespace();
    let pattern = tokens.next()?.to_string();
    let owners = tokens
        .take_while(|t| !t.starts_with(HASH))
        .map(str::to_string)
        .collect();

    Some(Entry { line, text: text.to_string(), pattern, owners })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("   \t"), LineKind::Blank);
        assert_eq!(classify("# owners"), LineKind::Comment);
        assert_eq!(classify("  # indented"), LineKind::Comment);
        assert_eq!(classify("*.rs @rustaceans"), LineKind::Entry);
    }

    #[test]
    fn test_parse_entries() {
        let text = "# Default owners\n* @org/core\n\n/docs/ @org/docs dev@example.com # docs team\nbuild/\n";
        let entries = parse(text);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].line, 1);
        assert_eq!(entries[0].pattern, "*");
        assert_eq!(entries[0].owners, vec!["@org/core"]);

        assert_eq!(entries[1].line, 3);
        assert_eq!(entries[1].pattern, "/docs/");
        assert_eq!(entries[1].owners, vec!["@org/docs", "dev@example.com"]);
        assert_eq!(entries[1].text, "/docs/ @org/docs dev@example.com # docs team");

        assert_eq!(entries[2].text, "build/");
        assert!(entries[2].owners.is_empty());
    }

    #[test]
    fn test_entry_text_is_trimmed() {
        let entries = parse("  build/  \r\n");
        assert_eq!(entries[0].text, "build/");
    }

    #[test]
    fn test_walk_visits_in_order() {
        let mut seen = Vec::new();
        for_each_top_level_entry("a\n# b\nc", |e| seen.push(e.text.clone()));
        assert_eq!(seen, vec!["a", "c"]);
    }
}
