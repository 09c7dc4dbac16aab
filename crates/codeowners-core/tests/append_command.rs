// cmd_append against real files
mod test_utils;

use codeowners_core::{cmd_append, AppendOptions};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;
use test_utils::ChangeDir;

fn options(entries: &[&str]) -> AppendOptions {
    AppendOptions {
        entries: entries.iter().map(|e| e.to_string()).collect(),
        ..Default::default()
    }
}

#[test]
#[serial]
fn test_appends_to_discovered_file() {
    let tmp = TempDir::new().unwrap();
    let _guard = ChangeDir::new(tmp.path());
    fs::create_dir_all(".github").unwrap();
    fs::write(".github/CODEOWNERS", "* @org/core").unwrap();

    let mut opts = options(&["docs/"]);
    opts.owners = vec!["@org/docs".to_string()];
    let outcome = cmd_append(&opts).unwrap();

    assert_eq!(outcome.inserted, vec!["\ndocs/ @org/docs\n"]);
    assert_eq!(
        fs::read_to_string(".github/CODEOWNERS").unwrap(),
        "* @org/core\ndocs/ @org/docs\n"
    );
}

#[test]
#[serial]
fn test_missing_file_without_create_fails() {
    let tmp = TempDir::new().unwrap();
    let _guard = ChangeDir::new(tmp.path());

    let err = cmd_append(&options(&["src/ @org/dev"])).unwrap_err();
    assert!(err.to_string().contains("No CODEOWNERS file found"));
    assert!(!tmp.path().join(".github").exists());
}

#[test]
#[serial]
fn test_create_flag_creates_github_file() {
    let tmp = TempDir::new().unwrap();
    let _guard = ChangeDir::new(tmp.path());

    let mut opts = options(&["# Frontend\nweb/ @org/web"]);
    opts.create = true;
    cmd_append(&opts).unwrap();

    assert_eq!(
        fs::read_to_string(".github/CODEOWNERS").unwrap(),
        "# Frontend\nweb/ @org/web\n"
    );
}

#[test]
#[serial]
fn test_explicit_file_is_created_in_its_directory() {
    let tmp = TempDir::new().unwrap();
    let _guard = ChangeDir::new(tmp.path());

    let mut opts = options(&["lib/ @org/lib"]);
    opts.file = Some("docs/CODEOWNERS".into());
    opts.create = true;
    cmd_append(&opts).unwrap();

    assert_eq!(fs::read_to_string("docs/CODEOWNERS").unwrap(), "lib/ @org/lib\n");
}

#[test]
#[serial]
fn test_existing_entry_is_not_appended() {
    let tmp = TempDir::new().unwrap();
    let _guard = ChangeDir::new(tmp.path());
    fs::write("CODEOWNERS", "build/\n").unwrap();

    let outcome = cmd_append(&options(&["build/", "dist/"])).unwrap();

    assert_eq!(outcome.skipped, vec!["build/"]);
    assert_eq!(fs::read_to_string("CODEOWNERS").unwrap(), "build/\ndist/\n");
}

#[test]
#[serial]
fn test_insert_at_line() {
    let tmp = TempDir::new().unwrap();
    let _guard = ChangeDir::new(tmp.path());
    fs::write("CODEOWNERS", "# header\n* @org/core\n").unwrap();

    let mut opts = options(&["src/ @org/dev"]);
    opts.line = Some(2);
    cmd_append(&opts).unwrap();

    assert_eq!(
        fs::read_to_string("CODEOWNERS").unwrap(),
        "# header\nsrc/ @org/dev\n* @org/core\n"
    );
}

#[test]
#[serial]
fn test_config_enables_policies() {
    let tmp = TempDir::new().unwrap();
    let _guard = ChangeDir::new(tmp.path());
    fs::create_dir_all(".codeowners").unwrap();
    fs::write(
        ".codeowners/config.toml",
        "[append]\nignoreDuplicates = true\nignoreComments = true\n",
    )
    .unwrap();
    fs::write("CODEOWNERS", "* @org/core\n").unwrap();

    cmd_append(&options(&["# generated\n* @org/core\nsrc/ @org/dev"])).unwrap();

    assert_eq!(fs::read_to_string("CODEOWNERS").unwrap(), "* @org/core\nsrc/ @org/dev\n");
}

#[test]
#[serial]
fn test_configured_file_name() {
    let tmp = TempDir::new().unwrap();
    let _guard = ChangeDir::new(tmp.path());
    fs::create_dir_all(".codeowners").unwrap();
    fs::write(".codeowners/config.toml", "[file]\nname = \"OWNERS\"\n").unwrap();
    fs::write("OWNERS", "").unwrap();

    cmd_append(&options(&["a/ @x"])).unwrap();

    assert_eq!(fs::read_to_string("OWNERS").unwrap(), "a/ @x\n");
}

#[test]
#[serial]
fn test_no_entries_is_noop() {
    let tmp = TempDir::new().unwrap();
    let _guard = ChangeDir::new(tmp.path());

    let outcome = cmd_append(&options(&[])).unwrap();
    assert!(outcome.is_unchanged());
    assert!(!tmp.path().join(".github").exists());
}
