use cliparse::core::Coordinator;
use std::fs;
use tempfile::TempDir;

const CHECK_LINKS: &str = r#"
name = "check-links"
description = "Check links in documents"
standard_flags = ["verbose"]
supports = ["-v", "--verbose", "--timeout"]

[[positional]]
name = "files"
multiple = true

[[option]]
long = "timeout"
takes_value = true
default = "30"
"#;

const SPELL: &str = r#"
name = "spell"
supports = ["--lang"]

[[positional]]
name = "files"
multiple = true

[[option]]
long = "lang"
takes_value = true
choices = ["en", "de"]
"#;

fn write(dir: &TempDir, file: &str, content: &str) {
    fs::write(dir.path().join(file), content).unwrap();
}

#[test]
fn test_load_manifests_in_file_order() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a_check_links.toml", CHECK_LINKS);
    write(&dir, "b_spell.toml", SPELL);

    let mut coordinator = Coordinator::new();
    let loaded = coordinator
        .load_scripts_from_directory(dir.path(), "*.toml")
        .unwrap();

    assert_eq!(loaded, 2);
    assert_eq!(coordinator.list_scripts(), vec!["check-links", "spell"]);

    let info = coordinator.get_script_info("check-links").unwrap();
    assert_eq!(info.description(), "Check links in documents");
    assert!(info.origin().unwrap().ends_with("a_check_links.toml"));
}

#[test]
fn test_underscore_files_skipped() {
    let dir = TempDir::new().unwrap();
    write(&dir, "_draft.toml", CHECK_LINKS);
    write(&dir, "spell.toml", SPELL);

    let mut coordinator = Coordinator::new();
    let loaded = coordinator
        .load_scripts_from_directory(dir.path(), "*.toml")
        .unwrap();

    assert_eq!(loaded, 1);
    assert_eq!(coordinator.list_scripts(), vec!["spell"]);
}

#[test]
fn test_bad_manifest_does_not_block_others() {
    let dir = TempDir::new().unwrap();
    write(&dir, "broken.toml", "name = \n");
    write(&dir, "clash.toml", "name = \"clash\"\n[[option]]\nlong = \"verbose\"\n");
    write(&dir, "spell.toml", SPELL);

    let mut coordinator = Coordinator::new();
    let loaded = coordinator
        .load_scripts_from_directory(dir.path(), "*.toml")
        .unwrap();

    assert_eq!(loaded, 1);
    assert_eq!(coordinator.list_scripts(), vec!["spell"]);
}

#[test]
fn test_pattern_selects_files() {
    let dir = TempDir::new().unwrap();
    write(&dir, "spell.toml", SPELL);
    write(&dir, "notes.txt", "not a manifest");

    let mut coordinator = Coordinator::new();
    assert_eq!(
        coordinator
            .load_scripts_from_directory(dir.path(), "*.txt")
            .unwrap(),
        0
    );
    assert!(coordinator.list_scripts().is_empty());
}

#[test]
fn test_missing_directory_is_error() {
    let mut coordinator = Coordinator::new();
    assert!(
        coordinator
            .load_scripts_from_directory(std::path::Path::new("/definitely/not/here"), "*.toml")
            .is_err()
    );
}

#[test]
fn test_manifest_scripts_filter_and_run() {
    let dir = TempDir::new().unwrap();
    write(&dir, "check_links.toml", CHECK_LINKS);
    write(&dir, "spell.toml", SPELL);

    let mut coordinator = Coordinator::new();
    coordinator
        .load_scripts_from_directory(dir.path(), "*.toml")
        .unwrap();

    let results = coordinator.run(
        &["check-links", "spell"],
        &["doc.md", "--timeout", "10", "--lang", "en", "-v"],
    );
    assert!(results.all_success(), "{}", results.summary());

    let results = coordinator.run(&["spell"], &["doc.md", "--lang", "fr"]);
    assert_eq!(results.results()[0].exit_code, 2);
}

#[test]
fn test_malformed_positional_layouts_skipped() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "optional_first.toml",
        "name = \"optional-first\"\n\
         [[positional]]\nname = \"a\"\nrequired = false\n\
         [[positional]]\nname = \"b\"\n",
    );
    write(
        &dir,
        "two_lists.toml",
        "name = \"two-lists\"\n\
         [[positional]]\nname = \"a\"\nmultiple = true\n\
         [[positional]]\nname = \"b\"\nmultiple = true\n",
    );
    write(&dir, "spell.toml", SPELL);

    let mut coordinator = Coordinator::new();
    let loaded = coordinator
        .load_scripts_from_directory(dir.path(), "*.toml")
        .unwrap();

    assert_eq!(loaded, 1);
    assert_eq!(coordinator.list_scripts(), vec!["spell"]);

    let results = coordinator.run(&["optional-first", "spell"], &["x"]);
    assert_eq!(results.total(), 2);
    assert!(!results.results()[0].success);
    assert!(results.results()[1].success);
}
