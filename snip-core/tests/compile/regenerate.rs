use crate::common::{file_names, write_definition};
use snip_core::{CollectingReporter, CompileOptions, Compiler, RegenerateSummary};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_regenerate_rebuilds_tree_and_drops_orphans() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    write_definition(&root.join("a"), "x.sane-snippet", &["description: X", "uuid: u1"], "x");
    write_definition(&root.join("b/c"), "y.sane-snippet", &["uuid: u2"], "y");
    fs::write(root.join("bad.sane-snippet"), "no header").unwrap();
    write_definition(root, "nouuid.sane-snippet", &["description: N"], "n");

    let stale = root.join("a/.compiled");
    fs::create_dir_all(&stale).unwrap();
    fs::write(stale.join("Old-u1.sane-snippet.json"), "{}").unwrap();
    fs::write(stale.join("Orphan-dead.sane-snippet.json"), "{}").unwrap();
    fs::write(stale.join("notes.txt"), "kept").unwrap();

    let reporter = CollectingReporter::default();
    let compiler = Compiler::new(CompileOptions::default(), &reporter);
    let summary = compiler.regenerate(root);

    assert_eq!(
        summary,
        RegenerateSummary {
            removed: 2,
            compiled: 2,
            failed: 2,
        }
    );
    assert_eq!(
        file_names(&stale),
        ["X-u1.sane-snippet.json", "notes.txt"]
    );
    assert_eq!(
        file_names(&root.join("b/c/.compiled")),
        ["y-u2.sane-snippet.json"]
    );
    assert!(!root.join(".compiled").exists());

    let messages = reporter.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().any(|m| m.contains("bad.sane-snippet")));
    assert!(messages.iter().any(|m| m.contains("nouuid.sane-snippet")));
}

#[test]
fn test_regenerate_is_repeatable() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_definition(&root.join("pkg"), "x.sane-snippet", &["uuid: u1"], "x");

    let reporter = CollectingReporter::default();
    let compiler = Compiler::new(CompileOptions::default(), &reporter);
    let first = compiler.regenerate(root);
    let second = compiler.regenerate(root);

    assert_eq!(first.compiled, 1);
    assert_eq!(first.removed, 0);
    assert_eq!(second.compiled, 1);
    assert_eq!(second.removed, 1);
    assert_eq!(
        file_names(&root.join("pkg/.compiled")),
        ["x-u1.sane-snippet.json"]
    );
}

#[test]
fn test_regenerate_empty_root() {
    let dir = tempdir().unwrap();
    let reporter = CollectingReporter::default();
    let compiler = Compiler::new(CompileOptions::default(), &reporter);

    assert_eq!(compiler.regenerate(dir.path()), RegenerateSummary::default());
}
