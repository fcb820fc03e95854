use crate::common::{file_names, write_definition};
use snip_core::compile::load_artifact;
use snip_core::{CollectingReporter, CompileOptions, CompileOutcome, Compiler};
use tempfile::tempdir;

#[test]
fn test_save_compiles_next_to_definition() {
    let dir = tempdir().unwrap();
    let source = write_definition(
        dir.path(),
        "greet.sane-snippet",
        &["description: Greet", "tabTrigger: hi", "scope: text.plain", "uuid: 42"],
        "Hello ${1:world}$0",
    );
    let reporter = CollectingReporter::default();
    let compiler = Compiler::new(CompileOptions::default(), &reporter);

    let outcome = compiler.on_definition_saved(&source).expect("compile");

    let compiled = dir.path().join(".compiled");
    assert_eq!(file_names(&compiled), ["Greet-42.sane-snippet.json"]);
    match outcome {
        CompileOutcome::Compiled { path, replaced } => {
            assert_eq!(path, compiled.join("Greet-42.sane-snippet.json"));
            assert!(replaced.is_empty());
            let artifact = load_artifact(&path).unwrap();
            assert_eq!(artifact.description, "Greet");
            assert_eq!(artifact.tab_trigger.as_deref(), Some("hi"));
            assert_eq!(artifact.content, "Hello ${1:world}$0");
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert!(reporter.messages().is_empty());
}

#[test]
fn test_renamed_description_replaces_artifact() {
    let dir = tempdir().unwrap();
    let reporter = CollectingReporter::default();
    let compiler = Compiler::new(CompileOptions::default(), &reporter);

    let source = write_definition(
        dir.path(),
        "greet.sane-snippet",
        &["description: First Name", "uuid: abc"],
        "one",
    );
    compiler.on_definition_saved(&source).expect("first compile");

    write_definition(
        dir.path(),
        "greet.sane-snippet",
        &["description: Second Name", "uuid: abc"],
        "two",
    );
    let outcome = compiler.on_definition_saved(&source).expect("second compile");

    let compiled = dir.path().join(".compiled");
    assert_eq!(file_names(&compiled), ["Second-Name-abc.sane-snippet.json"]);
    let CompileOutcome::Compiled { replaced, .. } = outcome else {
        panic!("expected a compiled artifact");
    };
    assert_eq!(replaced, [compiled.join("First-Name-abc.sane-snippet.json")]);
    let artifact = load_artifact(&compiled.join("Second-Name-abc.sane-snippet.json")).unwrap();
    assert_eq!(artifact.content, "two");
}

#[test]
fn test_other_identities_are_left_alone() {
    let dir = tempdir().unwrap();
    let reporter = CollectingReporter::default();
    let compiler = Compiler::new(CompileOptions::default(), &reporter);

    let first = write_definition(dir.path(), "a.sane-snippet", &["uuid: aaa"], "a");
    let second = write_definition(dir.path(), "b.sane-snippet", &["uuid: aaaa"], "b");
    compiler.on_definition_saved(&first).unwrap();
    compiler.on_definition_saved(&second).unwrap();
    compiler.on_definition_saved(&first).unwrap();

    assert_eq!(
        file_names(&dir.path().join(".compiled")),
        ["a-aaa.sane-snippet.json", "b-aaaa.sane-snippet.json"]
    );
}

#[test]
fn test_hyphenated_identity_sharing_a_suffix_is_left_alone() {
    let dir = tempdir().unwrap();
    let reporter = CollectingReporter::default();
    let compiler = Compiler::new(CompileOptions::default(), &reporter);

    let alpha = write_definition(
        dir.path(),
        "a.sane-snippet",
        &["description: Alpha", "uuid: x-1"],
        "a",
    );
    let beta = write_definition(
        dir.path(),
        "b.sane-snippet",
        &["description: Beta", "uuid: 1"],
        "b",
    );
    compiler.on_definition_saved(&alpha).unwrap();
    let outcome = compiler.on_definition_saved(&beta).unwrap();

    let compiled = dir.path().join(".compiled");
    assert_eq!(
        file_names(&compiled),
        ["Alpha-x-1.sane-snippet.json", "Beta-1.sane-snippet.json"]
    );
    let CompileOutcome::Compiled { replaced, .. } = outcome else {
        panic!("expected a compiled artifact");
    };
    assert!(replaced.is_empty());
    let alpha_artifact = load_artifact(&compiled.join("Alpha-x-1.sane-snippet.json")).unwrap();
    assert_eq!(alpha_artifact.uuid.as_deref(), Some("x-1"));
}

#[test]
fn test_missing_uuid_writes_nothing() {
    let dir = tempdir().unwrap();
    let source = write_definition(dir.path(), "nouuid.sane-snippet", &["description: X"], "x");
    let reporter = CollectingReporter::default();
    let compiler = Compiler::new(CompileOptions::default(), &reporter);

    let outcome = compiler.on_definition_saved(&source).unwrap();

    assert_eq!(outcome, CompileOutcome::Refused);
    assert_eq!(file_names(dir.path()), ["nouuid.sane-snippet"]);
    assert_eq!(reporter.messages().len(), 1);
}

#[test]
fn test_custom_output_layout() {
    let dir = tempdir().unwrap();
    let options = CompileOptions {
        output_dir: "build".to_string(),
        source_extension: "snip".to_string(),
        artifact_extension: "snip.json".to_string(),
    };
    let reporter = CollectingReporter::default();
    let compiler = Compiler::new(options, &reporter);
    let source = write_definition(dir.path(), "x.snip", &["uuid: u"], "");

    compiler.on_definition_saved(&source).unwrap();

    assert_eq!(file_names(&dir.path().join("build")), ["x-u.snip.json"]);
}

#[test]
fn test_nested_output_dir_is_created() {
    let dir = tempdir().unwrap();
    let options = CompileOptions {
        output_dir: "build/out".to_string(),
        ..CompileOptions::default()
    };
    let reporter = CollectingReporter::default();
    let compiler = Compiler::new(options, &reporter);
    let source = write_definition(dir.path(), "x.sane-snippet", &["uuid: u"], "");

    compiler.on_definition_saved(&source).unwrap();

    assert_eq!(
        file_names(&dir.path().join("build").join("out")),
        ["x-u.sane-snippet.json"]
    );
    assert!(reporter.messages().is_empty());
}
