// Command-line interface for sane snippets
//
// This binary exposes the snippet toolchain outside of an editor: extracting a
// snippet from selections in a file, printing fresh definition templates, and
// compiling definitions into the artifacts a snippet engine loads.
//
// Usage:
//  snip extract <file> --select <begin>..<end> [--select ...]  - Extract a snippet template
//  snip new [--content <text> | --from <file> --select ...]    - Print new definition templates
//  snip compile <file>...                                      - Compile definitions (the save hook)
//  snip regenerate <root>                                      - Rebuild every artifact under root
//  snip show <artifact>                                        - Print a compiled artifact as a definition
//
// Selections are character offsets. A single offset (`--select 12`) is a caret.
//
// Configuration comes from the embedded defaults, then `snip.toml` in the current
// directory if present, then the file given with --config.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use snip_config::{Loader, SnipConfig};
use snip_core::compile::load_artifact;
use snip_core::extract::escape_literal;
use snip_core::template::extracted_snippet_template;
use snip_core::{
    extract, new_snippet_template, templates_for_selections, CompileOptions, CompileOutcome,
    Compiler, ExtractOptions, Region, Reporter, TemplateDefaults, TextBuffer,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Reports errors to stderr, where the user sees them.
struct StderrReporter;

impl Reporter for StderrReporter {
    fn report_error(&self, message: &str) {
        eprintln!("Error: {message}");
    }
}

/// Parse `<begin>..<end>` or a single caret offset.
fn parse_selection(raw: &str) -> Result<Region, String> {
    let parse_offset = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid offset '{s}' in selection '{raw}'"))
    };

    match raw.split_once("..") {
        Some((begin, end)) => Ok(Region::new(parse_offset(begin)?, parse_offset(end)?)),
        None => parse_offset(raw).map(Region::caret),
    }
}

fn build_cli() -> Command {
    Command::new("snip")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract, template and compile editor snippets")
        .long_about(
            "snip turns selections into snippet templates and compiles snippet\n\
            definition files into the records a snippet engine loads.\n\n\
            Commands:\n  \
            - extract:    Build a snippet template from selections in a file\n  \
            - new:        Print a fresh definition template\n  \
            - compile:    Compile definition files next to their source\n  \
            - regenerate: Rebuild every compiled artifact under a directory\n\n\
            Examples:\n  \
            snip extract main.rs --select 10..14 --select 30..34\n  \
            snip new --content 'println!(\"hi\");'\n  \
            snip compile greet.sane-snippet\n  \
            snip regenerate ~/snippets",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a snip.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .global(true),
        )
        .subcommand(
            Command::new("extract")
                .about("Extract a snippet template from selections in a file")
                .long_about(
                    "Turn the selected regions of a file into a snippet template.\n\n\
                    Every non-empty selection becomes a numbered placeholder; text between\n\
                    selections is kept literally. Carets on the edge of the selected span only\n\
                    mark where extraction starts and stops.\n\n\
                    The template is wrapped in a definition header with a fresh uuid unless\n\
                    --raw is given.\n\n\
                    Examples:\n  \
                    snip extract page.html --select 9 --select 20..24 --select 69\n  \
                    snip extract page.html --select 9..69 --raw",
                )
                .arg(
                    Arg::new("path")
                        .help("File to extract from")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("select")
                        .long("select")
                        .short('s')
                        .value_name("BEGIN..END")
                        .help("Selection as character offsets; a single offset is a caret")
                        .required(true)
                        .action(ArgAction::Append)
                        .value_parser(parse_selection),
                )
                .arg(
                    Arg::new("scope")
                        .long("scope")
                        .value_name("NAMES")
                        .help("Space separated scope names at the selection, outermost first")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("tab-width")
                        .long("tab-width")
                        .value_name("N")
                        .help("Tab width used to measure indentation (defaults to config)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("raw")
                        .long("raw")
                        .help("Print only the extracted body, without a header")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("new")
                .about("Print a new definition template")
                .long_about(
                    "Print a definition template with a fresh uuid.\n\n\
                    With --from, one template is printed per non-empty selection, each\n\
                    holding the selected text as its body.\n\n\
                    Examples:\n  \
                    snip new\n  \
                    snip new --content 'echo $HOME'\n  \
                    snip new --from notes.txt --select 0..12 --select 40..52",
                )
                .arg(
                    Arg::new("content")
                        .long("content")
                        .value_name("TEXT")
                        .help("Literal body text (defaults to an empty `$0` body)")
                        .conflicts_with("from")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_name("PATH")
                        .help("File whose selections become template bodies")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("select")
                        .long("select")
                        .short('s')
                        .value_name("BEGIN..END")
                        .help("Selection in the --from file")
                        .requires("from")
                        .action(ArgAction::Append)
                        .value_parser(parse_selection),
                ),
        )
        .subcommand(
            Command::new("compile")
                .about("Compile definition files")
                .long_about(
                    "Compile each definition into its artifact, as an editor does on save.\n\n\
                    The artifact is written to the hidden output folder next to the\n\
                    definition, replacing any artifact carrying the same uuid.",
                )
                .arg(
                    Arg::new("paths")
                        .help("Definition files")
                        .required(true)
                        .num_args(1..)
                        .index(1)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("regenerate")
                .about("Rebuild every compiled artifact under a directory")
                .arg(
                    Arg::new("root")
                        .help("Directory to sweep")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::DirPath),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Print a compiled artifact as a definition")
                .arg(
                    Arg::new("path")
                        .help("Compiled artifact")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    init_logging(&matches);
    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("extract", sub_matches)) => handle_extract_command(sub_matches, &config),
        Some(("new", sub_matches)) => handle_new_command(sub_matches, &config),
        Some(("compile", sub_matches)) => {
            let paths: Vec<&PathBuf> = sub_matches
                .get_many::<PathBuf>("paths")
                .map(|paths| paths.collect())
                .unwrap_or_default();
            handle_compile_command(&paths, &config);
        }
        Some(("regenerate", sub_matches)) => {
            let root = sub_matches
                .get_one::<PathBuf>("root")
                .expect("root is required");
            handle_regenerate_command(root, &config);
        }
        Some(("show", sub_matches)) => {
            let path = sub_matches
                .get_one::<PathBuf>("path")
                .expect("path is required");
            handle_show_command(path);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(matches: &ArgMatches) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if matches.get_flag("verbose") {
        builder.filter_level(log::LevelFilter::Debug);
    } else if matches.get_flag("quiet") {
        builder.filter_level(log::LevelFilter::Error);
    }
    builder.target(env_logger::Target::Stderr).init();
}

/// Handle the extract command
fn handle_extract_command(matches: &ArgMatches, config: &SnipConfig) {
    let path = matches
        .get_one::<String>("path")
        .expect("path is required");
    let selections = selections_arg(matches);
    let scope = matches
        .get_one::<String>("scope")
        .cloned()
        .unwrap_or_default();
    let tab_width = matches
        .get_one::<usize>("tab-width")
        .copied()
        .unwrap_or(config.extract.tab_width);

    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let buffer = TextBuffer::new(&source)
        .with_tab_width(tab_width)
        .with_scope(scope.clone())
        .with_selections(selections)
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });

    let contents = extract(&buffer, &ExtractOptions::from(&config.extract)).unwrap_or_else(|e| {
        eprintln!("Extraction error: {e}");
        std::process::exit(1);
    });

    if matches.get_flag("raw") {
        println!("{contents}");
    } else {
        println!("{}", extracted_snippet_template(&contents, &scope));
    }
}

/// Handle the new command
fn handle_new_command(matches: &ArgMatches, config: &SnipConfig) {
    let defaults = TemplateDefaults::from(config.template.clone());

    let Some(path) = matches.get_one::<String>("from") else {
        let body = matches
            .get_one::<String>("content")
            .map(|content| escape_literal(content));
        println!("{}", new_snippet_template(&defaults, body.as_deref()));
        return;
    };

    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });
    let buffer = TextBuffer::new(&source)
        .with_selections(selections_arg(matches))
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });

    let templates = templates_for_selections(&buffer, &defaults);
    println!("{}", templates.join("\n\n"));
}

/// Handle the compile command
fn handle_compile_command(paths: &[&PathBuf], config: &SnipConfig) {
    let reporter = StderrReporter;
    let compiler = Compiler::new(compile_options(config), &reporter);
    let mut failed = false;

    for path in paths {
        match compiler.on_definition_saved(path) {
            Ok(CompileOutcome::Compiled { path: output, .. }) => {
                println!("{} -> {}", path.display(), output.display());
            }
            Ok(CompileOutcome::Ignored) => {
                eprintln!(
                    "Skipping '{}': not a .{} file",
                    path.display(),
                    compiler.options().source_extension
                );
            }
            // Refusals and errors were already reported.
            Ok(CompileOutcome::Refused) | Err(_) => failed = true,
        }
    }

    if failed {
        std::process::exit(1);
    }
}

/// Handle the regenerate command
fn handle_regenerate_command(root: &Path, config: &SnipConfig) {
    if !root.is_dir() {
        eprintln!("Error: '{}' is not a directory", root.display());
        std::process::exit(1);
    }

    let reporter = StderrReporter;
    let compiler = Compiler::new(compile_options(config), &reporter);
    let summary = compiler.regenerate(root);

    println!(
        "removed {}, compiled {}, failed {}",
        summary.removed, summary.compiled, summary.failed
    );
    if summary.failed > 0 {
        std::process::exit(1);
    }
}

/// Handle the show command
fn handle_show_command(path: &Path) {
    let definition = load_artifact(path).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    print!("{}", definition.to_source());
}

fn selections_arg(matches: &ArgMatches) -> Vec<Region> {
    matches
        .get_many::<Region>("select")
        .map(|regions| regions.copied().collect())
        .unwrap_or_default()
}

fn compile_options(config: &SnipConfig) -> CompileOptions {
    CompileOptions::from(config.compile.clone())
}

fn load_cli_config(explicit_path: Option<&str>) -> SnipConfig {
    let loader = Loader::new().with_optional_file("snip.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
