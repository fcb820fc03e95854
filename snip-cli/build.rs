use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree in src/main.rs, reduced to what completions need.
// Build scripts can't access src/ modules.
fn build_cli() -> Command {
    Command::new("snip")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract, template and compile editor snippets")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("extract")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("select")
                        .long("select")
                        .short('s')
                        .action(ArgAction::Append),
                )
                .arg(Arg::new("scope").long("scope"))
                .arg(Arg::new("tab-width").long("tab-width"))
                .arg(Arg::new("raw").long("raw").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("new")
                .arg(Arg::new("content").long("content"))
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("select")
                        .long("select")
                        .short('s')
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("compile").arg(
                Arg::new("paths")
                    .required(true)
                    .num_args(1..)
                    .index(1)
                    .value_hint(ValueHint::FilePath),
            ),
        )
        .subcommand(
            Command::new("regenerate").arg(
                Arg::new("root")
                    .required(true)
                    .index(1)
                    .value_hint(ValueHint::DirPath),
            ),
        )
        .subcommand(
            Command::new("show").arg(
                Arg::new("path")
                    .required(true)
                    .index(1)
                    .value_hint(ValueHint::FilePath),
            ),
        )
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();

    generate_to(Bash, &mut cmd, "snip", &outdir)?;
    generate_to(Zsh, &mut cmd, "snip", &outdir)?;
    generate_to(Fish, &mut cmd, "snip", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
