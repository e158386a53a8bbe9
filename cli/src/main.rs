mod logger;
mod output;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{debug, info};
use py2jl_core::{CompilationUnit, Py2JlErrorExt, compile_unit};

use output::OutputHandler;

const DEFAULT_PRELUDE: &str = "using Py2JlRuntime";

fn main() -> ExitCode {
    let cli = Command::new("py2jl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Lowers Python syntax trees into Julia source");

    let cli = setup_cli(cli);
    let matches = cli.get_matches();
    logger::init(matches.get_count("verbose"));
    dispatch_commands(&matches)
}

/// Sets up the CLI with subcommands and arguments.
fn setup_cli(cli: Command) -> Command {
    cli.arg(
        Arg::new("verbose")
            .help("Increase log output (repeat for more)")
            .short('v')
            .long("verbose")
            .action(ArgAction::Count)
            .global(true),
    )
    .subcommand(
        Command::new("build")
            .about("Lower one or more unit documents")
            .arg(
                Arg::new("input")
                    .help("Unit documents (JSON); glob patterns are expanded")
                    .required(true)
                    .num_args(1..)
                    .index(1),
            )
            .arg(
                Arg::new("output")
                    .help("Output file (single input only); defaults to stdout")
                    .short('o')
                    .long("output")
                    .value_parser(clap::value_parser!(PathBuf))
                    .value_name("FILE"),
            )
            .arg(
                Arg::new("no-line-markers")
                    .help("Do not emit source line comments")
                    .long("no-line-markers")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("prelude")
                    .help("Line placed before the lowered code; empty to omit")
                    .long("prelude")
                    .value_name("USING")
                    .default_value(DEFAULT_PRELUDE),
            )
            .arg(
                Arg::new("dump")
                    .help("Print an input stage as JSON instead of lowering")
                    .short('d')
                    .long("dump")
                    .value_parser(["ast", "scopes"])
                    .value_name("STAGE"),
            ),
    )
    .subcommand(
        Command::new("intrinsics")
            .about("Print the runtime intrinsic naming table")
            .arg(
                Arg::new("json")
                    .help("Print as JSON")
                    .long("json")
                    .action(ArgAction::SetTrue),
            ),
    )
}

/// Dispatches the command based on the parsed arguments.
fn dispatch_commands(matches: &ArgMatches) -> ExitCode {
    let mut err = OutputHandler::new(io::stderr());
    match matches.subcommand() {
        Some(("build", sub_m)) => match build(sub_m, &mut err) {
            Ok(()) => ExitCode::SUCCESS,
            Err(()) => ExitCode::FAILURE,
        },
        Some(("intrinsics", sub_m)) => {
            if sub_m.get_flag("json") {
                match output::intrinsics_json() {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        let _ = err.error(&format!("cannot serialize intrinsics: {e}"));
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("{}", output::intrinsics_table());
            }
            ExitCode::SUCCESS
        }
        _ => {
            let _ = err.warning("No valid subcommand was used. Use --help for more information.");
            ExitCode::FAILURE
        }
    }
}

/// Expands glob patterns. A pattern matching nothing is kept as a literal
/// path so the load step reports it.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>, String> {
    let mut inputs = Vec::new();
    for pattern in patterns {
        let paths =
            glob::glob(pattern).map_err(|e| format!("bad input pattern '{pattern}': {e}"))?;
        let before = inputs.len();
        for path in paths {
            inputs.push(path.map_err(|e| format!("cannot read '{pattern}': {e}"))?);
        }
        if inputs.len() == before {
            inputs.push(PathBuf::from(pattern));
        }
    }
    Ok(inputs)
}

fn build<W: io::Write>(sub_m: &ArgMatches, err: &mut OutputHandler<W>) -> Result<(), ()> {
    let patterns: Vec<String> = sub_m
        .get_many::<String>("input")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();
    let inputs = expand_inputs(&patterns).map_err(|msg| {
        let _ = err.error(&msg);
    })?;

    let output = sub_m.get_one::<PathBuf>("output");
    if output.is_some() && inputs.len() > 1 {
        let _ = err.error("--output needs exactly one input");
        return Err(());
    }

    let batch = inputs.len() > 1;
    let progress = batch.then(|| output::batch_progress(inputs.len() as u64));
    let mut failed = 0usize;

    for input in &inputs {
        if let Some(pb) = &progress {
            pb.set_message(input.display().to_string());
        }
        let result = build_one(input, sub_m, output.map(PathBuf::as_path), batch);
        if let Err(e) = result {
            failed += 1;
            match &progress {
                Some(pb) => pb.suspend(|| {
                    let _ = err.report(e.as_ref());
                }),
                None => {
                    let _ = err.report(e.as_ref());
                }
            }
        }
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if failed > 0 {
        info!("{failed} of {} unit(s) failed", inputs.len());
        return Err(());
    }
    if batch {
        let _ = err.success(&format!("lowered {} units", inputs.len()));
    }
    Ok(())
}

/// Loads, lowers and writes a single unit.
fn build_one(
    input: &Path,
    sub_m: &ArgMatches,
    output: Option<&Path>,
    batch: bool,
) -> Result<(), Box<dyn Py2JlErrorExt>> {
    let unit = CompilationUnit::load(input).map_err(|e| Box::new(e) as Box<dyn Py2JlErrorExt>)?;
    debug!("loaded {unit}");

    if let Some(stage) = sub_m.get_one::<String>("dump") {
        let dumped = match stage.as_str() {
            "ast" => serde_json::to_string_pretty(&unit.module),
            _ => serde_json::to_string_pretty(&unit.symtable),
        };
        match dumped {
            Ok(text) => println!("{text}"),
            Err(e) => log::error!("cannot dump {stage} of {}: {e}", unit.name),
        }
        return Ok(());
    }

    let mut options = unit.default_options();
    if sub_m.get_flag("no-line-markers") {
        options = options.without_line_markers();
    }
    let body = compile_unit(&unit, &options)?;
    let prelude = sub_m
        .get_one::<String>("prelude")
        .map(String::as_str)
        .unwrap_or(DEFAULT_PRELUDE);
    let text = if prelude.is_empty() {
        body
    } else {
        format!("{prelude}\n\n{body}")
    };

    let destination = match output {
        Some(path) => Some(path.to_path_buf()),
        None if batch => Some(input.with_extension("jl")),
        None => None,
    };
    match destination {
        Some(path) => {
            fs::write(&path, text).map_err(|e| write_error(&path, e))?;
            info!("wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn write_error(path: &Path, e: io::Error) -> Box<dyn Py2JlErrorExt> {
    Box::new(WriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[derive(Debug)]
struct WriteError {
    path: String,
    message: String,
}

impl Py2JlErrorExt for WriteError {
    fn level(&self) -> py2jl_core::Level {
        py2jl_core::Level::Error
    }

    fn message(&self) -> String {
        format!("cannot write output: {}", self.message)
    }

    fn issuer(&self) -> String {
        "py2jl.cli.build".to_string()
    }

    fn location(&self) -> Option<py2jl_core::Location> {
        Some(py2jl_core::Location::unit(&self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        setup_cli(Command::new("py2jl")).debug_assert();
    }

    #[test]
    fn unmatched_pattern_is_kept_literally() {
        let inputs = expand_inputs(&["definitely/not/here.json".to_string()]).unwrap();
        assert_eq!(inputs, vec![PathBuf::from("definitely/not/here.json")]);
    }

    #[test]
    fn glob_expands_to_matching_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("c.txt"), "").unwrap();
        let pattern = format!("{}/*.json", dir.path().display());
        let inputs = expand_inputs(&[pattern]).unwrap();
        assert_eq!(inputs.len(), 2);
        assert!(inputs.iter().all(|p| p.extension().unwrap() == "json"));
    }
}
