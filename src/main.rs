use std::{fs, process::ExitCode};

use clap::Parser;
use shellexpr::interpreter::{core::Interpreter, evaluator::core::Outcome};
use tracing_subscriber::EnvFilter;

/// shellexpr runs single-line expressions such as `console.log("hi");`
/// against a small host environment.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells shellexpr to treat the argument as a path and run each
    /// non-empty line of the file.
    #[arg(short, long)]
    file: bool,

    /// Enables debug logging of the scan and the reductions.
    #[arg(short, long)]
    verbose: bool,

    /// Suppresses the report printed for expressions that end without an
    /// invocation.
    #[arg(short, long)]
    quiet: bool,

    /// The expression to run, or a path with `--file`.
    #[arg(default_value = "console.log(\"Hello world!\"); \n")]
    contents: String,
}

fn install_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                     .with_writer(std::io::stderr)
                                     .try_init();
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Completed(tokens) => {
            let text = tokens.iter().map(ToString::to_string).collect::<String>();
            println!("{text}");
        },
        Outcome::Assigned { name } => println!("{name} bound"),
        Outcome::Invoked(_) => {},
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    install_tracing(args.verbose);

    let lines = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script.lines()
                                .filter(|line| !line.trim().is_empty())
                                .map(str::to_string)
                                .collect(),
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        vec![args.contents]
    };

    let mut interpreter = Interpreter::new();
    for line in &lines {
        match interpreter.run(line) {
            Ok(outcome) => {
                if !args.quiet {
                    report(&outcome);
                }
            },
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            },
        }
    }

    ExitCode::SUCCESS
}
