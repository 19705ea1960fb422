mod cli;
mod rlpl;
mod rppl;
mod repl;

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use cli::{
    exit_on_interrupt, init_logger, print_error, print_finished, print_parsed, print_parsing, print_running
};
use cacti_core::{
    environment::prelude::{Environment, Object},
    interpreter::{load_from_stream, run, tokenize_file},
    utils::prelude::Error
};

#[derive(Parser)]
#[command(name = "cacti", version, about = "Interpreter for the cacti scripting language")]
struct Cli {
    /// Print debug messages of the lexer, parser and evaluator
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prints every token of a source file
    Tokenize {
        /// Path of source file
        path: PathBuf,
    },
    /// Parses a source file and prints it in canonical form
    Parse {
        /// Path of source file
        path: PathBuf,
        /// Print ast instead of parsed source code
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
    /// Evaluates a source file and prints its result
    Run {
        /// Path of source file
        path: PathBuf,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl,
    /// Runs Read Eval Print Loop
    Repl,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logger(cli.verbose);

    let result = match cli.command {
        Command::Tokenize { path } => tokenize(path),
        Command::Parse { path, print_ast } => parse(path, print_ast),
        Command::Run { path } => run_file(path),
        Command::Rlpl => interactive(rlpl::start),
        Command::Rppl => interactive(rppl::start),
        Command::Repl => interactive(repl::start),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn tokenize(path: PathBuf) -> Result<(), Error> {
    for token in tokenize_file(&path)? {
        println!("{token}");
    }

    Ok(())
}

fn parse(path: PathBuf, print_ast: bool) -> Result<(), Error> {
    print_parsing(&path.display().to_string());
    let start = std::time::Instant::now();

    let module = load_from_stream(path)?;

    if print_ast {
        println!("{:#?}", module.program);
    } else {
        for statement in &module.program.statements {
            println!("{statement}");
        }
    }

    print_parsed(start.elapsed());

    Ok(())
}

fn run_file(path: PathBuf) -> Result<(), Error> {
    print_running(&path.display().to_string());
    let start = std::time::Instant::now();

    let module = load_from_stream(path)?;

    let mut env = Environment::new();

    match run(&module, &mut env)? {
        Object::Null => {},
        value => println!("{value}")
    }

    print_finished(start.elapsed());

    Ok(())
}

fn interactive(start: fn() -> std::io::Result<()>) -> Result<(), Error> {
    exit_on_interrupt();

    start().map_err(|err| Error::StdIo { err: err.kind() })
}
