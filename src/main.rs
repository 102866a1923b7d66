use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rowstore::{InputBuffer, InputType, MetaCommand, Statement, Table};

const PROMPT: &str = "db > ";

/// Interactive in-memory record store.
#[derive(Parser, Debug)]
#[command(name = "rowstore", version, about)]
struct Args {
    /// Increase diagnostic logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) -> Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(anyhow::Error::from_boxed)
}

fn print_prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "{PROMPT}")?;
    out.flush()
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let mut table = Table::new();
    let mut input_buffer = InputBuffer::new();
    let mut reader = io::stdin().lock();
    let mut out = io::stdout().lock();

    loop {
        print_prompt(&mut out)?;
        let line = match input_buffer.read_input(&mut reader) {
            Ok(line) => line,
            Err(err) => {
                debug!(error = ?err, "input closed");
                eprintln!("{err}");
                return Ok(ExitCode::FAILURE);
            }
        };

        match InputType::parse(line) {
            InputType::Meta(MetaCommand::Exit) => return Ok(ExitCode::SUCCESS),
            InputType::Meta(MetaCommand::Unrecognized) => {
                eprintln!("Unrecognized command: '{line}'.");
            }
            InputType::Statement(input) => match Statement::prepare(input) {
                Ok(statement) => match statement.execute(&mut table, &mut out) {
                    Ok(()) => writeln!(out, "Executed.")?,
                    Err(err) => eprintln!("{err}"),
                },
                Err(err) => eprintln!("{err}"),
            },
        }
    }
}
