//! Command line driver: load a program, read its input, and print the
//! states it moves through.

mod logging;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use num::BigUint;
use tracing::{info, warn};

use fractran::{Filter, Machine, PrimeTable, Program, RegisterProgram, RegisterView, Render};

#[derive(Parser)]
#[command(name = "fractran", version, about = "Interpret a FRACTRAN program.")]
struct Cli {
    /// Path to the FRACTRAN program file.
    file_path: PathBuf,

    /// Input to the program. If not specified, will prompt the user.
    #[arg(value_parser = natural)]
    input: Option<BigUint>,

    /// Give the input as space separated exponents over the prime table.
    #[arg(long, value_name = "EXPONENTS", conflicts_with = "input")]
    registers: Option<String>,

    /// Print all the outputs without stopping and waiting for the user.
    #[arg(short, long)]
    auto: bool,

    /// How to show each state.
    #[arg(long, value_enum, default_value_t = Render::Value)]
    view: Render,

    /// Only print states whose registers match, e.g. `+0*`.
    #[arg(long, value_parser = parse_filter)]
    filter: Option<Filter>,

    /// Read the prime table from a file instead of sieving it.
    #[arg(long, value_name = "PATH")]
    primes_file: Option<PathBuf>,

    /// Sieve every prime below this for the prime table.
    #[arg(long, value_name = "N", default_value_t = 10_000)]
    prime_limit: usize,

    /// Stop after this many transitions.
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,

    /// Run the program compiled to registers.
    #[arg(long)]
    compiled: bool,

    /// Log more to stderr; repeat for more detail. `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn natural(s: &str) -> std::result::Result<BigUint, String> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err("input should be a positive integer".to_owned());
    }
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_filter(s: &str) -> std::result::Result<Filter, String> {
    s.parse().map_err(|e: fractran::Error| e.to_string())
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {

    let program = read_code(&cli.file_path)?;
    let primes = match &cli.primes_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read primes file {}", path.display()))?;
            PrimeTable::parse(&text)
                .with_context(|| format!("parse primes file {}", path.display()))?
        }
        None => PrimeTable::below(cli.prime_limit),
    };
    info!(primes = primes.len(), "loaded prime table");

    let input = match &cli.registers {
        Some(text) => {
            let exps = fractran::parse_exponents(text).context("parse --registers")?;
            fractran::encode(&exps, &primes).context("encode --registers")?
        }
        None => get_program_input(cli.input.clone())?,
    };

    let limit = cli.max_steps.map_or(usize::MAX, |n| {
        usize::try_from(n).unwrap_or(usize::MAX).saturating_add(1)
    });
    let printer = Printer {
        primes: &primes,
        filter: cli.filter.as_ref(),
        render: cli.view,
        auto: cli.auto,
    };

    if cli.compiled {
        let compiled =
            RegisterProgram::compile(&program, &primes).context("compile program to registers")?;
        let machine = compiled.construct_from(&input, &primes)?;
        let states = machine
            .take(limit)
            .map(|regs| -> Result<BigUint> { Ok(fractran::encode(&regs?, &primes)?) });
        printer.print_all(states)
    } else {
        let machine = Machine::new(&program, input);
        printer.print_all(machine.take(limit).map(Ok))
    }
}

fn read_code(path: &Path) -> Result<Program> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("read program file {}", path.display()))?;
    Program::parse(&source).with_context(|| format!("load program {}", path.display()))
}

fn get_program_input(arg_input: Option<BigUint>) -> Result<BigUint> {
    if let Some(input) = arg_input {
        return Ok(input);
    }

    print!("Program input value (positive integer) ? ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("read program input")?;
    match natural(line.trim()) {
        Ok(input) => Ok(input),
        Err(_) => bail!("Program input should be a positive integer."),
    }
}

struct Printer<'a> {
    primes: &'a PrimeTable,
    filter: Option<&'a Filter>,
    render: Render,
    auto: bool,
}

impl Printer<'_> {
    fn print_all<I>(&self, mut states: I) -> Result<()>
    where
        I: Iterator<Item = Result<BigUint>>,
    {
        if !self.auto {
            println!("You must press enter after every output to continue the program.");
        }
        println!();

        let stdout = io::stdout();
        let stdin = io::stdin();
        let end_line = if self.auto { "\n" } else { "" };

        // the input is printed on its own line; the user's enter ends the
        // later ones in interactive mode
        let Some(first) = states.next() else {
            return Ok(());
        };
        let first = first?;
        if fractran::matches(self.filter, &first, self.primes)? {
            println!("{}", RegisterView::new(&first, self.primes, self.render)?);
        }

        for value in states {
            let value = value?;
            if !fractran::matches(self.filter, &value, self.primes)? {
                continue;
            }

            let mut out = stdout.lock();
            write!(out, "{}{}", RegisterView::new(&value, self.primes, self.render)?, end_line)?;
            out.flush()?;
            drop(out);

            if !self.auto {
                let mut line = String::new();
                if stdin.lock().read_line(&mut line).context("wait for enter")? == 0 {
                    warn!("stdin closed, stopping");
                    println!();
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_must_be_digits() {
        assert_eq!(natural("72").unwrap(), BigUint::from(72u32));
        assert!(natural("").is_err());
        assert!(natural("-3").is_err());
        assert!(natural("+3").is_err());
        assert!(natural("3/2").is_err());
    }

    #[test]
    fn cli() {
        let cli = Cli::try_parse_from(["fractran", "prog.fr", "2", "-a", "--filter", "+0*", "--view", "both"])
            .unwrap();
        assert_eq!(cli.input, Some(BigUint::from(2u32)));
        assert!(cli.auto);
        assert_eq!(cli.view, Render::Both);
        assert_eq!(cli.filter.unwrap().to_string(), "+0*");
        assert_eq!(cli.verbose, 0);

        let cli = Cli::try_parse_from(["fractran", "prog.fr", "-vv", "--compiled"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.compiled);

        assert!(Cli::try_parse_from(["fractran", "prog.fr", "--filter", "x"]).is_err());
        assert!(Cli::try_parse_from(["fractran", "prog.fr", "2", "--registers", "1 0"]).is_err());
    }

    #[test]
    fn bundled_programs_load() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("programs");
        assert_eq!(read_code(&root.join("add.fr")).unwrap().to_string(), "3/2");
        assert_eq!(read_code(&root.join("mult.fr")).unwrap().len(), 6);
        assert_eq!(read_code(&root.join("primegame.fr")).unwrap().len(), 14);
    }
}
