//! Unarian Programming Language - CLI

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use unarian::util::logger;
use unarian::vm::display_value;
use unarian::{Library, Options, NAME, VERSION};

/// Unarian language interpreter and compiler
#[derive(Parser, Debug)]
#[command(name = "unarian")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    /// If included, load the specified Unarian source code
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Function or expression to evaluate
    #[arg(short, long, default_value = "main")]
    expr: String,

    /// Let `!` and `@` print while evaluating
    #[arg(short = 'g', long)]
    debug: bool,

    /// Maximum evaluation depth
    #[arg(short, long, default_value_t = 10_000)]
    depth: usize,

    /// Compile to the given output file (or an auto-generated one)
    #[arg(short, long, value_name = "OUT", num_args = 0..=1, conflicts_with = "input")]
    compile: Option<Option<PathBuf>>,

    /// Evaluate every integer read from stdin
    #[arg(short, long)]
    input: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        logger::init_debug();
        eprintln!("Unarian version: {}", VERSION);
    } else {
        logger::init();
    }

    let options = Options::default()
        .with_debug(args.debug)
        .with_max_depth(args.depth);

    let library = match &args.file {
        None => Library::new(),
        Some(path) if !path.exists() => bail!("Source code path {} doesn't exist.", path.display()),
        Some(path) if !path.is_file() => bail!("Source code path {} isn't a file.", path.display()),
        Some(path) => Library::load_file(path, &options)?,
    };

    let expr = library
        .parse(&args.expr, &options)
        .with_context(|| format!("Failed to parse expression: {}", args.expr))?;

    if args.compile.is_some() {
        bail!("Compilation not yet implemented.");
    }

    if args.input {
        let stdout = io::stdout();
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read stdin")?;
            let mut results = Vec::new();
            for word in line.split_whitespace() {
                let result = match word.parse::<u64>() {
                    Ok(x) => display_value(library.evaluate(&expr, x, &options)?),
                    Err(_) => "-".to_string(),
                };
                results.push(result);
            }
            let mut out = stdout.lock();
            writeln!(out, "{}", results.join(" "))?;
            out.flush()?;
        }
    } else {
        let y = library.evaluate(&expr, 0, &options)?;
        println!("{}", display_value(y));
    }

    Ok(())
}
