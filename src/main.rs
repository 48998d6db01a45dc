//! tarql - transform CSV/TSV to RDF with a SPARQL CONSTRUCT template.
//!
//! Usage:
//!   tarql people.rq people.csv
//!   tarql --tab --ntriples --dedup 1000 people.rq people.tsv
//!   cat people.csv | tarql --no-header-row people.rq

use clap::Parser;
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tarql::config::{CharOption, OutputFormat, TransformConfig};
use tarql::execution::Pipeline;
use tarql::querying::{OxigraphEvaluator, Template};
use tarql::{Error, Result};

#[derive(Parser, Debug)]
#[command(name = "tarql")]
#[command(about = "tarql CSV to RDF converter")]
struct Args {
    /// File containing a SPARQL CONSTRUCT query to be applied to every row
    query: PathBuf,

    /// CSV to be processed, omit or use '-' to read standard input
    input: Option<PathBuf>,

    /// Delimiting character of the input file (a character, 'comma' or 'tab')
    #[arg(short, long, value_parser = parse_delimiter, conflicts_with = "tab")]
    delimiter: Option<CharOption>,

    /// Input is tab-separated (TSV)
    #[arg(short, long)]
    tab: bool,

    /// Escape character of the input file (a character, 'backslash' or 'none')
    #[arg(short = 'p', long, value_parser = parse_escape, default_value = "\\")]
    escapechar: CharOption,

    /// Quote character of the input file (a character, 'singlequote', 'doublequote' or 'none')
    #[arg(long, value_parser = parse_quote, default_value = "\"")]
    quotechar: CharOption,

    /// Window size in which to remove duplicate triples
    #[arg(long)]
    dedup: Option<usize>,

    /// Emit N-Triples (default is turtle)
    #[arg(long)]
    ntriples: bool,

    /// Input file has no header row; use variable names ?a, ?b, ...
    #[arg(short = 'H', long)]
    no_header_row: bool,

    /// Write the output to a file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Abort on the first row that fails to evaluate instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Print run metrics as JSON to standard error when done
    #[arg(long)]
    stats: bool,

    /// Log progress information
    #[arg(short, long)]
    verbose: bool,
}

fn parse_delimiter(value: &str) -> std::result::Result<CharOption, String> {
    CharOption::delimiter(value).map_err(|e| e.to_string())
}

fn parse_escape(value: &str) -> std::result::Result<CharOption, String> {
    CharOption::escape(value).map_err(|e| e.to_string())
}

fn parse_quote(value: &str) -> std::result::Result<CharOption, String> {
    CharOption::quote(value).map_err(|e| e.to_string())
}

impl Args {
    fn to_config(&self) -> TransformConfig {
        TransformConfig {
            input: self.input.clone().filter(|path| path.as_os_str() != "-"),
            output: self.output.clone(),
            delimiter: self.delimiter,
            tab: self.tab,
            escape: self.escapechar,
            quote: self.quotechar,
            dedup_window: self.dedup.unwrap_or(0),
            output_format: if self.ntriples {
                OutputFormat::NTriples
            } else {
                OutputFormat::Turtle
            },
            has_header: !self.no_header_row,
            strict: self.strict,
        }
    }
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(err) = run(&args) {
        eprintln!("error: {}: {}", err.stage(), err);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.to_config();
    config.validate()?;

    let template = Template::from_file(&args.query)?;
    let evaluator = OxigraphEvaluator::new(&template)?;

    let should_stop = Arc::new(AtomicBool::new(false));
    let should_stop_clone = Arc::clone(&should_stop);
    if let Err(e) = ctrlc::set_handler(move || {
        should_stop_clone.store(true, Ordering::Relaxed);
    }) {
        warn!("Cannot install the Ctrl+C handler: {}", e);
    }

    let input: Box<dyn Read> = match &config.input {
        Some(path) => Box::new(File::open(path).map_err(|e| with_path(e, path))?),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(File::create(path).map_err(|e| with_path(e, path))?),
        None => Box::new(io::stdout().lock()),
    };

    info!("Query: {}", args.query.display());
    info!("Dedup window: {}", config.dedup_window);

    let mut pipeline = Pipeline::new(config, evaluator).with_stop_flag(should_stop);
    let metrics = pipeline.run(input, BufWriter::new(output))?;

    if args.stats {
        let json = serde_json::to_string_pretty(&metrics).map_err(io::Error::from)?;
        eprintln!("{}", json);
    }

    Ok(())
}

fn with_path(err: io::Error, path: &Path) -> Error {
    Error::Io(io::Error::new(err.kind(), format!("{}: {}", path.display(), err)))
}
