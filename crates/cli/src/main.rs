//! Trace-driven cache simulator CLI.
//!
//! This binary wraps `cachesim-core`. It performs:
//! 1. **Configuration:** Defaults, then an optional JSON config file, then geometry flags.
//! 2. **Trace input:** Hexadecimal addresses from a file or stdin, whitespace separated.
//!    The first token that is not an address ends the trace.
//! 3. **Output:** A geometry banner, one line per access unless `--quiet`, and the
//!    hit-rate summary (optionally as JSON, optionally followed by a full report).
//!
//! Configuration errors are reported before any simulation output and exit with code 1.

use clap::Parser;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use cachesim_core::{AccessEvent, Config, ConfigError, Simulator, TraceEnd, TraceReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator (LRU)",
    long_about = "Simulate a set-associative LRU cache over a trace of hexadecimal addresses.\n\nGeometry comes from built-in defaults (8-bit addresses, 4-byte blocks, 4 sets, 8 ways),\nthen --config, then the individual geometry flags.\n\nExamples:\n  cachesim --trace traces/simple.txt\n  echo '0 0 4 0' | cachesim --quiet\n  cachesim --config l1.json --ways 4 --json < trace.txt"
)]
struct Cli {
    /// Trace file of hexadecimal addresses (reads stdin when omitted).
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address width in bits.
    #[arg(long)]
    address_bits: Option<u32>,

    /// log2 of the block size.
    #[arg(long)]
    offset_bits: Option<u32>,

    /// log2 of the number of sets.
    #[arg(long)]
    index_bits: Option<u32>,

    /// Lines per set.
    #[arg(long)]
    ways: Option<usize>,

    /// Suppress the per-access lines.
    #[arg(short, long)]
    quiet: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,

    /// Print the full statistics report after the summary.
    #[arg(long)]
    stats: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    });

    let result = open_trace(cli.trace.as_ref())
        .map_err(Box::<dyn Error>::from)
        .and_then(|input| {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            run(&cli, &config, TraceReader::new(input), &mut out)
        });
    if let Err(e) = result {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Builds the run configuration from defaults, the config file, and flags.
///
/// # Arguments
///
/// * `cli` - Parsed command line.
///
/// # Returns
///
/// A validated configuration, or the first configuration error found.
fn resolve_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let geometry = &mut config.cache;
    if let Some(bits) = cli.address_bits {
        geometry.address_bits = bits;
    }
    if let Some(bits) = cli.offset_bits {
        geometry.block_offset_bits = bits;
    }
    if let Some(bits) = cli.index_bits {
        geometry.set_index_bits = bits;
    }
    if let Some(ways) = cli.ways {
        geometry.associativity = ways;
    }
    if cli.quiet {
        config.general.verbose = false;
    }

    config.cache.validate()?;
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

/// Opens the trace source: the given file, or stdin.
///
/// # Errors
///
/// Fails if the trace file cannot be opened; the message names the file.
fn open_trace(path: Option<&PathBuf>) -> io::Result<Box<dyn BufRead>> {
    let Some(path) = path else {
        return Ok(Box::new(io::stdin().lock()));
    };
    let file = File::open(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("could not read trace file '{}': {e}", path.display()),
        )
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Runs the simulation over `trace` and writes its output to `out`.
///
/// Output order is the banner, one line per access when verbose, the summary
/// (plain or JSON), and the statistics report when requested. A trace that ends
/// at a malformed token still gets a summary of the accesses read before it.
///
/// # Arguments
///
/// * `cli` - Parsed command line (output format flags).
/// * `config` - Validated configuration.
/// * `trace` - Address source.
/// * `out` - Destination for everything the run prints.
fn run<R: BufRead>(
    cli: &Cli,
    config: &Config,
    mut trace: TraceReader<R>,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let mut sim = Simulator::new(config.cache)?;
    writeln!(out, "{}", config.cache)?;

    let verbose = config.general.verbose;
    let mut write_error: Option<io::Error> = None;
    let mut print_event = |event: &AccessEvent| {
        if verbose && write_error.is_none() {
            if let Err(e) = writeln!(out, "{event}") {
                write_error = Some(e);
            }
        }
    };

    for address in trace.by_ref() {
        let event = sim.access(address);
        print_event(&event);
    }
    if let Some(e) = write_error {
        return Err(e.into());
    }

    let stats = *sim.stats();
    let summary = sim.finish();

    if let Some(TraceEnd::Malformed(token)) = trace.end() {
        tracing::info!(%token, "trace ended at malformed token");
    }

    if cli.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        writeln!(out, "{summary}")?;
    }
    if cli.stats {
        stats.write_report(out)?;
    }
    out.flush()?;
    Ok(())
}
