use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use clap::{ArgAction, Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use sorensen::io_utils::{io_cli_error, simple_cli_error, sorensen_cli_error, CliError};
use sorensen::report::{format_elapsed, format_estimate};
use sorensen::{
    encode, estimate, CancelToken, Config, Decoder, Descriptor, Progress, SearchEstimate,
    SearchStats, SorensenError,
};

/// Reduce a file to its bit counts and fingerprint, or rebuild it by search.
#[derive(Parser)]
#[command(name = "sorensen", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the 24 byte descriptor of INPUT to OUTPUT.
    Compress {
        input: PathBuf,
        output: PathBuf,
        /// Print a JSON summary on stdout.
        #[arg(long)]
        json: bool,
    },
    /// Rebuild the original file from a descriptor.
    Decompress(DecompressArgs),
    /// Show the fields of a descriptor and the size of its search space.
    Inspect {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct DecompressArgs {
    input: PathBuf,
    output: PathBuf,
    /// Skip the confirmation prompt for large search spaces.
    #[arg(short, long)]
    yes: bool,
    /// Candidates between progress updates (0 disables).
    #[arg(long)]
    progress_interval: Option<u64>,
    /// Give up after this many candidates.
    #[arg(long)]
    limit: Option<u128>,
    /// Cancel the search after this many seconds.
    #[arg(long)]
    time_limit: Option<f64>,
    /// Do not draw a progress bar; progress is logged instead.
    #[arg(long)]
    no_progress: bool,
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct CompressSummary<'a> {
    input_bytes: u64,
    descriptor: &'a Descriptor,
    elapsed_ms: u128,
}

#[derive(Serialize)]
struct DecompressSummary<'a> {
    output_bytes: u64,
    estimate: &'a SearchEstimate,
    elapsed_ms: u128,
}

#[derive(Serialize)]
struct InspectSummary<'a> {
    descriptor: &'a Descriptor,
    raw: String,
    estimate: &'a SearchEstimate,
}

/// Drives an indicatif bar from decoder snapshots.
struct BarProgress(ProgressBar);

impl BarProgress {
    fn new(estimate: &SearchEstimate) -> Self {
        let bar = match estimate.candidates.and_then(|n| u64::try_from(n).ok()) {
            Some(len) => {
                let bar = ProgressBar::new(len);
                bar.set_style(
                    ProgressStyle::with_template(
                        "{spinner} [{elapsed_precise}] {wide_bar} {pos}/{len} {msg}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
                bar
            }
            None => ProgressBar::new_spinner(),
        };
        Self(bar)
    }
}

impl Progress for BarProgress {
    fn report(&mut self, stats: &SearchStats) {
        self.0
            .set_position(u64::try_from(stats.examined).unwrap_or(u64::MAX));
        self.0.set_message(format!("{:.0} candidates/s", stats.rate()));
    }

    fn finish(&mut self, _stats: &SearchStats) {
        self.0.finish_and_clear();
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(exit_code(e.as_ref()));
    }
}

fn exit_code(err: &(dyn std::error::Error + 'static)) -> i32 {
    let cancelled = err
        .downcast_ref::<CliError>()
        .and_then(|c| c.source.as_deref())
        .and_then(|s| s.downcast_ref::<SorensenError>())
        .is_some_and(|s| matches!(s, SorensenError::Cancelled { .. }));
    if cancelled {
        130
    } else {
        1
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Compress {
            input,
            output,
            json,
        } => compress(&input, &output, json),
        Command::Decompress(args) => decompress(args),
        Command::Inspect { input, json } => inspect(&input, json),
    }
}

fn compress(input: &Path, output: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let file = File::open(input).map_err(|e| io_cli_error("opening input file", input, e))?;
    let descriptor = encode(BufReader::new(file)).map_err(|e| match e {
        SorensenError::Io(io) => io_cli_error("reading input file", input, io),
        other => sorensen_cli_error("compression failed", other),
    })?;
    let out = File::create(output).map_err(|e| io_cli_error("creating output file", output, e))?;
    descriptor
        .write_to(BufWriter::new(out))
        .map_err(|e| match e {
            SorensenError::Io(io) => io_cli_error("writing output file", output, io),
            other => sorensen_cli_error("compression failed", other),
        })?;

    let elapsed = start.elapsed();
    if json {
        let summary = CompressSummary {
            input_bytes: descriptor.byte_len(),
            descriptor: &descriptor,
            elapsed_ms: elapsed.as_millis(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        eprintln!(
            "Encoded {} bytes: {} of {} bits set, fingerprint {:016x}",
            descriptor.byte_len(),
            descriptor.set_bits,
            descriptor.total_bits,
            descriptor.fingerprint
        );
        eprintln!("{}", format_elapsed(elapsed));
    }
    Ok(())
}

fn read_descriptor(input: &Path) -> Result<(Vec<u8>, Descriptor), CliError> {
    let raw = fs::read(input).map_err(|e| io_cli_error("reading input file", input, e))?;
    let descriptor = Descriptor::from_bytes(&raw)
        .map_err(|e| sorensen_cli_error("invalid descriptor", e))?;
    Ok((raw, descriptor))
}

fn confirm(prompt: &str) -> io::Result<bool> {
    eprint!("{prompt} [y/N] ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn decompress(args: DecompressArgs) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let (_, descriptor) = read_descriptor(&args.input)?;

    let mut config = Config::default();
    if let Some(interval) = args.progress_interval {
        config.progress_interval = interval;
    }
    config.candidate_limit = args.limit;
    config
        .validate()
        .map_err(|e| sorensen_cli_error("invalid arguments", e))?;

    let space = estimate(&descriptor);
    if space.exceeds(config.confirm_above) && !args.yes {
        let prompt = format!(
            "Decoding {} bytes may examine {}. Continue?",
            descriptor.byte_len(),
            format_estimate(&space)
        );
        if !confirm(&prompt)? {
            return Err(simple_cli_error("aborted: nothing was written").into());
        }
    }

    let cancel = CancelToken::new();
    if let Some(secs) = args.time_limit {
        let dur = Duration::try_from_secs_f64(secs)
            .map_err(|_| simple_cli_error("time limit must be a non-negative number of seconds"))?;
        let token = cancel.clone();
        thread::spawn(move || {
            thread::sleep(dur);
            token.cancel();
        });
    }

    let mut decoder = Decoder::new(config).with_cancel(cancel);
    if !args.no_progress && !args.json {
        decoder = decoder.with_progress(Box::new(BarProgress::new(&space)));
    }
    let data = decoder
        .decode(&descriptor)
        .map_err(|e| sorensen_cli_error("decompression failed", e))?;
    fs::write(&args.output, &data)
        .map_err(|e| io_cli_error("writing output file", &args.output, e))?;

    let elapsed = start.elapsed();
    if args.json {
        let summary = DecompressSummary {
            output_bytes: data.len() as u64,
            estimate: &space,
            elapsed_ms: elapsed.as_millis(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        eprintln!("Decoded {} bytes", data.len());
        eprintln!("{}", format_elapsed(elapsed));
    }
    Ok(())
}

fn inspect(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (raw, descriptor) = read_descriptor(input)?;
    let space = estimate(&descriptor);
    if json {
        let summary = InspectSummary {
            descriptor: &descriptor,
            raw: hex::encode(&raw),
            estimate: &space,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("record:       {}", hex::encode(&raw));
        println!("total bits:   {}", descriptor.total_bits);
        println!("set bits:     {}", descriptor.set_bits);
        println!("fingerprint:  {:016x}", descriptor.fingerprint);
        println!("search space: {}", format_estimate(&space));
    }
    Ok(())
}
