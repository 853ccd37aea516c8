use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use parz_core::codec::registry;
use parz_core::constants::DEFAULT_CHUNK_SIZE;
use parz_core::{run_compress_pipeline, Algorithm, PoolProfile};

/// Parallel chunked compressor. The output is a concatenation of
/// independently framed blocks; decompress it with the algorithm's standard
/// multi-block reader (gunzip, bzcat, xz -d, zstd -d).
#[derive(Debug, Parser)]
#[command(name = "parz", version, about = "Parallel chunked compressor")]
struct Args {
    /// Input file to compress. Reads standard input when omitted.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file. Use '-' for standard output. Defaults to the input path
    /// plus the algorithm suffix, or standard output when reading stdin.
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Compression algorithm: gz, bz2, xz or zstd.
    #[arg(short, long, default_value = "xz", value_parser = parse_algo)]
    algo: Algorithm,

    /// Number of worker threads. Defaults to the number of available cores.
    #[arg(short = 'j', long, value_name = "N")]
    jobs: Option<usize>,

    /// Chunk size in bytes fed to each worker.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Verify that the input is a structurally valid stream for the selected
    /// algorithm instead of compressing.
    #[arg(short = 't', long)]
    test: bool,
}

fn parse_algo(s: &str) -> std::result::Result<Algorithm, String> {
    registry::resolve(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(Args::parse())
}

fn run(args: Args) -> Result<()> {
    if args.chunk_size == 0 {
        bail!("chunk-size must be greater than zero");
    }

    let codec = registry::create(args.algo);

    let mut input: Box<dyn Read + Send> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin()),
    };

    if args.test {
        let name = args
            .input
            .as_ref()
            .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
        codec
            .verify(&mut *input)
            .with_context(|| format!("{name} is not a valid {} stream", args.algo))?;
        println!("{name}: valid {} stream", args.algo);
        return Ok(());
    }

    let out_path = resolve_out_path(&args);
    let mut output: Box<dyn Write> = match &out_path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let mut profile = PoolProfile::dynamic().with_chunk_size(args.chunk_size);
    if let Some(jobs) = args.jobs {
        profile = profile.with_workers(jobs);
    }

    let summary = run_compress_pipeline(input, &mut output, codec, &profile)?;
    output.flush().context("failed to flush output")?;

    info!(
        "compressed {} parts: {} bytes in, {} bytes out",
        summary.parts, summary.bytes_in, summary.bytes_out
    );
    Ok(())
}

/// `None` means standard output.
fn resolve_out_path(args: &Args) -> Option<PathBuf> {
    match (&args.out, &args.input) {
        (Some(p), _) if p.as_os_str() == "-" => None,
        (Some(p), _) => Some(p.clone()),
        (None, Some(input)) => {
            let mut name = input.clone().into_os_string();
            name.push(".");
            name.push(args.algo.suffix());
            Some(PathBuf::from(name))
        }
        (None, None) => None,
    }
}
