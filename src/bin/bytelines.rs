//! bytelines CLI
//!
//! Counts and deduplicates lines of large files without decoding them.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use bytelines::{ByteKeyedMap, ByteSource, Config, LineReader, ReadSource, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// bytelines CLI
#[derive(Parser, Debug)]
#[command(name = "bytelines")]
#[command(about = "Binary-safe line counting and deduplication")]
#[command(version)]
struct Args {
    /// Bucket count for the deduplication map
    #[arg(short, long, default_value = "100")]
    buckets: usize,

    /// Initial reader window size in bytes
    #[arg(short, long, default_value = "1024")]
    window: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Count lines and bytes
    Count {
        /// Input file, or - for stdin
        path: PathBuf,
    },

    /// Print distinct lines in first-seen order
    Uniq {
        /// Input file, or - for stdin
        path: PathBuf,

        /// Prefix each line with its number of occurrences
        #[arg(short, long)]
        counts: bool,
    },
}

/// First occurrence and count of a distinct line
struct LineStat {
    first_seen: u64,
    count: u64,
    line: Vec<u8>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .window_capacity(args.window)
        .scratch_size(args.window)
        .bucket_count(args.buckets)
        .build();

    let result = match &args.command {
        Commands::Count { path } => with_reader(path, &config, |reader| count(reader)),
        Commands::Uniq { path, counts } => {
            with_reader(path, &config, |reader| uniq(reader, &config, *counts))
        }
    };

    if let Err(e) = result {
        tracing::error!("bytelines failed: {}", e);
        std::process::exit(1);
    }
}

/// Open `path` (or stdin for `-`) and hand a reader to `run`
fn with_reader<F>(path: &Path, config: &Config, run: F) -> Result<()>
where
    F: FnOnce(&mut LineReader<ReadSource<Box<dyn io::Read>>>) -> Result<()>,
{
    let input: Box<dyn io::Read> = if path.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(io::BufReader::new(std::fs::File::open(path)?))
    };

    let mut reader = LineReader::with_config(ReadSource::new(input), config)?;
    let outcome = run(&mut reader);
    reader.close()?;
    outcome
}

fn count<S: ByteSource>(reader: &mut LineReader<S>) -> Result<()> {
    while reader.read_line(false)?.is_some() {}

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{} lines, {} bytes", reader.lines_read(), reader.bytes_read())?;
    Ok(())
}

fn uniq<S: ByteSource>(reader: &mut LineReader<S>, config: &Config, counts: bool) -> Result<()> {
    let mut seen: ByteKeyedMap<LineStat> = ByteKeyedMap::with_config(config)?;

    let mut index = 0u64;
    while let Some(line) = reader.read_line(false)? {
        let stat = seen.get_or_insert_with(&line, || LineStat {
            first_seen: index,
            count: 0,
            line: line.clone(),
        });
        stat.count += 1;
        index += 1;
    }

    tracing::debug!(distinct = seen.len(), total = index, "deduplicated input");

    let mut stats: Vec<&LineStat> = seen.values().collect();
    stats.sort_by_key(|s| s.first_seen);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for stat in stats {
        if counts {
            write!(out, "{:>7} ", stat.count)?;
        }
        out.write_all(&stat.line)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
