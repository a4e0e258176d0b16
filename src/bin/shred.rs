//! shred: Flatten JSON or XML documents into path-named attributes
//!
//! Usage:
//!   # Read from file, output to stdout
//!   shred data.json
//!
//!   # Read from stdin, output to stdout
//!   echo '{"id": 1, "posts": [{"id": 10}]}' | shred
//!
//!   # Shred an XML document
//!   shred --format xml order.xml
//!
//!   # Process NDJSON, one attribute object per line
//!   shred --ndjson events.jsonl

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use shredder::shred::{ArrayPolicy, AttributeWriter, NullPolicy, ShredConfig};
use shredder::{shred_ndjson, DocumentFormat, Outcome, Record, ShredProcessor, ShredderConfig};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "shred")]
#[command(about = "Flatten nested JSON or XML into path-named attributes", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Expected format of the input document
    #[arg(long, value_enum, ignore_case = true, default_value_t = DocumentFormat::Json)]
    format: DocumentFormat,

    /// Process newline-delimited JSON (one JSON object per line)
    #[arg(long)]
    ndjson: bool,

    /// Separator placed between path segments (default: "_")
    #[arg(long)]
    separator: Option<String>,

    /// How null values are written
    #[arg(long, value_enum, default_value_t = NullPolicy::Empty)]
    null: NullPolicy,

    /// Fail on array elements that are not objects instead of indexing them
    #[arg(long)]
    strict_arrays: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Build config
    let mut config = ShredConfig {
        null_policy: args.null,
        ..ShredConfig::default()
    };
    if let Some(sep) = args.separator {
        config.separator = sep;
    }
    if args.strict_arrays {
        config.array_policy = ArrayPolicy::ObjectsOnly;
    }

    let reader = if let Some(file_path) = &args.input {
        let file = File::open(file_path).with_context(|| format!("Failed to open {}", file_path))?;
        Box::new(BufReader::new(file)) as Box<dyn BufRead>
    } else {
        Box::new(BufReader::new(std::io::stdin())) as Box<dyn BufRead>
    };

    let mut writer = AttributeWriter::new(std::io::stdout().lock());

    let failures = if args.ndjson {
        if args.format != DocumentFormat::Json {
            bail!("--ndjson is only supported with --format json");
        }
        shred_ndjson(reader, &mut writer, config)?
    } else {
        shred_single(reader, args.format, config, &mut writer)?
    };

    info!(written = writer.written(), failures, "done");

    if failures > 0 {
        bail!("{} record(s) routed to failure", failures);
    }
    Ok(())
}

/// Shred the whole input as one document
fn shred_single<W: std::io::Write>(
    mut reader: Box<dyn BufRead>,
    format: DocumentFormat,
    config: ShredConfig,
    writer: &mut AttributeWriter<W>,
) -> Result<usize> {
    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .context("Failed to read input")?;

    let processor = ShredProcessor::new(ShredderConfig {
        format,
        shred: config,
    });

    let failures = match processor.process(Record::new(content)) {
        Outcome::Success(record) => {
            writer.write_attributes(&record.attributes)?;
            0
        }
        Outcome::Failure { .. } => 1,
    };

    writer.flush()?;
    Ok(failures)
}
