use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use logcol::engine::core::column::{read_column_from_path, write_column_to_path};
use logcol::shared::config::CONFIG;
use logcol::{BuilderOptions, ColumnBuilder, CompressionKind, Value, ValueType};

#[derive(Parser)]
#[command(name = "logcol-cli")]
#[command(about = "Build and inspect single-column files", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a byte-array column from newline-delimited text
    Build {
        /// Input file, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Output column file
        #[arg(short, long)]
        output: PathBuf,

        /// Column name stored in the metadata
        #[arg(short, long, default_value = "line")]
        name: String,

        /// Overrides the configured page size hint
        #[arg(long)]
        page_size_hint: Option<usize>,

        /// Overrides the configured compression (none, lz4, zstd)
        #[arg(long)]
        compression: Option<CompressionKind>,

        /// Overrides the configured sketch precision
        #[arg(long)]
        precision: Option<u8>,
    },
    /// Print column metadata as JSON
    Inspect {
        path: PathBuf,

        /// Also print the values
        #[arg(long)]
        values: bool,

        /// Maximum number of values to print (0 = unlimited)
        #[arg(short, long, default_value = "0")]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logcol::logging::init(&CONFIG.logging)?;

    match args.command {
        Command::Build {
            input,
            output,
            name,
            page_size_hint,
            compression,
            precision,
        } => {
            let mut options = BuilderOptions::from_settings(ValueType::ByteArray, &CONFIG);
            if let Some(hint) = page_size_hint {
                options.page_size_hint = hint;
            }
            if let Some(kind) = compression {
                options.compression = kind;
            }
            if let Some(p) = precision {
                options.statistics.sketch_precision = p;
            }

            let reader: Box<dyn BufRead> = if input == "-" {
                Box::new(BufReader::new(io::stdin()))
            } else {
                let file = File::open(&input).with_context(|| format!("opening {input}"))?;
                Box::new(BufReader::new(file))
            };

            let mut builder = ColumnBuilder::new(name, options)?;
            for (row, line) in reader.lines().enumerate() {
                let line = line.context("reading input")?;
                builder.append(row, Value::ByteArray(line.into_bytes()))?;
            }
            let column = builder.flush()?;
            write_column_to_path(&output, &column)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("{}", serde_json::to_string_pretty(&column.info)?);
        }
        Command::Inspect {
            path,
            values,
            limit,
        } => {
            let column = read_column_from_path(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&column.info)?);
            if let Some(stats) = &column.info.statistics {
                if let (Some(min), Some(max)) = (stats.min()?, stats.max()?) {
                    println!("range: [{min}, {max}]");
                }
            }
            for (i, page) in column.pages.iter().enumerate() {
                println!(
                    "page {i}: rows={} values={} bytes={}",
                    page.info.rows_count, page.info.values_count, page.info.compressed_size
                );
            }
            if values {
                let take = if limit == 0 { usize::MAX } else { limit };
                for (row, value) in column.reader().take(take).enumerate() {
                    println!("{row}\t{}", value?);
                }
            }
        }
    }
    Ok(())
}
