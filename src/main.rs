use anyfile::rw::{read, write_with, WriteOptions};
use anyfile::{Compression, FILE_HANDLERS};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "anyfile", about = "Read, convert and inspect files by extension")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read any supported file and print its content as JSON
    Show {
        input: PathBuf,
        /// Print on a single line instead of pretty-printing
        #[arg(short, long)]
        compact: bool,
    },
    /// Re-encode a file; target format and codec come from the output name
    Convert {
        input:  PathBuf,
        output: PathBuf,
        /// Compression level (gzip/bzip2 1-9, zstd 1-19; ignored for xz)
        #[arg(short, long)]
        level: Option<i32>,
        /// Pretty-print structured text output
        #[arg(short, long)]
        pretty: bool,
    },
    /// List supported formats and compression codecs
    Formats,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    match Cli::parse().command {

        // ── Show ─────────────────────────────────────────────────────────────
        Commands::Show { input, compact } => {
            let value = read(&input)?;
            if compact {
                println!("{}", serde_json::to_string(&value)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
        }

        // ── Convert ──────────────────────────────────────────────────────────
        Commands::Convert { input, output, level, pretty } => {
            let value = read(&input)?;
            write_with(&value, &output, &WriteOptions { level, pretty })?;
            println!("{} → {}", input.display(), output.display());
        }

        // ── Formats ──────────────────────────────────────────────────────────
        Commands::Formats => {
            println!("Formats:");
            for handler in FILE_HANDLERS {
                println!("  {:<8} {}", handler.format.name(), handler.extensions.join(" "));
            }
            println!("Compression:");
            for codec in [Compression::Gzip, Compression::Bzip2, Compression::Xz, Compression::Zstd] {
                println!("  {:<8} {}", codec.name(), codec.extensions().join(" "));
            }
        }
    }

    Ok(())
}
