use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use whittle::{Options, whittle_with_options};

#[derive(Parser)]
#[command(name = "whittle")]
#[command(about = "Whittles vector-graphic path data down to size", long_about = None)]
struct Cli {
    /// Input file (use - for stdin)
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Output file (use - for stdout)
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Precision for coordinates (decimal places)
    #[arg(short, long, default_value = "3")]
    precision: u8,

    /// Geometric tolerance for straightening and arc fitting
    #[arg(short, long, default_value = "0.001")]
    tolerance: f64,

    /// Disable merging of compatible sibling paths
    #[arg(long)]
    no_merge_paths: bool,

    /// Disable recovering arcs from circular curve runs
    #[arg(long)]
    no_arcs: bool,

    /// Refuse merges that would print a path longer than this
    #[arg(long)]
    max_path_length: Option<usize>,

    /// Print size comparison
    #[arg(short, long)]
    stats: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let input = if cli.input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&cli.input)?
    };
    let input_len = input.len();

    let options = Options {
        precision: cli.precision,
        tolerance: cli.tolerance,
        merge_paths: !cli.no_merge_paths,
        convert_curves_to_arcs: !cli.no_arcs,
        max_merged_path_length: cli.max_path_length,
    };

    let output = whittle_with_options(&input, &options)?;
    let output_len = output.len();

    if cli.output.as_os_str() == "-" {
        io::stdout().write_all(output.as_bytes())?;
    } else {
        fs::write(&cli.output, &output)?;
    }

    if cli.stats {
        let saved = input_len.saturating_sub(output_len);
        let percent = if input_len > 0 {
            (saved as f64 / input_len as f64) * 100.0
        } else {
            0.0
        };
        eprintln!("{input_len} -> {output_len} bytes ({percent:.1}% smaller)");
    }

    Ok(())
}
