//! EffectInk command-line tool.
//!
//! ```bash
//! # Rescale an effect list authored at 48px for a 16px preview
//! effectink normalize --from 48 --to 16 --input effects.json
//!
//! # Render-bounds padding an effect list needs
//! effectink spread --input effects.json
//!
//! # Run layout passes on a text node and report the instance geometry
//! effectink preview --text "Title" --font-size 24 --resize 48 --input effects.json
//! ```
//!
//! Effect lists are JSON arrays read from `--input`, or stdin when omitted.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "effectink")]
#[command(about = "Inspect and rescale layered text effects")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Effect list JSON file (default: stdin)
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Engine configuration JSON file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rescale effects from one font size to another
    Normalize {
        /// Font size the effects were authored at
        #[arg(long)]
        from: f64,
        /// Font size to rescale to
        #[arg(long)]
        to: f64,
    },

    /// Print the [top, right, bottom, left] spread of an effect list
    Spread,

    /// Simulate layout passes and report instance geometry
    Preview {
        /// Text content
        #[arg(long, default_value = "Text")]
        text: String,
        /// Font size for the first layout pass
        #[arg(long)]
        font_size: Option<f64>,
        /// Font size for a second layout pass
        #[arg(long)]
        resize: Option<f64>,
        /// Draw as if exporting
        #[arg(long)]
        export: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match commands::run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
