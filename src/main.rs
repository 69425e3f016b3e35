//! draw-netlist - Netlist graph layout
//!
//! Reads a JSON netlist, builds its atom graph and writes the laid-out
//! drawing as JSON for a renderer.
//!
//! # Usage
//!
//! ```bash
//! draw-netlist netlist.json --iterations 50 --output drawing.json
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::info;
use netlist_draw::{
    error::{NetlistError, Result},
    layout::{DEFAULT_ITERATIONS, DEFAULT_PIN_MARGIN, DEFAULT_SEED, DEFAULT_SPREAD},
    LayoutConfig, Schematic,
};

/// Lay out a netlist's atom graph
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist document (.json)
    #[arg(value_name = "NETLIST_FILE")]
    netlist_file: PathBuf,

    /// Force-directed layout steps
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Preferred distance between connected nodes
    #[arg(short, long, default_value_t = DEFAULT_SPREAD)]
    spread: f64,

    /// Seed for the initial placement
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Pin rail offset, as a fraction of the layout width
    #[arg(long, default_value_t = DEFAULT_PIN_MARGIN)]
    pin_margin: f64,

    /// Write the drawing here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log progress (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = LayoutConfig::new()
        .with_iterations(args.iterations)
        .with_spread(args.spread)
        .with_seed(args.seed)
        .with_pin_margin(args.pin_margin);

    // Parse, resolve wiring, build the graph and lay it out
    let schematic = Schematic::from_file(&args.netlist_file, &config)?;
    let json = schematic.drawing()?.to_json_pretty()?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json).map_err(|e| NetlistError::Export {
                message: format!("cannot write '{}': {}", path.display(), e),
            })?;
            info!("wrote drawing to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
