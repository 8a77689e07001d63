//! Population Viewer - world population by zone
//!
//! Shows the population file as a line chart per zone and a zone map, with
//! zone filtering and CSV export.
//!
//! Usage:
//!   popmonde                                  # open the viewer
//!   popmonde --zone Europe                    # open with a zone preselected
//!   popmonde --export out.csv --zone Asie     # write filtered CSV and exit
//!   popmonde --render-png chart.png --seed 7  # write chart image and exit
//!   popmonde --list-zones                     # print zones and exit

mod charts;
mod config;
mod data;
mod gui;
mod map;

use anyhow::{Context, Result};
use charts::{ColorSource, StaticChartRenderer};
use clap::Parser;
use config::AppConfig;
use data::{zones, DataLoader, Exporter, SeriesBuilder};
use eframe::egui;
use gui::PopulationApp;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// World population viewer.
#[derive(Parser, Debug)]
#[command(name = "popmonde", about = "World population chart, map and export")]
struct Args {
    /// Population CSV (zone,year,population). Overrides the config file.
    #[arg(short, long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Only show / export this zone.
    #[arg(short, long)]
    zone: Option<String>,

    /// Seed for series colors, keeps colors stable between redraws.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the filtered data as CSV and exit.
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Render the chart to a PNG and exit.
    #[arg(long, value_name = "PATH")]
    render_png: Option<PathBuf>,

    /// Print the distinct zones and exit.
    #[arg(long)]
    list_zones: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn is_headless(&self) -> bool {
        self.export.is_some() || self.render_png.is_some() || self.list_zones
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(data) = &args.data {
        config.data_path = data.clone();
    }
    if args.seed.is_some() {
        config.color_seed = args.seed;
    }
    Ok(config)
}

fn run_headless(args: &Args, config: &AppConfig) -> Result<()> {
    let loader = DataLoader::new(config.data_path.clone());
    let records = loader
        .load()
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    let zone = args.zone.as_deref();

    if args.list_zones {
        for zone in zones::distinct_zones(&records) {
            println!("{}", zone);
        }
    }

    if let Some(path) = &args.export {
        let count = Exporter::write(&records, zone, path)?;
        println!("Exported {} rows to {}", count, path.display());
    }

    if let Some(path) = &args.render_png {
        let dataset =
            SeriesBuilder::build(&records, zone, &ColorSource::from_seed(config.color_seed));
        let [width, height] = config.image_size;
        StaticChartRenderer::render_png(&dataset, path, width, height)?;
        println!("Chart saved to {}", path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(&args)?;

    if args.is_headless() {
        return run_headless(&args, &config);
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([900.0, 600.0])
            .with_title("Population mondiale"),
        ..Default::default()
    };

    let zone = args.zone.clone();
    eframe::run_native(
        "Population mondiale",
        options,
        Box::new(move |cc| Ok(Box::new(PopulationApp::new(cc, config, zone)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {}", e))
}
