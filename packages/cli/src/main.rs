#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the sighting map rendering tool.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};
use sighting_map_cli::config::{DatasetDefinition, default_dataset, load_dataset_toml};
use sighting_map_cli::{load_records, load_snapshot, write_frame};
use sighting_map_map::color::DomainPolicy;
use sighting_map_occurrence_models::YearSelection;
use sighting_map_pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "sighting_map_cli", about = "Species sighting map rendering tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard frame (table, chart, and map layer) for a year
    Render {
        /// Path to a dataset definition TOML (defaults to the embedded jaguar dataset)
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Occurrence CSV path (overrides the dataset definition)
        #[arg(long)]
        occurrences: Option<PathBuf>,
        /// Boundary GeoJSON path (overrides the dataset definition)
        #[arg(long)]
        boundaries: Option<PathBuf>,
        /// Year to render, or "all" for every year combined
        #[arg(long, default_value = "all")]
        year: YearSelection,
        /// Which joined totals span the color scale domain
        #[arg(long, default_value_t = DomainPolicy::default())]
        domain_policy: DomainPolicy,
        /// Species label for view titles (overrides the dataset definition)
        #[arg(long)]
        species_label: Option<String>,
        /// Directory to write `table.json`, `chart.json`, and
        /// `map_layer.json` into; `-` or omitted prints one combined
        /// JSON document to stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the selectable years in the occurrence data
    Years {
        /// Path to a dataset definition TOML (defaults to the embedded jaguar dataset)
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Occurrence CSV path (overrides the dataset definition)
        #[arg(long)]
        occurrences: Option<PathBuf>,
    },
}

fn resolve_dataset(
    dataset: Option<PathBuf>,
    occurrences: Option<PathBuf>,
    boundaries: Option<PathBuf>,
) -> Result<DatasetDefinition, Box<dyn std::error::Error>> {
    let definition = match dataset {
        Some(path) => load_dataset_toml(&path)?,
        None => default_dataset(),
    };
    Ok(definition.with_paths(occurrences, boundaries))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            dataset,
            occurrences,
            boundaries,
            year,
            domain_policy,
            species_label,
            output,
        } => {
            let start = Instant::now();

            let mut definition = resolve_dataset(dataset, occurrences, boundaries)?;
            if let Some(label) = species_label {
                definition.species_label = label;
            }

            let snapshot = load_snapshot(&definition)?;
            let mut pipeline = Pipeline::new(Arc::new(snapshot))
                .with_policy(domain_policy)
                .with_species_label(definition.species_label);
            let frame = pipeline.run(year)?;

            if !frame.join_report.is_clean() {
                log::warn!(
                    "Dropped {} sightings across {} country code(s) with no boundary",
                    frame.join_report.dropped_total,
                    frame.join_report.warnings.len()
                );
            }

            match output {
                Some(dir) if dir.as_os_str() != "-" => {
                    write_frame(&dir, &frame)?;
                    log::info!(
                        "Wrote dashboard frame for '{}' to {}",
                        frame.year_label,
                        dir.display()
                    );
                }
                _ => println!("{}", serde_json::to_string_pretty(&frame)?),
            }

            let elapsed = start.elapsed();
            log::info!("Render complete in {:.1}s", elapsed.as_secs_f64());
        }
        Commands::Years {
            dataset,
            occurrences,
        } => {
            let definition = resolve_dataset(dataset, occurrences, None)?;
            let records = load_records(&definition)?;
            for option in records.year_options() {
                println!("{option}");
            }
        }
    }

    Ok(())
}
