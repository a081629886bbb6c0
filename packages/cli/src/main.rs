#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line tool for proportional symbol maps.
//!
//! Lists the registered datasets, prints a dataset's attribute sequence
//! and scale baseline, writes styled marker `GeoJSON` for any position in
//! the sequence, steps through the sequence interactively, or starts the
//! map server.

mod stepper;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use prop_map_loader::registry::all_datasets;
use prop_map_session::MapSession;
use prop_map_session::config::{DatasetSelection, MapConfig};
use prop_map_session::controls::ControlEvent;
use prop_map_session::geojson_renderer::GeoJsonRenderer;
use prop_map_symbols_models::DataSource;

#[derive(Parser)]
#[command(name = "prop_map", about = "Proportional symbol map toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered datasets
    Datasets,
    /// Print the attribute sequence and scale baseline of a dataset
    Attributes(MapArgs),
    /// Write the styled markers as `GeoJSON`
    Render {
        #[command(flatten)]
        map: MapArgs,
        /// Slider position to render (defaults to the first attribute)
        #[arg(short, long)]
        index: Option<i64>,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Step through the attribute sequence interactively
    Step(MapArgs),
    /// Start the map server
    Serve {
        /// Map config file
        #[arg(short, long, default_value = "prop_map.toml")]
        config: PathBuf,
        /// Prompt for the dataset, bind address, and port before starting
        #[arg(short, long)]
        interactive: bool,
    },
}

/// Selects the map to work on.
#[derive(Args)]
struct MapArgs {
    /// Map config file
    #[arg(short, long, default_value = "prop_map.toml")]
    config: PathBuf,
    /// Registered dataset id, instead of the config file's dataset
    #[arg(short, long)]
    dataset: Option<String>,
    /// Local `GeoJSON` file to read instead of the dataset's source
    #[arg(long)]
    data: Option<PathBuf>,
}

impl MapArgs {
    fn map_config(&self) -> Result<MapConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.dataset {
            Some(id) => MapConfig::for_dataset(id),
            None => MapConfig::load_from_file(&self.config)?,
        };

        if let Some(data) = &self.data {
            let mut dataset = config.dataset.resolve()?;
            dataset.source = DataSource::File {
                path: data.display().to_string(),
            };
            config.dataset = DatasetSelection::Inline(dataset);
        }

        Ok(config)
    }

    async fn load(&self) -> Result<MapSession<GeoJsonRenderer>, Box<dyn std::error::Error>> {
        let config = self.map_config()?;
        Ok(MapSession::load(&config, GeoJsonRenderer::new()).await?)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    match cli.command {
        Commands::Datasets => {
            for dataset in all_datasets() {
                println!("{:<26} {:<13} {}", dataset.id, dataset.kind, dataset.name);
            }
        }
        Commands::Attributes(args) => {
            let session = args.load().await?;
            let Some(attributes) = session.attributes() else {
                println!("{} is a points-only dataset", session.dataset().id);
                return Ok(());
            };
            for (i, name) in attributes.iter().enumerate() {
                println!("{i:>3}  {name}");
            }
            if let Some(baseline) = session.baseline() {
                println!("baseline: {}", baseline.value());
            }
        }
        Commands::Render { map, index, output } => {
            let mut session = map.load().await?;
            if let Some(value) = index {
                session.handle(ControlEvent::SliderInput { value })?;
            }

            let json =
                serde_json::to_string_pretty(&session.renderer().to_feature_collection())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    log::info!(
                        "Wrote {} markers to {}",
                        session.renderer().markers().len(),
                        path.display()
                    );
                }
                None => println!("{json}"),
            }
        }
        Commands::Step(args) => {
            let mut session = args.load().await?;
            stepper::run(&mut session)?;
        }
        Commands::Serve {
            config,
            interactive,
        } => {
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(move || {
                let system = actix_web::rt::System::new();
                if interactive {
                    system.block_on(prop_map_server::interactive::run(&config))
                } else {
                    system.block_on(prop_map_server::run_server(&config))
                }
            })
            .await??;
        }
    }

    Ok(())
}
