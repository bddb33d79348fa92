use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "chargescout-cli")]
#[command(about = "Charging-site optimization command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the region identifiers known to the boundary dataset.
    Regions,
    /// Recommend up to k new sites inside a region.
    Optimize {
        #[arg(long)]
        region: String,
        #[arg(short, long, default_value_t = 5)]
        k: u32,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = chargescout_core::load_app_config()?;
    let service = chargescout_data::SiteService::from_config(&config)?;

    match cli.command {
        Commands::Regions => {
            for boundary in service.regions() {
                match &boundary.display_name {
                    Some(name) => println!("{}\t{name}", boundary.region_id),
                    None => println!("{}", boundary.region_id),
                }
            }
        }
        Commands::Optimize { region, k } => {
            let selection = service.optimize(&region, k)?;
            println!("{}", serde_json::to_string_pretty(&selection)?);
        }
    }

    Ok(())
}
