pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;

use commands::quote::QuoteArgs;

#[derive(Debug, Parser)]
#[command(
    name = "rosco",
    about = "Rosco freight desk CLI",
    long_about = "Price shipments, look up reference tracking numbers, and inspect runtime readiness.",
    after_help = "Examples:\n  rosco quote --origin-region Europe --destination-region Africa \\\n    --origin-city Hamburg --destination-city Nairobi --shipment-type Parcel \\\n    --weight 10 --speed Standard\n  rosco track GS123456\n  rosco doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Estimate a shipping quote and print the pricing breakdown")]
    Quote(QuoteCommand),
    #[command(about = "Look up a shipment in the tracking reference table")]
    Track {
        #[arg(help = "Tracking number (case-insensitive, surrounding whitespace ignored)")]
        tracking_number: String,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, reference data, and the pricing engine")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

#[derive(Debug, Args)]
struct QuoteCommand {
    #[arg(long, help = "Europe | North America | South America | Africa")]
    origin_region: Option<String>,
    #[arg(long)]
    destination_region: Option<String>,
    #[arg(long, help = "Origin city or port")]
    origin_city: Option<String>,
    #[arg(long, help = "Destination city or port")]
    destination_city: Option<String>,
    #[arg(long, help = "Parcel | Pallet | Container")]
    shipment_type: Option<String>,
    #[arg(long, help = "Weight in kilograms")]
    weight: Option<String>,
    #[arg(long, help = "Express | Standard | Economy")]
    speed: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl From<QuoteCommand> for QuoteArgs {
    fn from(command: QuoteCommand) -> Self {
        Self {
            origin_region: command.origin_region,
            destination_region: command.destination_region,
            origin_city: command.origin_city,
            destination_city: command.destination_city,
            shipment_type: command.shipment_type,
            weight: command.weight,
            speed: command.speed,
            notes: command.notes,
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Quote(args) => commands::quote::run(args.into()),
        Command::Track { tracking_number } => commands::track::run(&tracking_number),
        Command::Config => commands::config::run(),
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
