use clap::{Parser, Subcommand};
use std::path::PathBuf;
use testrail_harness::{
    describe_config, field_type, load_config, payload, read_input, summarize_fields,
    ResourceKind,
};
use testrail_model::Operation;
use tracing::error;

#[derive(Parser)]
#[command(name = "testrail-harness")]
#[command(about = "Inspect TestRail resource payloads and field descriptors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the body a resource would send for an operation
    Payload {
        /// Resource type of the input document
        #[arg(short, long, value_enum)]
        resource: ResourceKind,
        /// Operation name, e.g. cases.add or plans.update_entry
        #[arg(short, long)]
        operation: Operation,
        /// JSON file holding the resource (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Resolve a custom field type id
    FieldType {
        /// Numeric type id as reported by the service
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Summarize a list of custom field descriptors
    Fields {
        /// JSON file holding the descriptor array (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Only list fields configured for this project
        #[arg(short, long)]
        project: Option<u64>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Load and validate a TOML connection config
    CheckConfig {
        /// Path to the config file
        path: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        error!("Command failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}

fn run(command: Commands) -> testrail_harness::HarnessResult<()> {
    match command {
        Commands::Payload {
            resource,
            operation,
            input,
        } => {
            let input = read_input(input.as_deref())?;
            println!("{}", payload(resource, operation, &input)?);
        }
        Commands::FieldType { id } => {
            println!("{}", field_type(id));
        }
        Commands::Fields {
            input,
            project,
            json,
        } => {
            let input = read_input(input.as_deref())?;
            let fields = summarize_fields(&input, project)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&fields)?);
            } else if fields.is_empty() {
                println!("No fields found.");
            } else {
                for field in fields {
                    println!("{field}");
                }
            }
        }
        Commands::CheckConfig { path } => {
            let config = load_config(&path)?;
            println!("✓ Config is valid");
            println!("{}", describe_config(&config));
        }
    }

    Ok(())
}
