//! Partiq Command-Line Interface
//!
//! Runs partitioning workflows over circuit files and reports what the
//! diagnostic passes see along the way.
//!
//! ```text
//! $ partiq run -i ghz5.json
//! INFO Compilation step, current CNOT count: 4
//! INFO Number of partitions: 2
//! INFO Average block size: 2.5
//! INFO Compilation step, current CNOT count: 4
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;

mod commands;
mod logging;

use commands::{inspect, run, version};
use logging::TracingConfig;

/// Partiq - partitioning quantum compiler with pipeline diagnostics
#[derive(Parser)]
#[command(name = "partiq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a workflow over a circuit
    Run {
        /// Input circuit (JSON)
        #[arg(short, long)]
        input: String,

        /// Workflow file (YAML); the default workflow is used if omitted
        #[arg(short, long)]
        workflow: Option<String>,

        /// Write the resulting circuit to this file (JSON)
        #[arg(short, long)]
        output: Option<String>,

        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
    },

    /// Report gate count and partition info without changing the circuit
    Inspect {
        /// Input circuit (JSON)
        #[arg(short, long)]
        input: String,

        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

impl Commands {
    /// Whether the command runs diagnostic passes whose output must be shown.
    fn reports_diagnostics(&self) -> bool {
        matches!(self, Commands::Run { .. } | Commands::Inspect { .. })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    TracingConfig::from_env(cli.verbose, cli.command.reports_diagnostics()).init();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            input,
            workflow,
            output,
            json,
        } => run::execute(&input, workflow.as_deref(), output.as_deref(), json).await,

        Commands::Inspect { input, json } => inspect::execute(&input, json).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
