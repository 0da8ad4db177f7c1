use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod util;

#[derive(Parser)]
#[command(name = "protoforge", about = "Prototype document and component schema utilities")]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a game repository and list component schemas
    Scan(commands::scan::Args),
    /// Show the schema of one component
    Lookup(commands::lookup::Args),
    /// Parse a prototype file and show its resolved prototypes
    Inspect(commands::inspect::Args),
    /// Run the pre-save check on every prototype in a file
    Validate(commands::validate::Args),
    /// Print one resolved prototype as YAML
    Emit(commands::emit::Args),
    /// Show or change stored settings
    Settings(commands::settings::Args),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Scan(args) => commands::scan::run(args),
        Commands::Lookup(args) => commands::lookup::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Emit(args) => commands::emit::run(args),
        Commands::Settings(args) => commands::settings::run(args),
    }
}
