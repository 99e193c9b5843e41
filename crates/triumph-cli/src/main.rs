use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "triumph-cli", version, about = "Triumph streak tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Streak control
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Setback history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Setback type management
    Types {
        #[command(subcommand)]
        action: commands::types::TypesAction,
    },
    /// Setback report for a year or month
    Report(commands::report::ReportArgs),
    /// Analytics and a coaching message for the current streak
    Coach,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("TRIUMPH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Streak { action } => commands::streak::run(action),
        Commands::History { action } => commands::history::run(action),
        Commands::Types { action } => commands::types::run(action),
        Commands::Report(args) => commands::report::run(args),
        Commands::Coach => commands::coach::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
