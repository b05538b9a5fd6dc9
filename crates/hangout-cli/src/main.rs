use clap::{CommandFactory, Parser, Subcommand};
use hangout_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "hangout", version, about = "Hangout Scheduler CLI")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate hangout recommendations
    Recommend(commands::recommend::RecommendArgs),
    /// Contact management
    Contact {
        #[command(subcommand)]
        action: commands::contact::ContactAction,
    },
    /// Hangout label management
    Label {
        #[command(subcommand)]
        action: commands::label::LabelAction,
    },
    /// Scheduling settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Backup, restore, and data checks
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(&config);

    let result = match cli.command {
        Commands::Recommend(args) => commands::recommend::run(args, &config),
        Commands::Contact { action } => commands::contact::run(action, &config),
        Commands::Label { action } => commands::label::run(action, &config),
        Commands::Settings { action } => commands::settings::run(action, &config),
        Commands::Data { action } => commands::data::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "hangout", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
