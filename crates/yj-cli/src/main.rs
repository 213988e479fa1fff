//! CLI frontend for the Yijing divination engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "yj",
    about = "Yijing divination: cast a hexagram and read its interpretation",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question and cast a hexagram
    Cast {
        /// The question to divine
        question: String,

        /// RNG seed for a reproducible cast
        #[arg(short, long)]
        seed: Option<u64>,

        /// Skip the AI provider and use the offline reading
        #[arg(long)]
        offline: bool,

        /// Interpretation cache file
        #[arg(long)]
        cache: Option<PathBuf>,

        /// History file to append the reading to
        #[arg(long)]
        history: Option<PathBuf>,

        /// Pause between revealed lines, in milliseconds
        #[arg(long, default_value = "400")]
        delay: u64,

        /// Print the reading as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List all 64 hexagrams in King Wen order
    List,

    /// Show the judgment and line texts of a hexagram
    Show {
        /// King Wen number (1-64)
        number: u32,
    },

    /// AI study notes for one hexagram
    Study {
        /// King Wen number (1-64)
        number: u32,

        /// Skip the AI provider and use the offline notes
        #[arg(long)]
        offline: bool,

        /// Interpretation cache file
        #[arg(long)]
        cache: Option<PathBuf>,
    },

    /// Export past readings
    History {
        /// Output format: markdown, text
        #[arg(short, long, default_value = "markdown")]
        format: String,

        /// History file
        #[arg(long)]
        history: Option<PathBuf>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = match cli.command {
        Commands::Cast {
            question,
            seed,
            offline,
            cache,
            history,
            delay,
            json,
        } => {
            let options = commands::cast::CastOptions {
                seed,
                offline,
                cache,
                history,
                delay,
                json,
            };
            commands::cast::run(&question, options).await
        }
        Commands::List => commands::list::run(),
        Commands::Show { number } => commands::show::run(number),
        Commands::Study {
            number,
            offline,
            cache,
        } => commands::study::run(number, offline, cache).await,
        Commands::History {
            format,
            history,
            output,
        } => commands::history::run(&format, history, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
