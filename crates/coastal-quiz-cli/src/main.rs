//! coastal-quiz CLI — author, publish and take course quizzes.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "coastal-quiz",
    version,
    about = "Hash, publish and grade coastal-dynamics question sets"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash the answers of a question set before publishing it
    Hash {
        /// Question set: local path, az://container/blob.json or URL
        source: String,

        /// Where to write the hashed set (default: <stem>_hashed.json next to the source)
        #[arg(long)]
        output: Option<String>,
    },

    /// Upload a local question-set file
    Upload {
        /// Local JSON file
        file: PathBuf,

        /// Destination, e.g. az://coastal-dynamics/questions/week1.json
        destination: String,
    },

    /// Download a question set to a local file
    Download {
        /// Question set location
        source: String,

        /// Local file to write
        file: PathBuf,
    },

    /// Check that every question in a set can be built
    Validate {
        /// Question set location
        source: String,

        /// Answers are plain text rather than digests
        #[arg(long)]
        plain: bool,
    },

    /// List the questions of a set
    List {
        /// Question set location
        source: String,
    },

    /// Grade one answer
    Check {
        /// Question set location
        source: String,

        /// Question id
        #[arg(long)]
        id: String,

        /// Answer; repeat for multiple-selection questions
        #[arg(long = "answer")]
        answers: Vec<String>,

        /// Answers are plain text rather than digests
        #[arg(long)]
        plain: bool,
    },

    /// Answer a question set in the terminal
    Take {
        /// Question set location
        source: String,

        /// Answers are plain text rather than digests
        #[arg(long)]
        plain: bool,
    },

    /// Create a starter config and example question set
    Init,
}

#[tokio::main]
async fn main() {
    // a missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("coastal_quiz=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Hash { source, output } => {
            commands::hash::execute(source, output, config).await
        }
        Commands::Upload { file, destination } => {
            commands::upload::execute(file, destination, config).await
        }
        Commands::Download { source, file } => {
            commands::download::execute(source, file, config).await
        }
        Commands::Validate { source, plain } => {
            commands::validate::execute(source, plain, config).await
        }
        Commands::List { source } => commands::list::execute(source, config).await,
        Commands::Check {
            source,
            id,
            answers,
            plain,
        } => commands::check::execute(source, id, answers, plain, config).await,
        Commands::Take { source, plain } => commands::take::execute(source, plain, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
