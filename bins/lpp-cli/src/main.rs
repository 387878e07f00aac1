mod batch;
mod commands;
mod fetcher;
mod pipeline;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lpp_common::config::Config;
use lpp_common::types::Difficulty;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lpp")]
#[command(about = "LeetPlusPlus - Generate C++ solution scaffolds for LeetCode problems", long_about = None)]
struct Cli {
    /// Project root containing src/Problems (overrides LPP_ROOT)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Problem API base URL (overrides LPP_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a problem and generate its solution file
    Fetch {
        /// Problem number, title slug, or "daily"
        identifier: String,

        /// Overwrite an existing solution for the same problem
        #[arg(short, long)]
        force: bool,

        /// C++ method signature to use instead of the extracted one
        #[arg(short, long)]
        signature: Option<String>,
    },

    /// Generate solutions for a page of the problem list
    Batch {
        /// Number of problems to request
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Number of problems to skip
        #[arg(long, default_value = "0")]
        skip: usize,

        /// Only problems of this difficulty (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Only problems with these topic tags (comma separated slugs)
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Overwrite existing solutions
        #[arg(short, long)]
        force: bool,
    },

    /// Create a solution file from details given on the command line
    New {
        /// Problem number
        number: u64,

        /// Problem title
        #[arg(short, long)]
        title: String,

        /// C++ method signature, e.g. "vector<int> twoSum(vector<int>& nums, int target)"
        #[arg(short, long)]
        signature: String,

        /// Difficulty (easy, medium, hard)
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,

        /// Topic tags (comma separated)
        #[arg(long, value_delimiter = ',')]
        topics: Vec<String>,

        /// Companies (comma separated)
        #[arg(long, value_delimiter = ',')]
        companies: Vec<String>,

        /// Overwrite an existing solution for the same problem
        #[arg(short, long)]
        force: bool,
    },

    /// List problems from the catalog, or generated solutions
    List {
        /// Only this difficulty
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Only problems whose topics contain this text
        #[arg(short, long)]
        topic: Option<String>,

        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<usize>,

        /// List generated solutions instead of the catalog
        #[arg(short, long)]
        generated: bool,
    },

    /// Fetch a random problem from the catalog
    Random {
        /// Only this difficulty (easy, medium, hard)
        difficulty: Option<Difficulty>,

        /// Overwrite an existing solution for the same problem
        #[arg(short, long)]
        force: bool,
    },

    /// Download the full problem list into problems.json
    Update,

    /// Show API availability and generation counts
    Status,

    /// Rebuild AllProblems.h from the solution files on disk
    Regenerate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env();
    if let Some(root) = cli.root {
        config = config.with_root(root);
    }
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_url(url);
    }
    tracing::debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Fetch {
            identifier,
            force,
            signature,
        } => {
            commands::fetch(&config, &identifier, force, signature)?;
        }
        Commands::Batch {
            limit,
            skip,
            difficulty,
            tags,
            force,
        } => {
            commands::batch(&config, limit, skip, difficulty, tags, force)?;
        }
        Commands::New {
            number,
            title,
            signature,
            difficulty,
            topics,
            companies,
            force,
        } => {
            let request = pipeline::SolutionRequest {
                id: number.to_string(),
                title,
                signature,
                difficulty,
                topics,
                companies,
                force,
            };
            commands::new_problem(&config, request)?;
        }
        Commands::List {
            difficulty,
            topic,
            limit,
            generated,
        } => {
            let filter = commands::ListFilter {
                difficulty,
                topic,
                limit,
            };
            commands::list(&config, &filter, generated)?;
        }
        Commands::Random { difficulty, force } => {
            commands::random(&config, difficulty, force)?;
        }
        Commands::Update => {
            commands::update(&config)?;
        }
        Commands::Status => {
            commands::status(&config)?;
        }
        Commands::Regenerate => {
            commands::regenerate(&config)?;
        }
    }

    Ok(())
}
