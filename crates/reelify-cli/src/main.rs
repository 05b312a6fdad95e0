use clap::{ArgAction, Parser, Subcommand};
use commands::browse::{self, Feed};
use commands::collection::{self, Shelf};
use commands::context::AppContext;
use commands::{chat, config};
use reelify_config::{Config, PathManager};
use reelify_models::{Mood, MovieId, RatingTag};

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "reelify")]
#[command(about = "Reelify - Find a movie for your mood")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show popular movies
    Popular {
        /// Page to start from
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Additional pages to load after the first one
        #[arg(long, default_value_t = 0)]
        more: u32,
    },
    /// Search movies by title
    #[command(long_about = "Search TMDB by title. When TMDB returns nothing, the built-in catalog is searched by title and keywords. An empty query shows popular movies.")]
    Search {
        /// Search text
        #[arg(num_args = 0..)]
        query: Vec<String>,

        /// Additional pages to load after the first one
        #[arg(long, default_value_t = 0)]
        more: u32,
    },
    /// Discover movies that fit a mood
    #[command(long_about = "Discover popular movies in the genre tied to a mood: sad, happy, relaxed, excited, romantic, scared, thoughtful, nostalgic.")]
    Mood {
        #[arg(value_parser = browse::parse_mood)]
        mood: Mood,

        /// Additional pages to load after the first one
        #[arg(long, default_value_t = 0)]
        more: u32,
    },
    /// Pick a random popular movie
    Surprise,
    /// Pick one of the best rated movies
    Idea,
    /// Show details, review and streaming info for a movie
    Show {
        /// Movie id: tmdb:<n>, local:<n> or a bare TMDB number
        id: MovieId,
    },
    /// Toggle a movie on the watchlist, or list the watchlist
    Watchlist { id: Option<MovieId> },
    /// Toggle a movie as watched, or list watched movies
    Watched { id: Option<MovieId> },
    /// Tag a movie fire, good or meh (repeating the same tag clears it)
    Rate { id: MovieId, tag: RatingTag },
    /// Show collection statistics
    Collection,
    /// Ask for a recommendation in plain words
    Chat {
        /// Message to answer; starts an interactive chat when omitted
        #[arg(num_args = 0..)]
        message: Vec<String>,
    },
    /// Manage configuration and the TMDB API key
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store the TMDB API key in the credentials file
    #[command(long_about = "Store the TMDB API key. The TMDB_API_KEY environment variable takes precedence over the stored key.")]
    SetApiKey {
        /// API key (prompted when omitted)
        key: Option<String>,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // A broken config must not prevent `config init --force`, so logging
    // reads it leniently
    let log_file = Config::load_or_default(&PathManager::default().config_file())
        .ok()
        .and_then(|config| config.logging.file);
    logging::init_logging(cli.verbose, cli.quiet, log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    run(cli.command, &output).await
}

async fn run(command: Commands, output: &output::Output) -> color_eyre::Result<()> {
    // Config commands must work even when the config values fail validation
    let ctx = match command {
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            return config::run_config(cmd, output).await;
        }
        _ => AppContext::load()?,
    };
    let ctx = &ctx;

    match command {
        Commands::Popular { page, more } => browse::run_feed(ctx, Feed::Popular { page }, more, output).await,
        Commands::Search { query, more } => {
            let query = query.join(" ");
            browse::run_feed(ctx, Feed::Search { query }, more, output).await
        }
        Commands::Mood { mood, more } => browse::run_feed(ctx, Feed::Mood { mood }, more, output).await,
        Commands::Surprise => browse::run_surprise(ctx, output).await,
        Commands::Idea => browse::run_idea(ctx, output).await,
        Commands::Show { id } => browse::run_show(ctx, id, output).await,
        Commands::Watchlist { id } => collection::run_shelf(ctx, Shelf::Watchlist, id, output).await,
        Commands::Watched { id } => collection::run_shelf(ctx, Shelf::Watched, id, output).await,
        Commands::Rate { id, tag } => collection::run_rate(ctx, id, tag, output).await,
        Commands::Collection => collection::run_summary(ctx, output).await,
        Commands::Chat { message } => {
            let message = Some(message.join(" ")).filter(|m| !m.trim().is_empty());
            chat::run_chat(ctx, message, output).await
        }
        Commands::Config { .. } => Ok(()),
    }
}
