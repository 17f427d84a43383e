use clap::{ArgAction, Args, Parser, Subcommand};
use commands::{browse, config, shared, watchlist, AppContext};
use shelf_core::{SortKey, TypeFilter};
use shelf_models::MediaType;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelshelf")]
#[command(about = "ReelShelf - Discover movies and series and keep a personal watchlist")]
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
    /// Browse trending content or search the catalog
    #[command(long_about = "List today's trending movies or series, or search by title when --query is given. Results are paginated by the remote API; --genre filters the returned page.")]
    Browse {
        /// movie or tv
        #[arg(long = "type", default_value = "movie")]
        media_type: MediaType,

        /// Search text
        #[arg(short = 'Q', long)]
        query: Option<String>,

        /// Page number (clamped to the available pages)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Only keep results with this genre id (see `reelshelf genres`)
        #[arg(short, long)]
        genre: Option<u64>,

        /// Show the featured carousel (curated picks, then popular titles) instead
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["query", "page", "genre"])]
        featured: bool,
    },
    /// List movie and TV genres
    Genres,
    /// Show details for a movie or series
    Show {
        media_type: MediaType,
        id: u64,

        /// Also load every season's episodes (series only)
        #[arg(long, action = ArgAction::SetTrue)]
        seasons: bool,
    },
    /// Manage the personal watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },
    /// Open a shared watchlist link
    #[command(long_about = "Decode and display a watchlist shared with `reelshelf watchlist share`. Accepts the full link or just the value of its data parameter.")]
    Shared {
        link: String,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Manage configuration and the TMDB API key
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// Show the watchlist with details
    List {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Add an entry (no-op if it is already there)
    Add {
        media_type: MediaType,
        id: u64,

        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// Remove an entry
    Remove { media_type: MediaType, id: u64 },
    /// Add the entry if missing, otherwise remove it
    #[command(long_about = "Add the entry if it is missing, otherwise remove it. Removing drops the entry's note; toggling it back starts with an empty note.")]
    Toggle { media_type: MediaType, id: u64 },
    /// Replace the note of an entry
    Note {
        media_type: MediaType,
        id: u64,
        text: String,
    },
    /// Print a shareable link (notes are not included)
    Share,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the full API key
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store the TMDB API key
    #[command(long_about = "Store the TMDB API key in credentials.toml. Prompts without echo when --key is not given. The TMDB_API_KEY environment variable takes precedence over the stored key.")]
    ApiKey {
        #[arg(long)]
        key: Option<String>,

        /// Remove the stored key
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "key")]
        clear: bool,
    },
    /// Write a config.toml with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// addedAt, title, rating or year (defaults to watchlist.default_sort)
    #[arg(short, long)]
    sort: Option<SortKey>,

    /// all, movie or tv
    #[arg(long = "type", default_value = "all")]
    type_filter: TypeFilter,

    /// Case-insensitive search text
    #[arg(short = 'Q', long, default_value = "")]
    query: String,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let ctx = AppContext::load()?;

    logging::init_logging(cli.verbose, cli.quiet, &ctx.config.logging)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Browse {
            media_type,
            query,
            page,
            genre,
            featured,
        } => {
            if featured {
                browse::run_featured(&ctx, &output).await
            } else {
                browse::run_browse(&ctx, media_type, query, page, genre, &output).await
            }
        }
        Commands::Genres => browse::run_genres(&ctx, &output).await,
        Commands::Show { media_type, id, seasons } => browse::run_show(&ctx, media_type, id, seasons, &output).await,
        Commands::Watchlist { cmd } => match cmd {
            WatchlistCommands::List { view } => watchlist::run_list(&ctx, &view, &output).await,
            WatchlistCommands::Add { media_type, id, note } => watchlist::run_add(&ctx, media_type, id, &note, &output),
            WatchlistCommands::Remove { media_type, id } => watchlist::run_remove(&ctx, media_type, id, &output),
            WatchlistCommands::Toggle { media_type, id } => watchlist::run_toggle(&ctx, media_type, id, &output),
            WatchlistCommands::Note { media_type, id, text } => {
                watchlist::run_note(&ctx, media_type, id, &text, &output)
            }
            WatchlistCommands::Share => watchlist::run_share(&ctx, &output),
        },
        Commands::Shared { link, view } => shared::run_shared(&ctx, &link, &view, &output).await,
        Commands::Config { cmd } => config::run_config(&ctx, cmd, &output),
    }
}
