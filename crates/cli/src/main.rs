use anyhow::{Context, Result, bail};
use catalog::{Catalog, MediaItem, UserAction};
use clap::{Parser, Subcommand};
use colored::Colorize;
use providers::CatalogProvider;
use session::{FileStore, SwipeSession};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// indicAI - swipe-based media recommendations
#[derive(Parser)]
#[command(name = "indicai")]
#[command(about = "Swipe through movies, series, books, and music to tune your recommendations", long_about = None)]
struct Cli {
    /// Path to a catalog JSON file (defaults to the built-in catalog)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Directory holding session state
    #[arg(short, long, default_value = ".indicai")]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the next recommendation slate
    Discover {
        /// Maximum number of items to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Record a swipe on an item
    Swipe {
        /// Item id from the current slate
        #[arg(long)]
        item_id: String,

        /// One of: like, dislike, superlike, skip
        #[arg(long)]
        action: UserAction,
    },

    /// Seed your taste profile from items you already know you like
    Onboard {
        /// Comma-separated catalog item ids
        #[arg(long, value_delimiter = ',')]
        item_ids: Vec<String>,
    },

    /// Show the highest-rated content right now
    Trending {
        /// Number of items to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show your taste profile and interaction stats
    Profile,

    /// Show how many choices remain today
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let catalog = Arc::new(load_catalog(cli.catalog.as_deref())?);
    let store = FileStore::open(&cli.state_dir).with_context(|| {
        format!("Failed to open state directory {}", cli.state_dir.display())
    })?;
    let mut session = SwipeSession::load(store);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Discover { limit } => handle_discover(&mut session, &catalog, limit).await?,
        Commands::Swipe { item_id, action } => {
            handle_swipe(&mut session, &catalog, &item_id, action)?
        }
        Commands::Onboard { item_ids } => handle_onboard(&mut session, &catalog, &item_ids)?,
        Commands::Trending { limit } => handle_trending(&session, &catalog, limit).await?,
        Commands::Profile => handle_profile(&session),
        Commands::Status => handle_status(&mut session),
    }

    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load_from_file(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

/// Handle the 'discover' command
async fn handle_discover(
    session: &mut SwipeSession<FileStore>,
    catalog: &Arc<Catalog>,
    limit: usize,
) -> Result<()> {
    let provider = CatalogProvider::new(catalog.clone());
    let slate = session.discover(&provider, catalog, limit).await;

    if slate.is_empty() {
        if session.is_daily_limit_reached() {
            println!(
                "{}",
                "Daily limit of 20 choices reached. Come back tomorrow to keep discovering!"
                    .yellow()
            );
        } else {
            println!("No new content right now. Try adjusting your preferences.");
        }
        return Ok(());
    }

    println!("{}", "Discover".bold().blue());
    print_items(&slate);
    println!(
        "\nSwipe with: {} --item-id <id> --action <like|dislike|superlike|skip>",
        "indicai swipe".green()
    );
    Ok(())
}

/// Handle the 'swipe' command
fn handle_swipe(
    session: &mut SwipeSession<FileStore>,
    catalog: &Catalog,
    item_id: &str,
    action: UserAction,
) -> Result<()> {
    let Some(item) = catalog.get(item_id) else {
        bail!("Item {} not found in catalog", item_id);
    };

    let counted = session.swipe(item_id, action, catalog.items())?;

    println!(
        "{} {:?} on {} ({})",
        "✓".green(),
        action,
        item.title,
        item.year
    );
    if counted {
        println!("{} choices left today", session.remaining_choices());
    } else {
        println!(
            "{}",
            "Daily limit reached - this swipe no longer counts toward today.".yellow()
        );
    }
    Ok(())
}

/// Handle the 'onboard' command
fn handle_onboard(
    session: &mut SwipeSession<FileStore>,
    catalog: &Catalog,
    item_ids: &[String],
) -> Result<()> {
    let picks: Vec<MediaItem> = item_ids
        .iter()
        .filter_map(|id| catalog.get(id))
        .cloned()
        .collect();

    if picks.is_empty() {
        bail!("None of the given ids exist in the catalog");
    }

    session.seed_preferences(&picks)?;

    println!(
        "{} Seeded your profile from {} picks:",
        "✓".green(),
        picks.len()
    );
    for genre in session.profile().ranked_genres() {
        println!("  {} {}", "•".cyan(), genre);
    }
    Ok(())
}

/// Handle the 'trending' command
async fn handle_trending(
    session: &SwipeSession<FileStore>,
    catalog: &Arc<Catalog>,
    limit: usize,
) -> Result<()> {
    let provider = CatalogProvider::new(catalog.clone());

    let items = match session.trending(&provider, limit).await {
        Ok(items) => items,
        Err(error) => {
            // Same answer the app gives when the feed is down: best-rated
            // catalog content.
            tracing::warn!("Trending feed unavailable ({}), using the catalog", error);
            let mut items = catalog.items().to_vec();
            items.sort_by(|a, b| {
                b.rating
                    .partial_cmp(&a.rating)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            items.truncate(limit);
            items
        }
    };

    println!("{}", "Trending now".bold().blue());
    print_items(&items);
    Ok(())
}

/// Handle the 'profile' command
fn handle_profile(session: &SwipeSession<FileStore>) {
    println!("{}", "Your taste profile".bold().blue());

    let profile = session.profile();
    if profile.is_empty() {
        println!("No preferences yet - swipe a few items or run onboard.");
    } else {
        for entry in profile.entries() {
            println!("  {} {:<12} {}", "•".cyan(), entry.genre, entry.weight);
        }
    }

    let stats = session.stats();
    println!("\n{}", "Stats".bold());
    println!("  Likes:      {}", stats.likes);
    println!("  Dislikes:   {}", stats.dislikes);
    println!("  Skips:      {}", stats.skips);
    println!("  Total:      {}", stats.total_interactions);
    println!("  Like ratio: {:.0}%", stats.like_ratio * 100.0);
}

/// Handle the 'status' command
fn handle_status(session: &mut SwipeSession<FileStore>) {
    let remaining = session.remaining_choices();
    if session.is_daily_limit_reached() {
        println!(
            "{}",
            "Daily limit of 20 choices reached. Come back tomorrow!".yellow()
        );
    } else {
        println!("{} choices left today", remaining.to_string().green());
    }
}

/// Helper function to format and print a ranked item list
fn print_items(items: &[MediaItem]) {
    for (rank, item) in items.iter().enumerate() {
        let genres = item.genres.join(", ");
        println!(
            "{:>3}. {} ({}) [{}] {:?} - {:.1} | id {}",
            (rank + 1).to_string().green(),
            item.title.bold(),
            item.year,
            genres,
            item.kind,
            item.rating,
            item.id.cyan()
        );
    }
}
