use clap::Parser;
use std::path::PathBuf;
use tourease_core::{
    providers::HttpContactProvider, Catalog, Category, Config, ContactForm, ContactService,
    Destination, FavoriteId, FavoritesStore,
};
use tourease_storage::{KeyValueStore, MemoryStore, SqliteStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tourease")]
#[command(version, about = "Browse destinations, keep favorites, and contact the TourEase team", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/tourease/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage database, overrides the config file
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Contact API base URL, overrides TOUREASE_API_URL and the config file
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List destinations
    Destinations {
        /// budget-friendly, luxury, beach, mountains or cultural
        #[arg(long)]
        category: Option<Category>,

        /// Only show favorites
        #[arg(long)]
        favorites: bool,
    },
    /// Manage favorite destinations
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Send a message to the TourEase team
    Contact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    /// Print the welcome banner
    Welcome,
}

#[derive(clap::Subcommand)]
enum FavoritesAction {
    /// Show your collection
    List,
    /// Add or remove destinations (same id twice cancels out)
    Toggle {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Is this destination a favorite?
    Check { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the listings
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tourease=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Destinations { category, favorites } => {
            let catalog = load_catalog(&config)?;
            let store = FavoritesStore::load_with_key(open_storage(&config), &config.storage.favorites_key);
            list_destinations(&catalog, &store, category, favorites);
        }
        Commands::Favorites { action } => {
            let catalog = load_catalog(&config)?;
            let mut store =
                FavoritesStore::load_with_key(open_storage(&config), &config.storage.favorites_key);
            run_favorites(action, &catalog, &mut store);
        }
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let provider = HttpContactProvider::new(&config.api.base_url)?;
            tracing::info!("Sending contact form to {}", provider.submit_url());

            let service = ContactService::new(provider);
            let outcome = service
                .send(ContactForm::new(name, email, subject, message))
                .await;

            if outcome.is_sent() {
                println!("✅ {}", outcome.message());
            } else {
                eprintln!("❌ {}", outcome.message());
                std::process::exit(1);
            }
        }
        Commands::Welcome => {
            let storage = open_storage(&config);
            println!("{}", tourease_core::welcome_message(&storage));
            println!("Ready to start your journey? Try `tourease destinations`.");
        }
    }

    Ok(())
}

/// File (or default location) + env, then CLI flags on top
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env(std::env::var(tourease_core::config::API_URL_ENV).ok());
            config
        }
        None => Config::load()?,
    };

    if let Some(path) = &cli.storage {
        config.storage.path = Some(path.clone());
    }
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    Ok(config)
}

fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    Ok(match &config.catalog.path {
        Some(path) => Catalog::load_from(path)?,
        None => Catalog::builtin(),
    })
}

/// SQLite if we can get it, otherwise favorites only last this run
fn open_storage(config: &Config) -> Box<dyn KeyValueStore> {
    let opened = config.storage_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(SqliteStore::open(&path)?)
    });

    match opened {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!("Durable storage unavailable, using memory only: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}

fn list_destinations<S: KeyValueStore>(
    catalog: &Catalog,
    store: &FavoritesStore<S>,
    category: Option<Category>,
    favorites_only: bool,
) {
    let shown: Vec<&Destination> = catalog
        .filter(category)
        .into_iter()
        .filter(|d| !favorites_only || store.is_favorite(&d.id))
        .collect();

    let heading = category.map_or("All Destinations", |c| c.label());
    println!("{} ({})\n", heading, shown.len());

    for dest in shown {
        print_card(dest, store.is_favorite(&dest.id));
    }
}

fn run_favorites<S: KeyValueStore>(
    action: FavoritesAction,
    catalog: &Catalog,
    store: &mut FavoritesStore<S>,
) {
    match action {
        FavoritesAction::List => {
            let cards = catalog.favorites(store.favorite_ids());
            if cards.is_empty() {
                println!("No Favorites Yet");
                println!("Explore destinations and add favorites with `tourease favorites toggle <id>`.");
                return;
            }

            println!("Your Collection ({})\n", cards.len());
            for dest in cards {
                print_card(dest, true);
            }
        }
        FavoritesAction::Toggle { ids } => {
            let ids: Vec<FavoriteId> = ids.iter().map(|raw| FavoriteId::parse(raw)).collect();

            // Report against the state before the batch, so `toggle a a` says nothing changed
            let before: Vec<bool> = ids.iter().map(|id| store.is_favorite(id)).collect();
            store.toggle_all(ids.iter().cloned());

            for (id, was) in ids.iter().zip(before) {
                let now = store.is_favorite(id);
                let label = catalog.get(id).map_or_else(|| id.to_string(), |d| d.name.clone());
                match (was, now) {
                    (false, true) => println!("♥ Added {}", label),
                    (true, false) => println!("♡ Removed {}", label),
                    _ => println!("· {} unchanged", label),
                }
            }
        }
        FavoritesAction::Check { id } => {
            let id = FavoriteId::parse(&id);
            if store.is_favorite(&id) {
                println!("♥ {} is a favorite", id);
            } else {
                println!("♡ {} is not a favorite", id);
            }
        }
    }
}

fn print_card(dest: &Destination, favorite: bool) {
    let heart = if favorite { "♥" } else { "♡" };
    println!(
        "{} {} [{}]  ★ {:.1} ({} reviews)",
        heart, dest.name, dest.id, dest.rating, dest.reviews
    );
    println!(
        "    Best for: {} | Best season: {} | Budget: {}",
        dest.best_for, dest.season, dest.cost
    );
}
