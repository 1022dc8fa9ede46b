use anyhow::{bail, Context};
use bari::api::{ApiClient, ReqwestTransport, Transport};
use bari::auth::{FileTokenStore, IntervalScheduler, SessionManager, SessionStatus};
use bari::config::Config;
use bari::favorites::FavoriteToggle;
use bari::format::{format_area, format_price};
use bari::models::{Listing, LoginCredentials};
use bari::search::{codec, MemoryHistory, QueryBuilder, ResultState, SearchController};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bari", version, about = "Browse and manage Bari property listings")]
struct Cli {
    /// Config file (default: bari.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search listings, e.g. `bari search "listingType=rent&area=Gulshan&bedrooms=2"`
    Search {
        /// Search URL or query string
        query: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        /// Also write the listings as JSON
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show one listing
    Listing { slug: String },
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Whoami,
    /// Add a listing to favorites, or remove it with --remove
    Favorite {
        listing_id: String,
        #[arg(long)]
        remove: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bari=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let transport: Arc<dyn Transport> =
        Arc::new(ReqwestTransport::new(&config.api).context("failed to build HTTP client")?);
    let store = Arc::new(FileTokenStore::new(&config.session.token_file));
    let session = Arc::new(
        SessionManager::new(transport.clone(), store)
            .with_prefix(&config.api.prefix)
            .with_refresh_skew(chrono::Duration::seconds(config.session.refresh_skew_secs)),
    );
    let client = Arc::new(ApiClient::from_config(&config, transport, session.clone()));

    match cli.command {
        Command::Search { query, page, out } => {
            search(&config, client, query.as_deref().unwrap_or(""), page, out).await?
        }
        Command::Listing { slug } => {
            let listing = client.listing(&slug).await?;
            print_listing(&listing);
            if let Some(description) = &listing.description {
                println!("\n{description}");
            }
        }
        Command::Login { email, password } => {
            let user = session.login(&LoginCredentials { email, password }).await?;
            println!("Signed in as {} ({})", user.name, user.role);
        }
        Command::Logout => {
            session.logout().await;
            println!("Signed out");
        }
        Command::Whoami => match session.restore().await {
            SessionStatus::Authenticated(user) => {
                println!("{} <{}> {}", user.name, user.email, user.role)
            }
            _ => println!("Not signed in"),
        },
        Command::Favorite { listing_id, remove } => {
            if session.restore().await.user().is_none() {
                bail!("sign in first with `bari login`");
            }
            let renewal = session.spawn_renewal(Arc::new(IntervalScheduler::new(
                Duration::from_secs(config.session.check_interval_secs),
            )));

            let mut toggle = FavoriteToggle::new(listing_id, remove);
            let result = toggle.toggle(&client).await;
            renewal.abort();

            match result? {
                true => println!("Added {} to favorites", toggle.listing_id()),
                false => println!("Removed {} from favorites", toggle.listing_id()),
            }
        }
    }

    Ok(())
}

async fn search(
    config: &Config,
    client: Arc<ApiClient>,
    query: &str,
    page: Option<u32>,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let query = if query.contains('?') {
        codec::query_of(query)
    } else {
        query
    };
    let mut location = format!("{}?{}", codec::SEARCH_PATH, query);
    if !query.contains("limit=") {
        location.push_str(&format!("&limit={}", config.search.page_size));
    }
    let builder = QueryBuilder::for_city(config.search.city.as_str());
    let mut search = SearchController::new(client, builder, MemoryHistory::new(location));
    if let Some(page) = page {
        search.change_page(page);
    }

    info!("{}", search.title());
    let labels = search.filters().active_labels();
    if !labels.is_empty() {
        info!("Filters: {}", labels.join(" | "));
    }

    match search.fetch().await {
        ResultState::Loaded {
            listings,
            total,
            pagination,
        } => {
            println!("{} properties found\n", total);
            for (i, listing) in listings.iter().enumerate() {
                print!("{}. ", i + 1);
                print_listing(listing);
                println!();
            }
            if let Some(pagination) = pagination {
                let pages: Vec<String> = pagination
                    .pages
                    .iter()
                    .map(|p| {
                        if *p == pagination.current {
                            format!("[{p}]")
                        } else {
                            p.to_string()
                        }
                    })
                    .collect();
                println!("Pages: {} of {}", pages.join(" "), pagination.total_pages);
            }

            if let Some(path) = out {
                let json = serde_json::to_string_pretty(listings)?;
                tokio::fs::write(&path, json)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("Saved {} listings to {}", listings.len(), path.display());
            }
        }
        ResultState::Empty => println!("No properties match these filters. Try clearing some."),
        ResultState::Failed { message } => {
            bail!("search failed: {message} (run the same command again to retry)")
        }
        ResultState::Loading { .. } => {}
    }

    Ok(())
}

fn print_listing(listing: &Listing) {
    println!("{} ({})", listing.title, format_price(&listing.price, false));
    let mut facts = vec![listing.category().label().to_string()];
    if let Some(beds) = listing.bedrooms {
        facts.push(format!("{beds} beds"));
    }
    if let Some(baths) = listing.bathrooms {
        facts.push(format!("{baths} baths"));
    }
    if let Some(area) = listing.area_sq_ft {
        facts.push(format_area(area));
    }
    println!("   {}", facts.join(", "));
    match &listing.area {
        Some(area) => println!("   {}, {}, {}", listing.address, area, listing.city),
        None => println!("   {}, {}", listing.address, listing.city),
    }
    if listing.is_verified {
        println!("   Verified");
    }
    println!("   Slug: {}", listing.slug);
}
