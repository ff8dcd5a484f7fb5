//! Staff command line for the label portal

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use portal_client::auth::provider_from_config;
use portal_client::{
    AuthGate, CatalogService, CatalogView, ClientConfig, FileSessionStore, HttpClient,
    NetworkHttpClient, PostgrestStore, ProductId, SyncTrigger,
};
use shared::catalog::CategorySelection;
use shared::format::format_price;
use shared::print::{build_print_url, validate_print_quantity};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Exit code when the Auth Gate refuses a command
const EXIT_SIGN_IN_REQUIRED: u8 = 2;

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Browse the rice catalog, mark favorites and trigger label jobs")]
struct Cli {
    /// Persisted session marker
    #[arg(long, env = "PORTAL_SESSION_FILE", default_value = ".portal/session.json")]
    session_file: PathBuf,

    /// More log output (repeat for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session marker
    Login {
        username: String,
        #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and clear the session marker
    Logout,
    /// Show the current session
    Status,
    /// List retail rice products
    Catalog {
        /// `all`, `favorite` or a category name
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Search products by name, code or full name
    Search { term: String },
    /// Flip a product's favorite flag
    Toggle { id: String },
    /// Trigger the catalog sync webhook
    Sync,
    /// Print the label print link for a product code
    PrintUrl { code: String, quantity: i64 },
    /// Show store record counts
    Info,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info,portal_client=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn catalog_service(http: Arc<dyn HttpClient>, config: &ClientConfig) -> Result<CatalogService> {
    let store = PostgrestStore::from_config(http, config)?;
    Ok(CatalogService::new(Arc::new(store), config.timeout()))
}

fn print_products(products: &[portal_client::Product]) {
    for p in products {
        let star = if p.favorite { "*" } else { " " };
        println!(
            "{} {:>10}  {:<14} {:<40} {}",
            star,
            p.id,
            p.code,
            p.name,
            format_price(p.display_price())
        );
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ClientConfig::from_env()?;

    if let Commands::PrintUrl { code, quantity } = &cli.command {
        let quantity = validate_print_quantity(*quantity)?;
        println!("{}", build_print_url(config.print_base().as_deref(), code, quantity)?);
        return Ok(ExitCode::SUCCESS);
    }

    let http: Arc<dyn HttpClient> = Arc::new(
        NetworkHttpClient::new(config.timeout()).context("Failed to build HTTP client")?,
    );
    let provider = provider_from_config(http.clone(), &config)?;
    let store = Arc::new(FileSessionStore::new(&cli.session_file));
    let mut gate = AuthGate::new(provider, store);

    if let Commands::Login { username, password } = &cli.command {
        gate.check().await;
        if gate.login(username, password).await? {
            println!("Signed in as {}", username);
            return Ok(ExitCode::SUCCESS);
        }
        eprintln!("Invalid username or password");
        return Ok(ExitCode::FAILURE);
    }

    // Clears the marker even when the provider cannot confirm it
    if let Commands::Logout = &cli.command {
        gate.check().await;
        gate.logout().await?;
        println!("Signed out");
        return Ok(ExitCode::SUCCESS);
    }

    gate.check().await;
    let Some(session) = gate.session().cloned() else {
        eprintln!("sign in first: portal login <username>");
        return Ok(ExitCode::from(EXIT_SIGN_IN_REQUIRED));
    };

    match cli.command {
        Commands::Login { .. } | Commands::PrintUrl { .. } | Commands::Logout => {}
        Commands::Status => {
            println!("Signed in as {}", session.username);
            if let Some(expires_at) = session
                .expires_at
                .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
            {
                println!("Session expires at {}", expires_at.to_rfc3339());
            }
        }
        Commands::Catalog { category } => {
            let service = catalog_service(http, &config)?;
            let catalog = service.fetch_catalog().await?;
            let mut view = CatalogView::retail();
            view.replace(catalog.products);
            view.select(CategorySelection::parse(category.as_deref()));
            for bucket in view.buckets() {
                println!("[{}] {} ({})", bucket.key, bucket.label, bucket.count);
            }
            println!();
            print_products(&view.visible());
        }
        Commands::Search { term } => {
            let service = catalog_service(http, &config)?;
            print_products(&service.search_products(&term).await?);
        }
        Commands::Toggle { id } => {
            let service = catalog_service(http, &config)?;
            let id: ProductId = id.into();
            let favorite = service.toggle_favorite(&id).await?;
            println!(
                "Product {} is {} a favorite",
                id,
                if favorite { "now" } else { "no longer" }
            );
        }
        Commands::Sync => {
            let outcome = SyncTrigger::from_config(http, &config).trigger_sync().await?;
            println!("{}", outcome.message);
        }
        Commands::Info => {
            let service = catalog_service(http, &config)?;
            if !service.check_connection().await {
                eprintln!("Catalog store is not reachable");
                return Ok(ExitCode::FAILURE);
            }
            let info = service.database_info().await?;
            println!("products:   {}", info.products_count);
            println!("categories: {}", info.categories_count);
            println!("checked at: {}", info.last_updated.to_rfc3339());
        }
    }

    Ok(ExitCode::SUCCESS)
}
