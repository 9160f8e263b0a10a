//! BlueThread CLI - Cart, catalog and checkout tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the saved cart
//! bt-cli cart show
//!
//! # Add an item directly
//! bt-cli cart add --product-id 1 --name "Organic Tee" --price 24.99 --size M --color Black
//!
//! # Change a quantity (values below 1 are ignored)
//! bt-cli cart update --product-id 1 --quantity 3 --size M --color Black
//!
//! # Browse a Printify export and add a variant from it
//! bt-cli catalog show products.json
//! bt-cli catalog add products.json --product 5d39b159e7c48c000728c89f --size M --color Black
//!
//! # Review the order, then complete it (clears the cart)
//! bt-cli checkout
//! bt-cli checkout --confirm
//! ```
//!
//! # Commands
//!
//! - `cart` - Show, add, remove, update and clear cart lines
//! - `catalog` - Read Printify catalog exports
//! - `checkout` - Order summary and completion
//!
//! Configuration is read from the environment (see
//! [`bluethread_storefront::config`]).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use bluethread_storefront::StorefrontConfig;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "bt-cli")]
#[command(author, version, about = "BlueThread storefront CLI tools")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and modify the saved cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Read Printify catalog exports
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Show the order summary
    Checkout {
        /// Complete the order and clear the cart
        #[arg(long)]
        confirm: bool,
    },
}

/// Size and color selection.
#[derive(Args)]
struct VariantArgs {
    /// Selected size
    #[arg(long)]
    size: Option<String>,

    /// Selected color
    #[arg(long)]
    color: Option<String>,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a line (merges with an existing line of the same product, size and color)
    Add {
        /// Product id
        #[arg(long)]
        product_id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Unit price
        #[arg(long)]
        price: Decimal,

        /// Thumbnail URL
        #[arg(long, default_value = "")]
        image_url: String,

        /// Number of units
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        #[command(flatten)]
        variant: VariantArgs,

        /// Catalog variant id
        #[arg(long)]
        variant_id: Option<String>,
    },
    /// Remove a line
    Remove {
        /// Product id
        #[arg(long)]
        product_id: String,

        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Set the quantity of a line
    Update {
        /// Product id
        #[arg(long)]
        product_id: String,

        /// New quantity
        #[arg(short, long, allow_hyphen_values = true)]
        quantity: i64,

        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Remove every line
    Clear,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products and variants in a Printify export
    Show {
        /// Printify product, product array or product page JSON
        file: PathBuf,
    },
    /// Add a product variant from a Printify export to the cart
    Add {
        /// Printify product, product array or product page JSON
        file: PathBuf,

        /// Product id
        #[arg(long)]
        product: String,

        #[command(flatten)]
        variant: VariantArgs,

        /// Number of units
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Initialize tracing with `EnvFilter` and Sentry integration.
///
/// Logs go to stderr so stdout carries only command output.
fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bluethread_cli=info,bluethread_storefront=info".into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configuration is loaded before tracing so Sentry can be bound first
    let config = StorefrontConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing(cli.log_json);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = run(cli.command, &config, &mut out);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(
    command: Commands,
    config: &StorefrontConfig,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = commands::open_store(config);

    match command {
        Commands::Cart { action } => match action {
            CartAction::Show => {}
            CartAction::Add {
                product_id,
                name,
                price,
                image_url,
                quantity,
                variant,
                variant_id,
            } => {
                let line = commands::cart::NewLine {
                    product_id,
                    name,
                    price,
                    image_url,
                    quantity,
                    size: variant.size,
                    color: variant.color,
                    variant_id,
                };
                store.add_item(line.into_line_item()?);
            }
            CartAction::Remove {
                product_id,
                variant,
            } => {
                commands::cart::remove(&mut store, product_id, variant.size, variant.color);
            }
            CartAction::Update {
                product_id,
                quantity,
                variant,
            } => {
                commands::cart::update(
                    &mut store,
                    product_id,
                    quantity,
                    variant.size,
                    variant.color,
                );
            }
            CartAction::Clear => store.clear_cart(),
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Show { file } => {
                let products = commands::catalog::load(&file)?;
                commands::catalog::render(&products, config.currency, out)?;
                return Ok(());
            }
            CatalogAction::Add {
                file,
                product,
                variant,
                quantity,
            } => {
                let products = commands::catalog::load(&file)?;
                commands::catalog::add_to_cart(
                    &mut store,
                    &products,
                    &product,
                    variant.size.as_deref(),
                    variant.color.as_deref(),
                    quantity,
                )?;
            }
        },
        Commands::Checkout { confirm } => {
            commands::checkout::run(&mut store, config, confirm, out)?;
            return Ok(());
        }
    }

    commands::cart::render(store.cart(), config.currency, out)?;
    Ok(())
}
