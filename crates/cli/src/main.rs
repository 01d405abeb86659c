//! Craft Culture CLI - Cart and checkout from the command line.
//!
//! Local storage is a JSON file (`CRAFT_STORAGE_PATH`), so every command sees
//! what the previous one wrote, the way browser tabs share `localStorage`.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (stands in for the web login flow)
//! craft-cli login alice --token <jwt>
//!
//! # Work with the cart
//! craft-cli cart add --id p1 --name "Brass Diya" --price 100 --offer 10
//! craft-cli cart show
//!
//! # Place the order
//! craft-cli checkout --full-name "Alice Rao" --email alice@example.com ...
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` - Manage the signed-in user
//! - `cart` - Show, add, update, remove, clear
//! - `checkout` - Submit the cart to the Order API

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};
use craft_culture_cart::{CartConfig, CheckoutForm, FileStorage, ShippingAddress};
use craft_culture_core::PaymentMethod;
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "craft-cli")]
#[command(author, version, about = "Craft Culture cart client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in as a user
    Login {
        /// Username to sign in as
        username: String,

        /// API bearer token
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Sign out
    Logout,
    /// Manage the signed-in user's cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the cart
    Checkout(CheckoutArgs),
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add a product
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Product name
        #[arg(long)]
        name: String,

        /// Unit price in rupees
        #[arg(long)]
        price: Decimal,

        /// Image URL
        #[arg(long, default_value = "")]
        image: String,

        /// Discount percentage (0-100)
        #[arg(long, default_value = "0")]
        offer: Decimal,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Product availability
        #[arg(long, value_enum, default_value_t = StatusArg::Available)]
        status: StatusArg,
    },
    /// Change a product's quantity by a signed amount
    Update {
        /// Product ID
        id: String,

        /// Quantity change, e.g. 2 or -1
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: String,
    },
    /// Remove everything
    Clear,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatusArg {
    Available,
    NotAvailable,
}

#[derive(clap::Args)]
struct CheckoutArgs {
    /// Recipient's full name
    #[arg(long)]
    full_name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Contact phone number
    #[arg(long)]
    phone: String,

    /// Street address
    #[arg(long)]
    street: String,

    /// City
    #[arg(long)]
    city: String,

    /// State
    #[arg(long)]
    state: String,

    /// Postal code
    #[arg(long)]
    postal_code: String,

    /// Country
    #[arg(long, default_value = craft_culture_cart::checkout::DEFAULT_COUNTRY)]
    country: String,

    /// Payment method (`online`, `cod`)
    #[arg(long, default_value = "online")]
    payment: PaymentMethod,
}

impl From<CheckoutArgs> for CheckoutForm {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            full_name: args.full_name,
            email: args.email,
            phone: args.phone,
            address: ShippingAddress {
                street: args.street,
                city: args.city,
                state: args.state,
                postal_code: args.postal_code,
                country: args.country,
            },
            payment_method: args.payment,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "craft_culture_cli=info,craft_culture_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let storage = FileStorage::new(&config.storage_path);
    tracing::debug!(path = %storage.path().display(), "Using local storage file");

    match cli.command {
        Commands::Login { username, token } => {
            commands::session::login(&storage, &username, token.as_deref())?;
        }
        Commands::Logout => commands::session::logout(&storage)?,
        Commands::Cart { action } => {
            let result = match action {
                CartAction::Show => commands::cart::show(storage),
                CartAction::Add {
                    id,
                    name,
                    price,
                    image,
                    offer,
                    quantity,
                    status,
                } => {
                    let product = commands::cart::ProductArgs {
                        id,
                        name,
                        price,
                        image,
                        offer,
                        available: status == StatusArg::Available,
                    };
                    commands::cart::add(storage, product, quantity)
                }
                CartAction::Update { id, delta } => commands::cart::update(storage, &id, delta),
                CartAction::Remove { id } => commands::cart::remove(storage, &id),
                CartAction::Clear => commands::cart::clear(storage),
            };
            if let Err(commands::cart::CartCommandError::Cart(e)) = &result {
                commands::log_navigation_hint(e);
            }
            result?;
        }
        Commands::Checkout(args) => {
            let form = CheckoutForm::from(args);
            let result = commands::checkout::place(storage, &config, &form).await;
            if let Err(commands::checkout::CheckoutError::Cart(e)) = &result {
                commands::log_navigation_hint(e);
            }
            result?;
        }
    }
    Ok(())
}
