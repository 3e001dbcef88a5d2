//! # Command-Line Interface
//!
//! ```text
//! shopdesk [--db-path PATH] [--in-memory] <command>
//!
//!   config show | config set --webhook-url URL ...
//!   signup / login / logout / whoami
//!   sale --customer ... --amount 50000 --payment mpesa
//!   inventory add-stock | sale | new-product ...
//!   offer --model ... --price ... [--image a.png]...
//!   customers search QUERY [--by name|phone|all]
//!   password-check PASSWORD
//! ```

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;

use shopdesk_core::protocol::{DealType, PaymentMethod, SearchType};

/// Parses a wire value such as `mpesa` or `flash-sale` into its enum.
fn wire_value<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_lowercase()))
        .map_err(|_| format!("unknown value '{raw}'"))
}

#[derive(Debug, Parser)]
#[command(name = "shopdesk", version, about = "Record sales, stock and offers through the shop webhook")]
pub struct Cli {
    /// SQLite database file [default: platform data directory]
    #[arg(long, env = "SHOPDESK_DB_PATH", global = true)]
    pub db_path: Option<PathBuf>,

    /// Keep settings and session in memory for this run only
    #[arg(long, env = "SHOPDESK_IN_MEMORY", global = true, value_parser = BoolishValueParser::new())]
    pub in_memory: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show or change shop settings
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Create a staff account
    Signup {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, env = "SHOPDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SHOPDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Record a phone sale
    Sale(SaleArgs),

    /// Report a stock movement
    #[command(subcommand)]
    Inventory(InventoryCommand),

    /// Broadcast an offer to the WhatsApp group
    Offer(OfferArgs),

    /// Look up past customers
    #[command(subcommand)]
    Customers(CustomersCommand),

    /// Score a password without sending it anywhere
    PasswordCheck { password: String },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    Show,
    Set {
        #[arg(long)]
        webhook_url: Option<String>,
        #[arg(long)]
        shop_name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        inquiry_number: Option<String>,
        #[arg(long)]
        whatsapp_group: Option<String>,
        /// Pass an empty string to remove it
        #[arg(long)]
        order_form_url: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct SaleArgs {
    #[arg(long)]
    pub customer: String,
    #[arg(long)]
    pub phone: String,
    /// Phone model sold
    #[arg(long)]
    pub model: String,
    #[arg(long)]
    pub amount: String,
    /// cash, mpesa, bank or installment
    #[arg(long, default_value = "cash", value_parser = wire_value::<PaymentMethod>)]
    pub payment: PaymentMethod,
    #[arg(long)]
    pub sales_person: String,
}

#[derive(Debug, Subcommand)]
pub enum InventoryCommand {
    /// New units of an existing product arrived
    AddStock {
        #[arg(long)]
        product_id: String,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        minimum_stock: Option<String>,
    },
    /// Units left the shop
    Sale {
        #[arg(long)]
        product_id: String,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        minimum_stock: Option<String>,
    },
    /// A model not yet in the catalog
    NewProduct {
        #[arg(long)]
        brand: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        minimum_stock: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct OfferArgs {
    #[arg(long)]
    pub model: String,
    #[arg(long)]
    pub price: String,
    #[arg(long, default_value = "")]
    pub features: String,
    /// new-arrival, discount, featured or flash-sale
    #[arg(long, default_value = "new-arrival", value_parser = wire_value::<DealType>)]
    pub deal_type: DealType,
    /// Image file to attach; repeatable
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CustomersCommand {
    Search {
        query: String,
        /// all, name or phone
        #[arg(long, default_value = "all", value_parser = wire_value::<SearchType>)]
        by: SearchType,
    },
}
