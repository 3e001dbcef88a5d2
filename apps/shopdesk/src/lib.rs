//! # ShopDesk Application Library
//!
//! Wires storage, the webhook transport and the forms together and runs one
//! CLI command against them.
//!
//! ## Module Organization
//! ```text
//! shopdesk/
//! ├── lib.rs          ◄─── You are here (bootstrap & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── context.rs  ◄─── AppContext (config + session + transport)
//! │   └── form.rs     ◄─── FormController (status, busy flag, submit)
//! ├── commands/       ◄─── One module per form / concern
//! └── error.rs        ◄─── ApiError returned by every command
//! ```
//!
//! ## Startup
//! ```text
//! init_tracing ──► open_store ──► AppContext::load ──► execute(command)
//!                     │
//!                     ├── --in-memory      → MemoryStore
//!                     └── otherwise        → SQLite file (migrated on open)
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shopdesk_core::forms::{
    CustomerSearchForm, InventoryForm, LoginForm, OfferForm, SaleForm, SignupForm,
};
use shopdesk_core::protocol::InventoryAction;
use shopdesk_db::{Database, DbConfig, KeyValueStore, MemoryStore};
use shopdesk_webhook::HttpWebhookClient;

use cli::{Cli, Command, ConfigCommand, CustomersCommand, InventoryCommand};
use commands::config::SettingsUpdate;
use error::ApiError;
use state::{AppContext, FormController};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopdesk_webhook=trace` - Trace one crate
/// - Default: `info,shopdesk=debug,sqlx=warn`
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopdesk=debug,sqlx=warn"));

    // A subscriber may already be installed (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Platform data directory path for the database file.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.shopdesk.desk/shopdesk.db`
/// - **Windows**: `%APPDATA%\shopdesk\desk\data\shopdesk.db`
/// - **Linux**: `~/.local/share/desk/shopdesk.db`
///
/// `--db-path` / `SHOPDESK_DB_PATH` override this.
pub fn default_database_path() -> anyhow::Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "shopdesk", "desk")
        .context("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Could not create {}", data_dir.display()))?;

    Ok(data_dir.join("shopdesk.db"))
}

/// Opens the key-value store selected by the global flags.
pub async fn open_store(cli: &Cli) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    if cli.in_memory {
        info!("Using in-memory store; nothing will be saved");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let path = match &cli.db_path {
        Some(path) => path.clone(),
        None => default_database_path()?,
    };
    info!(path = %path.display(), "Opening database");

    let db = Database::new(DbConfig::new(&path))
        .await
        .with_context(|| format!("Failed to open database at {}", path.display()))?;
    Ok(Arc::new(db))
}

/// Builds the context and runs `cli.command`. Returns the text to show the
/// user; printing is left to the caller.
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    let store = open_store(&cli).await?;
    let transport = HttpWebhookClient::new().context("Failed to build HTTP client")?;
    let ctx = AppContext::load(store, Arc::new(transport)).await;

    Ok(execute(&ctx, cli.command).await?)
}

/// Runs one command against an already loaded context.
pub async fn execute(ctx: &AppContext, command: Command) -> Result<String, ApiError> {
    match command {
        Command::Config(ConfigCommand::Show) => {
            let config = commands::config::get_config(ctx).await;
            serde_json::to_string_pretty(&config)
                .map_err(|e| ApiError::internal(format!("Failed to render settings: {e}")))
        }
        Command::Config(ConfigCommand::Set {
            webhook_url,
            shop_name,
            location,
            inquiry_number,
            whatsapp_group,
            order_form_url,
        }) => {
            let update = SettingsUpdate {
                webhook_url,
                shop_name,
                location,
                inquiry_contact_number: inquiry_number,
                whatsapp_group_link: whatsapp_group,
                order_form_url,
            };
            if update.is_empty() {
                return Err(ApiError::validation("Nothing to change"));
            }
            commands::config::update_settings(ctx, update).await?;
            Ok("Settings saved successfully!".to_string())
        }

        Command::Signup {
            full_name,
            email,
            phone,
            password,
        } => {
            let form = SignupForm {
                full_name,
                email,
                phone_number: phone,
                password,
            };
            commands::auth::signup(ctx, &FormController::with_form(form)).await
        }
        Command::Login { email, password } => {
            let form = LoginForm::new(email, password);
            commands::auth::login(ctx, &FormController::with_form(form)).await
        }
        Command::Logout => {
            commands::auth::logout(ctx).await?;
            Ok("Logged out.".to_string())
        }
        Command::Whoami => Ok(match commands::auth::whoami(ctx).await {
            Some(user) => format!("Logged in as {} ({})", user.display_name(), user.id),
            None => "Not logged in.".to_string(),
        }),
        Command::PasswordCheck { password } => {
            let report = commands::auth::password_strength(&password);
            let mut out = format!("Strength: {} ({}/5)", report.tier, report.points);
            for reason in &report.reasons {
                out.push_str("\n- ");
                out.push_str(reason);
            }
            Ok(out)
        }

        Command::Sale(args) => {
            let form = SaleForm {
                customer_name: args.customer,
                phone_number: args.phone,
                phone_bought: args.model,
                amount: args.amount,
                payment_method: args.payment,
                sales_person: args.sales_person,
            };
            commands::sale::submit_sale(ctx, &FormController::with_form(form)).await
        }

        Command::Inventory(inventory) => {
            let form = inventory_form(inventory);
            commands::inventory::submit_inventory(ctx, &FormController::with_form(form)).await
        }

        Command::Offer(args) => {
            let controller = FormController::with_form(OfferForm {
                phone_model: args.model,
                price: args.price,
                features: args.features,
                deal_type: args.deal_type,
                images: Vec::new(),
            });
            for path in &args.images {
                commands::offer::attach_image(&controller, path).await?;
            }
            commands::offer::broadcast_offer(ctx, &controller).await
        }

        Command::Customers(CustomersCommand::Search { query, by }) => {
            let form = CustomerSearchForm::new(query, by);
            let submission =
                commands::customer::search_customers(ctx, &FormController::with_form(form))
                    .await?;
            Ok(submission.message)
        }
    }
}

fn inventory_form(command: InventoryCommand) -> InventoryForm {
    let (mut form, minimum_stock) = match command {
        InventoryCommand::AddStock {
            product_id,
            quantity,
            minimum_stock,
        } => (
            InventoryForm {
                product_id,
                quantity,
                ..InventoryForm::for_action(InventoryAction::AddStock)
            },
            minimum_stock,
        ),
        InventoryCommand::Sale {
            product_id,
            quantity,
            minimum_stock,
        } => (
            InventoryForm {
                product_id,
                quantity,
                ..InventoryForm::for_action(InventoryAction::Sale)
            },
            minimum_stock,
        ),
        InventoryCommand::NewProduct {
            brand,
            model,
            quantity,
            price,
            minimum_stock,
        } => (
            InventoryForm {
                brand,
                model,
                quantity,
                price,
                ..InventoryForm::for_action(InventoryAction::NewProduct)
            },
            minimum_stock,
        ),
    };
    if let Some(minimum_stock) = minimum_stock {
        form.minimum_stock = minimum_stock;
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing::{configured_context, logged_in_context, RecordingTransport};
    use clap::Parser;

    fn command(args: &[&str]) -> Command {
        let mut argv = vec!["shopdesk"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[tokio::test]
    async fn test_config_set_then_show() {
        let ctx = configured_context(Arc::new(RecordingTransport::new())).await;

        let out = execute(&ctx, command(&["config", "set", "--shop-name", "Kilimani Phones"]))
            .await
            .unwrap();
        assert_eq!(out, "Settings saved successfully!");

        let shown = execute(&ctx, command(&["config", "show"])).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&shown).unwrap();
        assert_eq!(json["shopName"], "Kilimani Phones");
        assert_eq!(json["webhookUrl"], "https://n8n.example.com/webhook/shop");
    }

    #[tokio::test]
    async fn test_config_set_without_fields() {
        let ctx = configured_context(Arc::new(RecordingTransport::new())).await;
        let err = execute(&ctx, command(&["config", "set"])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_password_check_lists_hints() {
        let ctx = configured_context(Arc::new(RecordingTransport::new())).await;
        let out = execute(&ctx, command(&["password-check", "abcdefgh"]))
            .await
            .unwrap();
        assert!(out.starts_with("Strength: weak (1/5)"));
        assert!(out.lines().count() > 1);
    }

    #[tokio::test]
    async fn test_whoami_and_logout() {
        let ctx = logged_in_context(Arc::new(RecordingTransport::new())).await;
        let out = execute(&ctx, command(&["whoami"])).await.unwrap();
        assert!(out.starts_with("Logged in as"));

        execute(&ctx, command(&["logout"])).await.unwrap();
        let out = execute(&ctx, command(&["whoami"])).await.unwrap();
        assert_eq!(out, "Not logged in.");
    }

    #[tokio::test]
    async fn test_inventory_minimum_stock_override() {
        let transport = Arc::new(RecordingTransport::new());
        let ctx = logged_in_context(transport.clone()).await;

        execute(
            &ctx,
            command(&[
                "inventory",
                "new-product",
                "--brand",
                "Samsung",
                "--model",
                "Galaxy A15",
                "--quantity",
                "10",
                "--price",
                "18999",
                "--minimum-stock",
                "2",
            ]),
        )
        .await
        .unwrap();

        let body = serde_json::to_value(&transport.requests()[0]).unwrap();
        assert_eq!(body["actionType"], "new_product");
        assert_eq!(body["data"]["minimumStock"], 2);
        assert_eq!(body["data"]["brand"], "Samsung");
    }

    #[tokio::test]
    async fn test_search_requires_login() {
        let transport = Arc::new(RecordingTransport::new());
        let ctx = configured_context(transport.clone()).await;

        let err = execute(&ctx, command(&["customers", "search", "Jane"]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let cli = Cli::try_parse_from(["shopdesk", "--in-memory", "whoami"]).unwrap();
        let store = open_store(&cli).await.unwrap();
        assert!(store.list("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_db_path_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shopdesk.db");
        let path_arg = path.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from(["shopdesk", "--db-path", &path_arg, "whoami"]).unwrap();
        let store = open_store(&cli).await.unwrap();
        store.set("probe", "1").await.unwrap();
        drop(store);

        let store = open_store(&cli).await.unwrap();
        assert_eq!(store.get("probe").await.unwrap().unwrap().value, "1");
    }
}
