//! ShopDesk CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use shopdesk::cli::Cli;
use shopdesk::error::ApiError;

#[tokio::main]
async fn main() -> ExitCode {
    shopdesk::init_tracing();

    let cli = Cli::parse();
    match shopdesk::run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Command errors already carry a user-facing message.
            match e.downcast_ref::<ApiError>() {
                Some(api) => eprintln!("{}", api.message),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
