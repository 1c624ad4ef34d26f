//! curlsmith - interactive curl command builder
//!
//! Two thin front-ends over the core library:
//! - default: menu loop with saved-request listing and replay
//! - `quick`: single-shot build/preview/execute/save

use std::path::PathBuf;

use anyhow::Result;
use clap::{arg, command, value_parser, Command};

use curlsmith::catalog::HeaderCatalog;
use curlsmith::constants::{APP_NAME, APP_VERSION};
use curlsmith::network::create_client;
use curlsmith::session::Session;
use curlsmith::storage::{default_store_path, Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Log to a file so the prompts stay clean
    let file_appender = tracing_appender::rolling::never(".", "curlsmith.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let cmd = Command::new(APP_NAME)
        .version(APP_VERSION)
        .about("Interactively build, preview, execute and save curl commands")
        .arg(
            arg!(-s --store <FILE> "Path of the saved request store")
                .value_parser(value_parser!(PathBuf))
                .required(false)
                .global(true),
        )
        .subcommand(command!("quick").about("Build and run a single request, then exit"));

    let matches = cmd.get_matches();
    let store_path = matches
        .get_one::<PathBuf>("store")
        .cloned()
        .unwrap_or_else(default_store_path);

    let store = Store::load(store_path);
    let mut session = Session::new(store, HeaderCatalog::default(), create_client());

    match matches.subcommand() {
        Some(("quick", _)) => session.run_quick().await,
        _ => session.run_menu().await,
    }
}
