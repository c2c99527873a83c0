use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::{Arg, Command};
use slog::error;

pub mod api;
pub mod command_handlers;
pub mod db;
pub mod models;
pub mod sounds;
pub mod utils;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

fn cli() -> Command {
    Command::new("soundboard")
        .about("Serves the sound URLs stored in a document database")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("Print every stored sound URL"))
        .subcommand(
            Command::new("api-server")
                .about("Serve the sounds page data over HTTP")
                .arg(Arg::new("host").default_value(DEFAULT_HOST).help("Address to bind"))
                .arg(
                    Arg::new("port")
                        .default_value("8080")
                        .value_parser(clap::value_parser!(u16))
                        .help("Port to listen on"),
                ),
        )
}

async fn run(matches: clap::ArgMatches) -> anyhow::Result<()> {
    let client = db::new_db_client()
        .await
        .context("failed to create database client")?;

    match matches.subcommand() {
        Some(("list", _)) => {
            let result = command_handlers::list(client.as_ref()).await;
            client.close().await?;
            result
        }
        Some(("api-server", sub)) => {
            let host = sub
                .get_one::<String>("host")
                .map_or(DEFAULT_HOST, String::as_str);
            let port = sub.get_one::<u16>("port").copied().unwrap_or(DEFAULT_PORT);

            println!("Starting API server on http://{}:{}", host, port);
            let client: Arc<dyn db::DBClient> = Arc::from(client);
            api::start_server(host, port, client.clone())
                .await
                .context("API server failed")?;
            client.close().await?;
            Ok(())
        }
        Some((other, _)) => anyhow::bail!("unknown subcommand: {}", other),
        None => anyhow::bail!("expected 'list' or 'api-server' subcommand"),
    }
}

#[actix_web::main]
async fn main() {
    let matches = cli().get_matches();
    if let Err(e) = run(matches).await {
        error!(utils::get_logger(), "command failed"; "error" => format!("{:#}", e));
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
