// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::io;

use clap::Parser;
use eventsearch::cli::{display, App, Cli, Prompt};
use eventsearch::{RestSearchClient, ServiceConfig};
use tracing::info;

fn init_tracing(cli: &Cli) {
    // --quiet: off. --verbose: RUST_LOG or info. Otherwise warnings only,
    // so partial batch failures still surface.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    let ansi = !(cli.no_color || std::env::var_os("NO_COLOR").is_some());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> eventsearch::Result<()> {
    let config = ServiceConfig::from_cli(&cli)?;
    info!(?config, "connecting");

    let client = RestSearchClient::new(&config)?;
    let mut app = App::new(client, config.documents);

    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stdout());
    app.run(&mut prompt).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        display::disable_colors();
    }
    init_tracing(&cli);

    if let Err(e) = run(cli).await {
        eprintln!("{}", display::failure(&format!("error: {}", e)));
        std::process::exit(1);
    }
}
