use std::{path::PathBuf, sync::Arc, time::Duration};

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::{bail, Context};
use clap::Parser;
use client_core::HttpPredictionClient;
use shared::catalog::{ReactionType, EXAMPLE_COMPOUNDS};
use tracing_subscriber::EnvFilter;

use crate::ui::{
    page::{ElementId, Page},
    render, FormSession,
};

/// Fill in and submit the alcohol reaction prediction form against a live server.
#[derive(Parser, Debug)]
struct Args {
    /// Config file; defaults to ./reaction_form.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    /// Text typed into the compound field.
    #[arg(long, conflicts_with = "example")]
    compound: Option<String>,
    /// Click the example compound at this position instead of typing one.
    #[arg(long)]
    example: Option<usize>,
    #[arg(long, required_unless_present = "list")]
    reaction_type: Option<String>,
    #[arg(long, required_unless_present = "list")]
    catalyst: Option<String>,
    /// Click "save" after a successful prediction.
    #[arg(long)]
    save: bool,
    /// Load the page without the save button and banners.
    #[arg(long)]
    no_save_controls: bool,
    /// Print the example compounds and the catalysts offered per reaction type.
    #[arg(long)]
    list: bool,
    #[arg(long, default_value_t = 30)]
    wait_secs: u64,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_catalog() {
    println!("example compounds:");
    for (index, compound) in EXAMPLE_COMPOUNDS.iter().enumerate() {
        println!("  {index:>2}  {compound}");
    }
    println!("reaction types:");
    for reaction_type in ReactionType::ALL {
        println!("  {} ({})", reaction_type.key(), reaction_type.label());
        for catalyst in reaction_type.catalysts() {
            println!("      {:<8} {}", catalyst.key(), catalyst.label());
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings = config::load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url.clone() {
        settings.server_url = server_url;
    }
    if args.no_save_controls {
        settings.save_controls = false;
    }
    init_tracing(&settings.log_filter);

    if args.list {
        print_catalog();
        return Ok(());
    }

    let client = HttpPredictionClient::new(&settings.server_url)
        .context("failed to build prediction client")?;
    tracing::info!(endpoint = %client.endpoint(), "prediction service");

    let page = if settings.save_controls {
        Page::standard()
    } else {
        Page::without_save_controls()
    };
    let mut session =
        FormSession::start(page, Arc::new(client)).context("failed to attach form controller")?;

    if let Some(index) = args.example {
        if index >= EXAMPLE_COMPOUNDS.len() {
            bail!(
                "--example {index} is out of range (0..{})",
                EXAMPLE_COMPOUNDS.len()
            );
        }
        session.click_example(index);
    }
    if let Some(compound) = &args.compound {
        session.type_compound(compound)?;
    }
    let reaction_type = args
        .reaction_type
        .as_deref()
        .context("--reaction-type is required")?;
    let catalyst = args.catalyst.as_deref().context("--catalyst is required")?;
    session.select_reaction_type(reaction_type)?;
    session.select_catalyst(catalyst)?;
    session.submit()?;

    let wait = Duration::from_secs(args.wait_secs);
    if !session.wait_for_network(wait) {
        bail!(
            "no response from {} within {}s",
            settings.server_url,
            args.wait_secs
        );
    }

    if args.save && session.page().is_visible(ElementId::ResultsPanel) {
        if session.click_save() {
            if !session.wait_for_network(wait) {
                bail!("save did not complete within {}s", args.wait_secs);
            }
        } else {
            tracing::warn!("page has no save controls; --save ignored");
        }
    }

    println!("{}", render::describe(session.page()));
    if !session.status().is_empty() {
        tracing::warn!("{}", session.status());
    }

    let failure = session
        .controller()
        .last_error()
        .map(|err| err.message().to_string());
    session.shutdown();
    match failure {
        Some(message) => bail!(message),
        None => Ok(()),
    }
}
