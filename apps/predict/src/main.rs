use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpPredictionClient, PredictionService};
use shared::protocol::PredictionForm;
use tracing_subscriber::EnvFilter;

/// Post one form to `/predict` and print the decoded outcome as JSON.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, env = "REACTION_FORM_SERVER_URL", default_value = "http://127.0.0.1:5000")]
    server_url: String,
    #[arg(long)]
    compound: String,
    #[arg(long)]
    reaction_type: String,
    #[arg(long)]
    catalyst: String,
    /// Send the save flag as well.
    #[arg(long)]
    save: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let client = HttpPredictionClient::new(&args.server_url)?;
    let form = PredictionForm::new(args.compound, args.catalyst, args.reaction_type);
    tracing::info!(
        endpoint = %client.endpoint(),
        compound = %form.compound,
        save = args.save,
        "sending request"
    );

    if args.save {
        let outcome = client
            .save(&form)
            .await
            .with_context(|| format!("save request to {} failed", client.endpoint()))?;
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        let outcome = client
            .predict(&form)
            .await
            .with_context(|| format!("prediction request to {} failed", client.endpoint()))?;
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    Ok(())
}
